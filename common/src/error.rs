//! エラー型定義
//!
//! Display がそのままユーザーに見せるメッセージになる。

use thiserror::Error;

/// ファイル未選択時のメッセージ
pub const NO_FILE_MESSAGE: &str = "Please select a PDF or DOCX file to upload.";

/// 何も分からなかった場合のメッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "Upload failed.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// ファイルが選ばれていない（通信前に弾く）
    #[error("Please select a PDF or DOCX file to upload.")]
    NoFileSelected,

    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),

    /// 接続失敗など、レスポンスを受け取れなかった場合
    #[error("{0}")]
    Transport(String),

    /// バックエンドが失敗ステータスを返した場合
    #[error("{message}")]
    Backend { status: u16, message: String },
}

impl Error {
    /// 空メッセージは汎用メッセージに置き換える
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Error::Transport(GENERIC_FAILURE_MESSAGE.to_string())
        } else {
            Error::Transport(message)
        }
    }

    /// 失敗レスポンスからエラーを組み立てる
    ///
    /// 優先順位: ボディの `error` フィールド → ボディ全文 → ステータス文言
    pub fn from_failed_response(status: u16, body: &str) -> Self {
        let message = error_message_from_body(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        Error::Backend { status, message }
    }
}

/// レスポンスボディからエラーメッセージを取り出す
///
/// JSONの `error` が空でない文字列や0以外の数値、true ならそれを、無ければボディをそのまま返す。
/// 空ボディは None。
pub fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let message = match value.get("error") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
            Some(serde_json::Value::Bool(true)) => "true".to_string(),
            _ => String::new(),
        };
        if !message.is_empty() {
            return Some(message);
        }
        return Some(value.to_string());
    }

    Some(trimmed.to_string())
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
