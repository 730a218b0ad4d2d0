use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    /// アップロード失敗（メッセージはそのままユーザーに見せる）
    #[error(transparent)]
    Upload(#[from] contract_analyzer_common::Error),

    #[error("ダウンロード失敗: {0}")]
    Download(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
