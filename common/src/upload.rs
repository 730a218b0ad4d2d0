//! アップロード処理の共通部分
//!
//! 実際の通信はCLI(reqwest)とWeb(fetch)でそれぞれ行う。ここには
//! エンドポイント組み立て、入力チェック、レスポンス解釈だけを置く。

use crate::error::{Error, Result};
use crate::types::AnalysisResponse;
use std::path::Path;

/// バックエンドの既定オリジン
pub const DEFAULT_BACKEND_ORIGIN: &str = "http://127.0.0.1:5000";

/// アップロードのタイムアウト（大きいPDF向けに長め）
pub const UPLOAD_TIMEOUT_SECS: u64 = 120;

/// multipart のフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// 受け付ける拡張子（小文字）
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// `<input accept>` 用
pub const ACCEPT_ATTRIBUTE: &str = ".pdf,.docx";

/// 末尾のスラッシュを落とす
pub fn normalize_origin(origin: &str) -> Result<String> {
    let origin = origin.trim().trim_end_matches('/');
    if origin.is_empty() {
        return Err(Error::Config("backend origin is empty".into()));
    }
    Ok(origin.to_string())
}

pub fn upload_url(origin: &str) -> String {
    format!("{}/upload", origin.trim_end_matches('/'))
}

/// ダウンロードURLを解決する
///
/// `http` で始まればそのまま、それ以外はオリジンに連結する。
pub fn resolve_download_url(origin: &str, link: &str) -> String {
    if link.starts_with("http") {
        return link.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if link.starts_with('/') {
        format!("{}{}", origin, link)
    } else {
        format!("{}/{}", origin, link)
    }
}

/// ファイル未選択なら通信せずに失敗させる
pub fn require_file<T>(file: Option<T>) -> Result<T> {
    file.ok_or(Error::NoFileSelected)
}

/// 拡張子がPDF/DOCXか
pub fn is_accepted_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ACCEPTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// multipart パートのContent-Type
pub fn mime_type_for(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else {
        "application/octet-stream"
    }
}

/// 成功レスポンスのボディを解釈する
///
/// 2xx で返ってきた以上は失敗扱いにしない。JSONでない本文や
/// オブジェクト以外のJSONは結果なしとして扱う。
pub fn parse_response(body: &str) -> Result<AnalysisResponse> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) if value.is_object() => Ok(serde_json::from_value(value)?),
        _ => Ok(AnalysisResponse::default()),
    }
}

/// 修正版契約書の案内
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadNotice {
    pub url: String,
    pub message: String,
}

impl DownloadNotice {
    pub fn new(url: String, filename: Option<&str>) -> Self {
        let message = match filename.filter(|f| !f.is_empty()) {
            Some(filename) => format!("Modified file created on server: {}", filename),
            None => format!("Modified contract ready for download: {}", url),
        };
        Self { url, message }
    }
}

/// アップロード成功時の結果
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub response: AnalysisResponse,
    pub download: Option<DownloadNotice>,
}

impl UploadOutcome {
    pub fn new(origin: &str, response: AnalysisResponse) -> Self {
        let download = response
            .modified_contract_download
            .as_deref()
            .filter(|link| !link.is_empty())
            .map(|link| {
                DownloadNotice::new(
                    resolve_download_url(origin, link),
                    response.modified_contract_filename.as_deref(),
                )
            });
        Self { response, download }
    }

    /// 修正版の保存ファイル名
    ///
    /// サーバーが返した名前 → URLの `filename` クエリ → 既定名 の順。
    pub fn download_file_name(&self) -> Option<String> {
        let notice = self.download.as_ref()?;
        if let Some(name) = self
            .response
            .modified_contract_filename
            .as_deref()
            .filter(|n| !n.is_empty())
        {
            return Some(sanitize_file_name(name));
        }
        let from_query = notice
            .url
            .split_once('?')
            .and_then(|(_, query)| {
                query
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("filename="))
            })
            .filter(|n| !n.is_empty())
            .map(sanitize_file_name);
        Some(from_query.unwrap_or_else(|| "contract_modified.docx".to_string()))
    }
}

/// パス区切りを含む名前を無害化する
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.is_empty() || base == ".." || base == "." {
        "contract_modified.docx".to_string()
    } else {
        base.to_string()
    }
}
