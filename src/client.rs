//! 解析バックエンドへのアップロードクライアント
//!
//! `POST {origin}/upload` に契約書を multipart (`file` フィールド) で送る。
//! リトライはしない。タイムアウトは設定値（既定120秒）。

use crate::error::{AnalyzerError, Result};
use contract_analyzer_common::{
    upload::{is_accepted_file, mime_type_for, UPLOAD_FIELD},
    parse_response, require_file, upload_url, DownloadNotice, Error, UploadOutcome,
};
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct BackendClient {
    client: reqwest::Client,
    origin: String,
    timeout: Duration,
}

impl BackendClient {
    /// `origin` は `http://127.0.0.1:5000` の形（末尾スラッシュ不要）
    pub fn new(origin: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// 契約書をアップロードして解析結果を受け取る
    ///
    /// ファイル未指定なら通信せずに失敗する。
    pub async fn submit(&self, file: Option<&Path>) -> Result<UploadOutcome> {
        let path = require_file(file)?;
        if !path.is_file() {
            return Err(AnalyzerError::FileNotFound(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if !is_accepted_file(&file_name) {
            warn!(file = %file_name, "not a PDF/DOCX file, sending anyway");
        }

        let bytes = tokio::fs::read(path).await?;
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime_type_for(&file_name))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = upload_url(&self.origin);
        info!(url = %url, file = %file_name, bytes = size, "uploading contract");

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = status.as_u16(), body_len = body.len(), "backend responded");

        if !status.is_success() {
            return Err(Error::from_failed_response(status.as_u16(), &body).into());
        }

        let is_object = serde_json::from_str::<serde_json::Value>(&body)
            .map(|v| v.is_object())
            .unwrap_or(false);
        if !is_object {
            warn!(status = status.as_u16(), "success body is not a JSON object, showing no results");
        }

        let response = parse_response(&body)?;
        info!(
            clauses = response.analysis.len(),
            total = response.total_clauses,
            missing = response.missing_clauses.len(),
            "analysis received"
        );
        Ok(UploadOutcome::new(&self.origin, response))
    }

    /// 修正版契約書を保存する
    pub async fn download(&self, notice: &DownloadNotice, dir: &Path, file_name: &str) -> Result<PathBuf> {
        info!(url = %notice.url, "downloading modified contract");

        let resp = self
            .client
            .get(&notice.url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalyzerError::Download(format!(
                "{} (status {})",
                notice.url,
                status.as_u16()
            )));
        }

        let bytes = resp.bytes().await?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(file_name);
        tokio::fs::write(&path, &bytes).await?;

        debug!(path = %path.display(), bytes = bytes.len(), "saved modified contract");
        Ok(path)
    }

    fn transport_error(&self, e: reqwest::Error) -> AnalyzerError {
        if e.is_timeout() {
            Error::Timeout(self.timeout.as_millis() as u64).into()
        } else {
            Error::transport(e.to_string()).into()
        }
    }
}
