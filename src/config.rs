use crate::error::{AnalyzerError, Result};
use contract_analyzer_common::{upload::normalize_origin, DEFAULT_BACKEND_ORIGIN, UPLOAD_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// バックエンドのオリジンを上書きする環境変数
pub const BACKEND_ENV: &str = "CONTRACT_ANALYZER_BACKEND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_origin: String,
    pub timeout_seconds: u64,
    /// 修正版契約書の保存先（未設定ならカレント）
    pub download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_origin: DEFAULT_BACKEND_ORIGIN.into(),
            timeout_seconds: UPLOAD_TIMEOUT_SECS,
            download_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AnalyzerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("contract-analyzer").join("config.json"))
    }

    /// 実際に使うオリジン
    ///
    /// 優先順位: `--backend` → 環境変数 → 設定ファイル
    pub fn resolve_origin(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(BACKEND_ENV).ok();
        let origin = flag
            .or(env.as_deref())
            .unwrap_or(&self.backend_origin);
        normalize_origin(origin).map_err(|e| AnalyzerError::Config(e.to_string()))
    }

    pub fn set_backend(&mut self, origin: &str) -> Result<()> {
        self.backend_origin =
            normalize_origin(origin).map_err(|e| AnalyzerError::Config(e.to_string()))?;
        self.save()
    }
}
