use crate::error::{AnalyzerError, Result};
use contract_analyzer_common::upload::is_accepted_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

/// フォルダ直下の契約書（PDF/DOCX）を列挙する
pub fn scan_documents(folder: &Path) -> Result<Vec<DocumentInfo>> {
    if !folder.exists() {
        return Err(AnalyzerError::FolderNotFound(folder.display().to_string()));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if is_accepted_file(&file_name) {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            documents.push(DocumentInfo {
                path: path.to_path_buf(),
                file_name,
                size,
            });
        }
    }

    // ファイル名でソート
    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(documents)
}
