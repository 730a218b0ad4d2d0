//! 契約書ファイルの対話式選択

use crate::error::{AnalyzerError, Result};
use crate::scanner::DocumentInfo;
use dialoguer::{theme::ColorfulTheme, Select};
use std::path::PathBuf;

/// 一覧に出す表示名
fn document_label(doc: &DocumentInfo) -> String {
    format!("{} ({} KB)", doc.file_name, doc.size.div_ceil(1024))
}

/// スキャン結果から1件選ばせる
///
/// 候補なし・Esc でキャンセルした場合は `None`。
pub fn select_document(documents: &[DocumentInfo]) -> Result<Option<PathBuf>> {
    if documents.is_empty() {
        println!("⚠ PDF/DOCX ファイルが見つかりません");
        return Ok(None);
    }

    let items: Vec<String> = documents.iter().map(document_label).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("📋 解析する契約書を選択してください")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| AnalyzerError::Prompt(e.to_string()))?;

    Ok(selection.map(|i| documents[i].path.clone()))
}
