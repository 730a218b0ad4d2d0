//! 表示用の文言・書式（CLI/WASM共通）

use crate::types::{ClauseResult, RiskLevel};

pub const NOT_AVAILABLE: &str = "N/A";
pub const LOADING_MESSAGE: &str = "🔍 Analyzing document...";
pub const EMPTY_MESSAGE: &str = "No clauses found or analysis failed.";
pub const NO_RESULTS_MESSAGE: &str = "No analysis results yet. Please upload a document first.";
pub const NO_JUSTIFICATION: &str = "No justification available.";
pub const MISSING_CLAUSES_HEADING: &str = "Missing Clauses Detected";
pub const MODIFIED_CONTRACT_HEADING: &str = "Modified Contract";

pub fn completion_banner(total_clauses: usize) -> String {
    format!("✅ Analysis Complete: {} Clauses Found", total_clauses)
}

pub fn card_title(index: usize) -> String {
    format!("📄 Clause #{}", index + 1)
}

/// 信頼度をパーセント表示（小数1桁）
///
/// 値が無い場合は 0% ではなく N/A を返す。
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence.filter(|c| c.is_finite()) {
        Some(c) => format!("{:.1}%", c * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// リスクの深刻度（カードの色分け）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Danger,
    Warning,
    Success,
}

impl Severity {
    pub fn from_risk(risk: Option<RiskLevel>) -> Self {
        match risk {
            Some(RiskLevel::High) => Severity::Danger,
            Some(RiskLevel::Medium) => Severity::Warning,
            _ => Severity::Success,
        }
    }

    pub fn alert_class(&self) -> &'static str {
        match self {
            Severity::Danger => "alert-danger",
            Severity::Warning => "alert-warning",
            Severity::Success => "alert-success",
        }
    }
}

/// Phase1カードの内容
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationCard {
    pub clause: String,
    pub clause_type: String,
    pub confidence: String,
}

impl ClassificationCard {
    pub fn new(result: &ClauseResult) -> Self {
        Self {
            clause: result.clause.clone(),
            clause_type: result.clause_type().unwrap_or(NOT_AVAILABLE).to_string(),
            confidence: format_confidence(result.phase1.as_ref().and_then(|p| p.confidence)),
        }
    }
}

/// Phase2カードの内容
#[derive(Debug, Clone, PartialEq)]
pub struct RiskCard {
    pub clause: String,
    pub risk_level: String,
    pub severity: Severity,
    pub confidence: String,
    pub justification: String,
    /// 空なら表示しない
    pub top_words: Option<String>,
    pub extra_info: Option<String>,
}

impl RiskCard {
    pub fn new(result: &ClauseResult) -> Self {
        let phase3 = result.phase3.as_ref();
        let risk = result.risk_level();

        Self {
            clause: result.clause.clone(),
            risk_level: risk
                .map(|r| r.label().to_uppercase())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            severity: Severity::from_risk(risk),
            confidence: format_confidence(phase3.and_then(|p| p.confidence)),
            justification: phase3
                .and_then(|p| p.justification.clone())
                .filter(|j| !j.is_empty())
                .unwrap_or_else(|| NO_JUSTIFICATION.to_string()),
            top_words: phase3
                .map(|p| p.top_words.join(", "))
                .filter(|w| !w.is_empty()),
            extra_info: phase3
                .and_then(|p| p.extra_info.clone())
                .filter(|e| !e.is_empty()),
        }
    }
}
