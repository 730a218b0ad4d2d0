//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ClauseResult: 条項ごとの解析結果（phase1: 分類, phase3: リスク）
//! - AnalysisResponse: バックエンド `/upload` のレスポンス全体
//! - MissingClause: 欠落している必須条項
//!
//! バックエンドのJSONは信用しない。欠けたフィールドや型違いは
//! エラーにせず既定値へ落とす。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Phase1: 条項タイプ分類
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase1 {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub predicted_clause_type: Option<String>,

    #[serde(deserialize_with = "lenient::opt_f64")]
    pub confidence: Option<f64>,
}

/// Phase3: リスク判定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase3 {
    #[serde(deserialize_with = "lenient::opt_risk")]
    pub risk_level: Option<RiskLevel>,

    #[serde(deserialize_with = "lenient::opt_f64")]
    pub confidence: Option<f64>,

    #[serde(deserialize_with = "lenient::opt_string")]
    pub justification: Option<String>,

    #[serde(deserialize_with = "lenient::string_vec")]
    pub top_words: Vec<String>,

    #[serde(deserialize_with = "lenient::opt_string")]
    pub extra_info: Option<String>,
}

/// リスクレベル
///
/// 大文字小文字は区別しない。未知のラベルは `Unknown` に寄せる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl RiskLevel {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unknown,
        }
    }

    /// チャートのバケット名
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

impl From<String> for RiskLevel {
    fn from(label: String) -> Self {
        RiskLevel::parse(&label)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 条項ごとの解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseResult {
    #[serde(deserialize_with = "lenient::string")]
    pub clause: String,

    #[serde(deserialize_with = "lenient::opt_object")]
    pub phase1: Option<Phase1>,

    #[serde(deserialize_with = "lenient::opt_object")]
    pub phase3: Option<Phase3>,
}

impl ClauseResult {
    /// 予測された条項タイプ（空文字は未設定扱い）
    pub fn clause_type(&self) -> Option<&str> {
        self.phase1
            .as_ref()
            .and_then(|p| p.predicted_clause_type.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.phase3.as_ref().and_then(|p| p.risk_level)
    }
}

/// 欠落条項
///
/// バックエンドは `["HIPAA", "Data Privacy Protection Right"]` のような
/// 2要素配列を返す。それ以外の形はそのままJSONとして保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MissingClause {
    Pair { category: Value, description: Value },
    Raw(Value),
}

impl From<Value> for MissingClause {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(mut items) if items.len() == 2 => {
                let description = items.pop().unwrap_or(Value::Null);
                let category = items.pop().unwrap_or(Value::Null);
                MissingClause::Pair { category, description }
            }
            other => MissingClause::Raw(other),
        }
    }
}

impl From<MissingClause> for Value {
    fn from(clause: MissingClause) -> Self {
        match clause {
            MissingClause::Pair { category, description } => Value::Array(vec![category, description]),
            MissingClause::Raw(value) => value,
        }
    }
}

impl MissingClause {
    pub fn pair(category: &str, description: &str) -> Self {
        MissingClause::Pair {
            category: Value::String(category.to_string()),
            description: Value::String(description.to_string()),
        }
    }
}

impl fmt::Display for MissingClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingClause::Pair { category, description } => {
                write!(f, "{}: {}", plain_text(category), plain_text(description))
            }
            MissingClause::Raw(value) => f.write_str(&value.to_string()),
        }
    }
}

/// 文字列はそのまま、それ以外はJSONテキスト
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `/upload` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    #[serde(deserialize_with = "lenient::object_vec")]
    pub analysis: Vec<ClauseResult>,

    #[serde(deserialize_with = "lenient::count")]
    pub total_clauses: usize,

    #[serde(deserialize_with = "lenient::value_vec")]
    pub missing_clauses: Vec<MissingClause>,

    #[serde(deserialize_with = "lenient::opt_string")]
    pub modified_contract_download: Option<String>,

    #[serde(deserialize_with = "lenient::opt_string")]
    pub modified_contract_filename: Option<String>,
}

/// 型違いを既定値に落とすデシリアライザ群
mod lenient {
    use super::*;
    use serde::de::DeserializeOwned;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Value::deserialize(d)?.as_f64())
    }

    pub fn opt_risk<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RiskLevel>, D::Error> {
        Ok(opt_string(d)?.map(RiskLevel::from))
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
        let value = Value::deserialize(d)?;
        let count = value
            .as_u64()
            .or_else(|| value.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
            .unwrap_or(0);
        Ok(count as usize)
    }

    pub fn string_vec<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn opt_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }

    /// オブジェクト以外の要素は捨てる
    pub fn object_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn value_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<Value>,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().map(T::from).collect(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clause_result_deserialize_full() {
        let json = json!({
            "clause": "1. The Supplier shall deliver...",
            "phase1": { "predicted_clause_type": "Delivery", "confidence": 0.912 },
            "phase3": {
                "risk_level": "high",
                "confidence": 0.77,
                "justification": "allows transfer of rights without restrictions (increases risk)",
                "top_words": ["assignment", "party"],
                "extra_info": "see clause 4"
            }
        });

        let result: ClauseResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.clause_type(), Some("Delivery"));
        assert_eq!(result.risk_level(), Some(RiskLevel::High));
        let phase3 = result.phase3.unwrap();
        assert_eq!(phase3.top_words, vec!["assignment", "party"]);
        assert_eq!(phase3.extra_info.as_deref(), Some("see clause 4"));
    }

    #[test]
    fn test_clause_result_missing_phases() {
        let result: ClauseResult = serde_json::from_value(json!({ "clause": "text" })).unwrap();
        assert_eq!(result.clause, "text");
        assert!(result.phase1.is_none());
        assert!(result.phase3.is_none());
        assert_eq!(result.clause_type(), None);
        assert_eq!(result.risk_level(), None);
    }

    #[test]
    fn test_clause_result_wrong_types_degrade() {
        let result: ClauseResult = serde_json::from_value(json!({
            "clause": 42,
            "phase1": "not an object",
            "phase3": { "risk_level": 3, "confidence": "high", "top_words": "x" }
        }))
        .unwrap();

        assert_eq!(result.clause, "");
        assert!(result.phase1.is_none());
        let phase3 = result.phase3.unwrap();
        assert_eq!(phase3.risk_level, None);
        assert_eq!(phase3.confidence, None);
        assert!(phase3.top_words.is_empty());
    }

    #[test]
    fn test_empty_clause_type_is_none() {
        let result: ClauseResult = serde_json::from_value(json!({
            "clause": "c",
            "phase1": { "predicted_clause_type": "", "confidence": 0.5 }
        }))
        .unwrap();
        assert_eq!(result.clause_type(), None);
    }

    #[test]
    fn test_risk_level_parse() {
        assert_eq!(RiskLevel::parse("low"), RiskLevel::Low);
        assert_eq!(RiskLevel::parse("Medium"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse(" HIGH "), RiskLevel::High);
        assert_eq!(RiskLevel::parse("Unknown"), RiskLevel::Unknown);
        assert_eq!(RiskLevel::parse("catastrophic"), RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_level_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Unknown).unwrap(), "\"unknown\"");
    }

    #[test]
    fn test_response_missing_analysis_is_empty() {
        let response: AnalysisResponse = serde_json::from_value(json!({ "total_clauses": 3 })).unwrap();
        assert!(response.analysis.is_empty());
        assert_eq!(response.total_clauses, 3);
        assert!(response.missing_clauses.is_empty());
        assert!(response.modified_contract_download.is_none());
    }

    #[test]
    fn test_response_null_analysis_is_empty() {
        let response: AnalysisResponse =
            serde_json::from_value(json!({ "analysis": null, "missing_clauses": null })).unwrap();
        assert!(response.analysis.is_empty());
        assert!(response.missing_clauses.is_empty());
    }

    #[test]
    fn test_response_non_numeric_total_is_zero() {
        let response: AnalysisResponse =
            serde_json::from_value(json!({ "analysis": [], "total_clauses": "many" })).unwrap();
        assert_eq!(response.total_clauses, 0);

        let response: AnalysisResponse =
            serde_json::from_value(json!({ "total_clauses": -4 })).unwrap();
        assert_eq!(response.total_clauses, 0);
    }

    #[test]
    fn test_response_skips_non_object_clauses() {
        let response: AnalysisResponse = serde_json::from_value(json!({
            "analysis": [{ "clause": "a" }, "junk", 7, { "clause": "b" }]
        }))
        .unwrap();
        let clauses: Vec<&str> = response.analysis.iter().map(|c| c.clause.as_str()).collect();
        assert_eq!(clauses, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_clause_pair_display() {
        let response: AnalysisResponse = serde_json::from_value(json!({
            "missing_clauses": [
                ["HIPAA", "Data Privacy Protection Right"],
                ["GDPR", "GDPR Data Protection Clause"]
            ]
        }))
        .unwrap();

        let lines: Vec<String> = response.missing_clauses.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "HIPAA: Data Privacy Protection Right",
                "GDPR: GDPR Data Protection Clause",
            ]
        );
    }

    #[test]
    fn test_missing_clause_raw_display() {
        let response: AnalysisResponse = serde_json::from_value(json!({
            "missing_clauses": [
                { "regime": "GDPR" },
                ["only-one"],
                ["a", "b", "c"],
                "plain"
            ]
        }))
        .unwrap();

        let lines: Vec<String> = response.missing_clauses.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                r#"{"regime":"GDPR"}"#,
                r#"["only-one"]"#,
                r#"["a","b","c"]"#,
                r#""plain""#,
            ]
        );
    }

    #[test]
    fn test_missing_clause_roundtrip_shape() {
        let clause = MissingClause::pair("HIPAA", "Data Privacy Protection Right");
        let json = serde_json::to_string(&clause).unwrap();
        assert_eq!(json, r#"["HIPAA","Data Privacy Protection Right"]"#);
    }
}
