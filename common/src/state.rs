//! 画面状態と状態遷移
//!
//! 結果・件数・読込中フラグ・エラーを1つの ViewState にまとめ、
//! 変更は必ず `apply` を通す。遷移は idle → loading → (success | error) で、
//! どの終端からでも再送信できる。

use crate::types::{AnalysisResponse, ClauseResult, MissingClause};
use crate::upload::{DownloadNotice, UploadOutcome};

/// 状態遷移のきっかけ
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// ファイルを選び直した
    FileSelected,
    /// 送信前に弾かれた（ファイル未選択など）
    Rejected(String),
    /// リクエスト開始
    Started,
    /// 成功レスポンス受信
    Succeeded(UploadOutcome),
    /// 失敗
    Failed(String),
}

/// 画面全体で共有する状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub results: Vec<ClauseResult>,
    pub total_clauses: usize,
    pub missing_clauses: Vec<MissingClause>,
    pub download: Option<DownloadNotice>,
    pub loading: bool,
    pub error: Option<String>,
}

/// ホーム画面に出す状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Failed(String),
    /// 解析完了（件数）
    Complete(usize),
    Empty,
}

impl ViewState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::FileSelected => {
                self.missing_clauses.clear();
                self.download = None;
                self.error = None;
            }
            Action::Rejected(message) => {
                self.error = Some(message);
            }
            Action::Started => {
                *self = ViewState {
                    loading: true,
                    ..ViewState::default()
                };
            }
            Action::Succeeded(outcome) => {
                let AnalysisResponse {
                    analysis,
                    total_clauses,
                    missing_clauses,
                    ..
                } = outcome.response;
                *self = ViewState {
                    results: analysis,
                    total_clauses,
                    missing_clauses,
                    download: outcome.download,
                    loading: false,
                    error: None,
                };
            }
            Action::Failed(message) => {
                *self = ViewState {
                    error: Some(message),
                    ..ViewState::default()
                };
            }
        }
    }

    pub fn status(&self) -> Status {
        if self.loading {
            Status::Loading
        } else if let Some(error) = &self.error {
            Status::Failed(error.clone())
        } else if !self.results.is_empty() {
            Status::Complete(self.total_clauses)
        } else {
            Status::Empty
        }
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::parse_response;

    fn outcome(body: &str) -> UploadOutcome {
        UploadOutcome::new("http://h:5000", parse_response(body).unwrap())
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = ViewState::default();
        assert_eq!(state.status(), Status::Empty);
        assert!(!state.has_results());
    }

    #[test]
    fn test_started_clears_previous_results() {
        let mut state = ViewState::default();
        state.apply(Action::Succeeded(outcome(
            r#"{"analysis": [{"clause": "a"}], "total_clauses": 1, "missing_clauses": [["HIPAA", "x"]]}"#,
        )));
        assert_eq!(state.status(), Status::Complete(1));

        state.apply(Action::Started);
        assert_eq!(state.status(), Status::Loading);
        assert!(state.results.is_empty());
        assert_eq!(state.total_clauses, 0);
        assert!(state.missing_clauses.is_empty());
    }

    #[test]
    fn test_success_replaces_state() {
        let mut state = ViewState::default();
        state.apply(Action::Started);
        state.apply(Action::Succeeded(outcome(
            r#"{
                "analysis": [{"clause": "a"}, {"clause": "b"}],
                "total_clauses": 2,
                "modified_contract_download": "/download_modified?filename=x.docx"
            }"#,
        )));

        assert_eq!(state.status(), Status::Complete(2));
        assert_eq!(state.results.len(), 2);
        assert!(!state.loading);
        assert_eq!(
            state.download.as_ref().map(|d| d.url.as_str()),
            Some("http://h:5000/download_modified?filename=x.docx")
        );
    }

    #[test]
    fn test_success_without_clauses_is_empty() {
        let mut state = ViewState::default();
        state.apply(Action::Started);
        state.apply(Action::Succeeded(outcome(r#"{"total_clauses": "n/a"}"#)));
        assert_eq!(state.status(), Status::Empty);
        assert_eq!(state.total_clauses, 0);
    }

    #[test]
    fn test_failure_leaves_results_empty() {
        let mut state = ViewState::default();
        state.apply(Action::Started);
        state.apply(Action::Failed("Invalid file type".into()));
        assert_eq!(state.status(), Status::Failed("Invalid file type".into()));
        assert!(state.results.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_rejected_keeps_previous_results() {
        let mut state = ViewState::default();
        state.apply(Action::Succeeded(outcome(r#"{"analysis": [{"clause": "a"}], "total_clauses": 1}"#)));
        state.apply(Action::Rejected("Please select a PDF or DOCX file to upload.".into()));
        assert_eq!(state.results.len(), 1);
        assert!(matches!(state.status(), Status::Failed(_)));
    }

    #[test]
    fn test_file_selected_clears_error() {
        let mut state = ViewState::default();
        state.apply(Action::Failed("boom".into()));
        state.apply(Action::FileSelected);
        assert_eq!(state.error, None);
        assert_eq!(state.status(), Status::Empty);
    }

    #[test]
    fn test_resubmit_after_failure() {
        let mut state = ViewState::default();
        state.apply(Action::Failed("timeout of 120000ms exceeded".into()));
        state.apply(Action::Started);
        assert_eq!(state.error, None);
        assert_eq!(state.status(), Status::Loading);
    }
}
