//! Contract Analyzer Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod chart;
pub mod upload;
pub mod state;
pub mod display;
pub mod view;

pub use types::{AnalysisResponse, ClauseResult, MissingClause, Phase1, Phase3, RiskLevel};
pub use error::{Error, Result};
pub use chart::{group_by, pie_slices, ChartBucket, ChartKind, ColorMap, PieSlice};
pub use upload::{
    parse_response, require_file, resolve_download_url, upload_url, DownloadNotice,
    UploadOutcome, DEFAULT_BACKEND_ORIGIN, UPLOAD_TIMEOUT_SECS,
};
pub use state::{Action, Status, ViewState};
pub use view::View;
