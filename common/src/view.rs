//! 画面（ビュー）定義
//!
//! Web版はパス（`#/phase1` など）、CLI版は `--view` で切り替える。
//! `Display` はログ用の短い名前。

use crate::chart::ChartKind;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    Phase1,
    Phase2,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Phase1, View::Phase2];

    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Phase1 => "/phase1",
            View::Phase2 => "/phase2",
        }
    }

    /// パスからビューを決める。未知のパスはHome
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#').trim_end_matches('/');
        match path.trim_start_matches('/') {
            "phase1" => View::Phase1,
            "phase2" => View::Phase2,
            _ => View::Home,
        }
    }

    /// ナビゲーションの表示名
    pub fn nav_label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Phase1 => "Phase 1",
            View::Phase2 => "Phase 2",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            View::Home => "Upload Your Contract for Smart Analysis",
            View::Phase1 => "Phase 1 - Clause Type Classification",
            View::Phase2 => "Phase 2 - Clause Risk & Analysis",
        }
    }

    /// 円グラフの種別（Homeはグラフなし）
    pub fn chart_kind(&self) -> Option<ChartKind> {
        match self {
            View::Home => None,
            View::Phase1 => Some(ChartKind::ClauseType),
            View::Phase2 => Some(ChartKind::RiskLevel),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Home => write!(f, "home"),
            View::Phase1 => write!(f, "phase1"),
            View::Phase2 => write!(f, "phase2"),
        }
    }
}
