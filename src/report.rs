//! 解析結果のターミナル表示
//!
//! Web版の各画面（Home / Phase 1 / Phase 2）と同じ内容を文字列で組み立てる。
//! カードは既定で閉じており、`--expand` で指定した条項だけ詳細を出す。

use contract_analyzer_common::{
    display::{
        card_title, completion_banner, ClassificationCard, RiskCard, EMPTY_MESSAGE,
        LOADING_MESSAGE, MISSING_CLAUSES_HEADING, MODIFIED_CONTRACT_HEADING, NO_RESULTS_MESSAGE,
    },
    group_by, ChartBucket, ColorMap, Status, View, ViewState,
};
use std::fmt::Write;
use tracing::debug;

/// 棒グラフの最大幅（文字数）
const BAR_WIDTH: usize = 30;

/// どのカードを開くか
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expansion {
    #[default]
    Collapsed,
    /// 1始まりの条項番号
    Only(Vec<usize>),
    All,
}

impl Expansion {
    pub fn from_args(expand: Vec<usize>, expand_all: bool) -> Self {
        if expand_all {
            Expansion::All
        } else if expand.is_empty() {
            Expansion::Collapsed
        } else {
            Expansion::Only(expand)
        }
    }

    /// `index` は0始まり
    pub fn is_open(&self, index: usize) -> bool {
        match self {
            Expansion::Collapsed => false,
            Expansion::Only(numbers) => numbers.contains(&(index + 1)),
            Expansion::All => true,
        }
    }
}

/// 指定した画面を順に描画する
pub fn render(views: &[View], state: &ViewState, colors: &mut ColorMap, expansion: &Expansion) -> String {
    views
        .iter()
        .map(|view| match view {
            View::Home => render_home(state),
            page => render_phase(*page, state, colors, expansion),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_home(state: &ViewState) -> String {
    let mut out = String::new();
    heading(&mut out, View::Home);

    let status = match state.status() {
        Status::Loading => LOADING_MESSAGE.to_string(),
        Status::Failed(message) => format!("❌ {}", message),
        Status::Complete(total) => completion_banner(total),
        Status::Empty => EMPTY_MESSAGE.to_string(),
    };
    let _ = writeln!(out, "{}", status);

    if !state.missing_clauses.is_empty() {
        let _ = writeln!(out, "\n⚠ {}", MISSING_CLAUSES_HEADING);
        for missing in &state.missing_clauses {
            let _ = writeln!(out, "  - {}", missing);
        }
    }

    if let Some(notice) = &state.download {
        let _ = writeln!(out, "\n📝 {}", MODIFIED_CONTRACT_HEADING);
        let _ = writeln!(out, "  {}", notice.message);
        let _ = writeln!(out, "  {}", notice.url);
    }

    out
}

pub fn render_phase(page: View, state: &ViewState, colors: &mut ColorMap, expansion: &Expansion) -> String {
    let mut out = String::new();
    heading(&mut out, page);

    let Some(kind) = page.chart_kind() else {
        return out;
    };

    if !state.has_results() {
        let _ = writeln!(out, "{}", NO_RESULTS_MESSAGE);
        return out;
    }

    let buckets = group_by(&state.results, kind);
    debug!(view = %page, field = kind.field_path(), buckets = buckets.len(), "rendering chart");
    let swatches = colors.assign(&buckets);
    out.push_str(&render_chart(&buckets, &swatches));
    out.push('\n');

    for (index, result) in state.results.iter().enumerate() {
        let open = expansion.is_open(index);
        let _ = writeln!(out, "{} {}", if open { "▲" } else { "▼" }, card_title(index));
        if !open {
            continue;
        }
        match page {
            View::Phase2 => write_risk_card(&mut out, &RiskCard::new(result)),
            _ => write_classification_card(&mut out, &ClassificationCard::new(result)),
        }
    }

    out
}

/// 件数の棒グラフと凡例（色はWeb版と同じパレット）
pub fn render_chart(buckets: &[ChartBucket], colors: &[&str]) -> String {
    let total: usize = buckets.iter().map(|b| b.value).sum();
    let labels: Vec<String> = buckets
        .iter()
        .map(|b| format!("{} ({})", b.name, b.value))
        .collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();

    for ((bucket, label), color) in buckets.iter().zip(&labels).zip(colors) {
        let fraction = if total == 0 { 0.0 } else { bucket.value as f64 / total as f64 };
        let bar = "█".repeat(((fraction * BAR_WIDTH as f64).round() as usize).max(1));
        let _ = writeln!(
            out,
            "  {} {:<width$}  {:<bar_width$}  {:.1}%",
            color,
            label,
            bar,
            fraction * 100.0,
            width = label_width,
            bar_width = BAR_WIDTH,
        );
    }

    out
}

fn heading(out: &mut String, view: View) {
    let title = view.heading();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn write_classification_card(out: &mut String, card: &ClassificationCard) {
    let _ = writeln!(out, "    Original Text: {}", card.clause);
    let _ = writeln!(
        out,
        "    Predicted Clause Type: {} (Confidence: {})",
        card.clause_type, card.confidence
    );
}

fn write_risk_card(out: &mut String, card: &RiskCard) {
    let _ = writeln!(out, "    Original Text: {}", card.clause);
    let _ = writeln!(out, "    Risk Level: {}", card.risk_level);
    let _ = writeln!(out, "    Model Confidence: {}", card.confidence);
    let _ = writeln!(out, "    Justification: {}", card.justification);
    if let Some(words) = &card.top_words {
        let _ = writeln!(out, "    Top Contributing Words: {}", words);
    }
    if let Some(info) = &card.extra_info {
        let _ = writeln!(out, "    Extra Info: {}", info);
    }
}
