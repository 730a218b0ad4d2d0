//! 解析結果表示の結合テスト

use contract_analyzer::report::{self, Expansion};
use contract_analyzer_common::{
    group_by, parse_response, Action, ChartKind, ColorMap, UploadOutcome, View, ViewState,
};

const TWO_CLAUSES: &str = r#"{
    "analysis": [
        {"clause": "c1", "phase1": {"predicted_clause_type": "Payment", "confidence": 0.9}},
        {"clause": "c2", "phase3": {"risk_level": "medium", "confidence": 0.4}}
    ],
    "total_clauses": 2,
    "missing_clauses": [["HIPAA", "Data Privacy Protection Right"], {"odd": true}]
}"#;

fn loaded_state(body: &str) -> ViewState {
    let mut state = ViewState::default();
    state.apply(Action::Started);
    state.apply(Action::Succeeded(UploadOutcome::new(
        "http://h:5000",
        parse_response(body).unwrap(),
    )));
    state
}

/// 2条項なら Phase 1 にカード2枚、グラフ合計2
#[test]
fn test_phase1_two_cards_chart_sums_to_two() {
    let state = loaded_state(TWO_CLAUSES);
    let out = report::render_phase(View::Phase1, &state, &mut ColorMap::new(), &Expansion::Collapsed);

    assert_eq!(out.matches("📄 Clause #").count(), 2);

    let buckets = group_by(&state.results, ChartKind::ClauseType);
    assert_eq!(buckets.iter().map(|b| b.value).sum::<usize>(), 2);
    // phase1 が無い条項は Unknown
    assert!(buckets.iter().any(|b| b.name == "Unknown" && b.value == 1));
    assert!(out.contains("Unknown"));
}

/// ホーム画面に完了バナーと欠落条項
#[test]
fn test_home_banner_and_missing_clauses() {
    let state = loaded_state(TWO_CLAUSES);
    let out = report::render_home(&state);

    assert!(out.contains("✅ Analysis Complete: 2 Clauses Found"));
    assert!(out.contains("Missing Clauses Detected"));
    assert!(out.contains("HIPAA: Data Privacy Protection Right"));
    assert!(out.contains(r#"{"odd":true}"#));
}

/// ビューをまたいでも同じキーは同じ色
#[test]
fn test_colors_stable_across_views() {
    let state = loaded_state(TWO_CLAUSES);
    let mut colors = ColorMap::new();

    let first = report::render(&View::ALL, &state, &mut colors, &Expansion::All);
    let second = report::render(&View::ALL, &state, &mut colors, &Expansion::All);
    assert_eq!(first, second);
}

/// 展開した条項だけ詳細が出る
#[test]
fn test_expand_single_card() {
    let state = loaded_state(TWO_CLAUSES);
    let out = report::render_phase(
        View::Phase2,
        &state,
        &mut ColorMap::new(),
        &Expansion::from_args(vec![2], false),
    );

    assert!(out.contains("▼ 📄 Clause #1"));
    assert!(out.contains("▲ 📄 Clause #2"));
    assert!(out.contains("Risk Level: MEDIUM"));
    assert!(out.contains("Justification: No justification available."));
    assert!(!out.contains("Original Text: c1"));
}
