//! 条項カードコンポーネント（クリックで開閉）

use contract_analyzer_common::{
    display::{card_title, ClassificationCard, RiskCard},
    ClauseResult, View,
};
use leptos::prelude::*;

/// カード本文の中身
#[derive(Clone)]
enum CardDetail {
    Classification(ClassificationCard),
    Risk(RiskCard),
}

#[component]
pub fn ClauseCard(index: usize, result: ClauseResult, page: View) -> impl IntoView {
    // カードごとに独立、初期状態は閉
    let (open, set_open) = signal(false);

    let detail = match page {
        View::Phase2 => CardDetail::Risk(RiskCard::new(&result)),
        _ => CardDetail::Classification(ClassificationCard::new(&result)),
    };

    view! {
        <div class="card shadow-sm h-100 mb-3">
            <div
                class="card-header d-flex justify-content-between align-items-center bg-primary text-white clickable"
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                <span>{card_title(index)}</span>
                <small>{move || if open.get() { "▲ Hide" } else { "▼ Show" }}</small>
            </div>
            {move || open.get().then(|| render_detail(&detail))}
        </div>
    }
}

fn render_detail(detail: &CardDetail) -> AnyView {
    match detail {
        CardDetail::Classification(card) => view! {
            <div class="card-body">
                <div class="mb-3">
                    <strong>"Original Text:"</strong>
                    <p class="text-muted mt-1">{card.clause.clone()}</p>
                </div>
                <div class="alert alert-info py-2">
                    <strong>"Predicted Clause Type:"</strong>
                    " "{card.clause_type.clone()}" "
                    <span class="text-muted">{format!("(Confidence: {})", card.confidence)}</span>
                </div>
            </div>
        }
        .into_any(),
        CardDetail::Risk(card) => view! {
            <div class="card-body">
                <div class="mb-3">
                    <strong>"Original Text:"</strong>
                    <p class="text-muted mt-1">{card.clause.clone()}</p>
                </div>
                <div class=format!("alert py-3 {}", card.severity.alert_class())>
                    <h6 class="fw-bold mb-2">"Risk Analysis"</h6>
                    <p>
                        <strong>"Risk Level:"</strong>" "
                        <span class="text-uppercase">{card.risk_level.clone()}</span>
                    </p>
                    <p>
                        <strong>"Model Confidence:"</strong>" "{card.confidence.clone()}
                    </p>
                    <p>
                        <strong>"Justification:"</strong>" "{card.justification.clone()}
                    </p>
                    {card.top_words.clone().map(|words| view! {
                        <p><strong>"Top Contributing Words:"</strong>" "{words}</p>
                    })}
                    {card.extra_info.clone().map(|info| view! {
                        <p><strong>"Extra Info:"</strong>" "{info}</p>
                    })}
                </div>
            </div>
        }
        .into_any(),
    }
}
