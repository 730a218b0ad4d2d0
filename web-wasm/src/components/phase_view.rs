//! Phase1 / Phase2 結果画面

use super::clause_card::ClauseCard;
use super::pie_chart::{ChartLegend, PieChart};
use contract_analyzer_common::{
    display::NO_RESULTS_MESSAGE, group_by, ChartKind, ColorMap, View, ViewState,
};
use leptos::prelude::*;

#[component]
pub fn PhaseView(
    page: View,
    kind: ChartKind,
    state: RwSignal<ViewState>,
    colors: StoredValue<ColorMap>,
) -> impl IntoView {
    // 描画のたびに現在の結果から集計し直す
    let buckets = Memo::new(move |_| state.with(|s| group_by(&s.results, kind)));

    let chart = move || {
        let buckets = buckets.get();
        let mut palette = Vec::new();
        colors.update_value(|map| palette = map.assign(&buckets));
        view! {
            <div class="d-flex justify-content-center mb-5 flex-wrap gap-4">
                <PieChart buckets=buckets.clone() colors=palette.clone() />
                <ChartLegend buckets=buckets colors=palette />
            </div>
        }
    };

    let cards = move || {
        state.with(|s| {
            s.results
                .iter()
                .enumerate()
                .map(|(index, result)| {
                    view! {
                        <div class="col-md-6">
                            <ClauseCard index=index result=result.clone() page=page />
                        </div>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="mt-4">
            <h2 class="text-center text-primary fw-bold mb-4">{page.heading()}</h2>
            <Show
                when=move || state.with(ViewState::has_results)
                fallback=|| view! { <p class="text-center text-muted">{NO_RESULTS_MESSAGE}</p> }
            >
                {chart}
                <div class="row g-4">{cards}</div>
            </Show>
        </div>
    }
}
