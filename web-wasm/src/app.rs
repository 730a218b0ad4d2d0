//! メインアプリケーションコンポーネント

use crate::components::{home_view::HomeView, navbar::Navbar, phase_view::PhaseView};
use contract_analyzer_common::{ChartKind, ColorMap, View, ViewState};
use leptos::prelude::*;

/// URLハッシュから現在のビューを決める（`#/phase1` など）
fn current_view() -> View {
    let hash = window().location().hash().unwrap_or_default();
    View::from_path(&hash)
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態（更新は ViewState::apply 経由のみ）
    let state = RwSignal::new(ViewState::default());
    let (page, set_page) = signal(current_view());
    // キー → 色の対応はアプリ全体で共有（ビューをまたいでも同じ色）
    let colors = StoredValue::new(ColorMap::new());

    // リンククリック・戻る/進むの両方に追従
    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        set_page.set(current_view());
    });

    view! {
        <Navbar current=page />
        <main class="py-5 bg-light min-vh-100">
            <div class="container">
                {move || match page.get() {
                    View::Home => view! { <HomeView state=state /> }.into_any(),
                    View::Phase1 => view! {
                        <PhaseView page=View::Phase1 kind=ChartKind::ClauseType state=state colors=colors />
                    }
                    .into_any(),
                    View::Phase2 => view! {
                        <PhaseView page=View::Phase2 kind=ChartKind::RiskLevel state=state colors=colors />
                    }
                    .into_any(),
                }}
            </div>
        </main>
    }
}
