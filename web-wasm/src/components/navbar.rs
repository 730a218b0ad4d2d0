//! ナビゲーションバーコンポーネント

use contract_analyzer_common::View;
use leptos::prelude::*;

#[component]
pub fn Navbar(current: ReadSignal<View>) -> impl IntoView {
    view! {
        <nav class="navbar navbar-expand-lg navbar-dark bg-primary sticky-top shadow">
            <div class="container">
                <a class="navbar-brand fw-bold" href="#/">"📜 Legal Compliance Analyzer"</a>
                <ul class="navbar-nav ms-auto">
                    {View::ALL
                        .into_iter()
                        .map(|page| {
                            view! {
                                <li class="nav-item">
                                    <a
                                        class="nav-link"
                                        class:active=move || current.get() == page
                                        href=format!("#{}", page.path())
                                    >
                                        {page.nav_label()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </nav>
    }
}
