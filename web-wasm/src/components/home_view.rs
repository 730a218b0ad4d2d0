//! ホーム画面（アップロード + 状態表示）

use super::upload_form::UploadForm;
use contract_analyzer_common::{
    display::{completion_banner, EMPTY_MESSAGE, LOADING_MESSAGE},
    Status, View, ViewState,
};
use leptos::prelude::*;

#[component]
pub fn HomeView(state: RwSignal<ViewState>) -> impl IntoView {
    view! {
        <div class="text-center">
            <h2 class="fw-bold text-primary mb-3">{View::Home.heading()}</h2>
            <p class="text-muted mb-4">"Our AI analyzes your contract in 2 intelligent phases."</p>

            <div class="card shadow-sm mx-auto upload-card">
                <div class="card-body">
                    <UploadForm state=state />
                </div>
            </div>

            {move || match state.with(ViewState::status) {
                Status::Loading => view! {
                    <div class="text-muted mt-4">{LOADING_MESSAGE}</div>
                }.into_any(),
                Status::Failed(message) => view! {
                    <div class="alert alert-danger mt-4 w-75 mx-auto">{message}</div>
                }.into_any(),
                Status::Complete(total) => view! {
                    <div class="alert alert-success mt-4 w-75 mx-auto fw-semibold">
                        {completion_banner(total)}
                    </div>
                }.into_any(),
                Status::Empty => view! {
                    <div class="text-muted mt-4">{EMPTY_MESSAGE}</div>
                }.into_any(),
            }}
        </div>
    }
}
