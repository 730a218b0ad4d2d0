//! アップロードフォームコンポーネント

use crate::api::backend::{backend_origin, open_in_new_tab, upload_contract};
use contract_analyzer_common::{
    display::{MISSING_CLAUSES_HEADING, MODIFIED_CONTRACT_HEADING},
    upload::ACCEPT_ATTRIBUTE,
    require_file, Action, ViewState,
};
use leptos::ev::{Event, SubmitEvent};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;
use web_sys::File;

#[component]
pub fn UploadForm(state: RwSignal<ViewState>) -> impl IntoView {
    let input_ref: NodeRef<Input> = NodeRef::new();
    let (file_name, set_file_name) = signal(None::<String>);
    let origin = backend_origin();

    let selected_file = move || -> Option<File> {
        input_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    };

    let on_change = move |_: Event| {
        set_file_name.set(selected_file().map(|f| f.name()));
        state.update(|s| s.apply(Action::FileSelected));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        // ファイル未選択なら通信しない
        let file = match require_file(selected_file()) {
            Ok(file) => file,
            Err(e) => {
                state.update(|s| s.apply(Action::Rejected(e.to_string())));
                return;
            }
        };

        state.update(|s| s.apply(Action::Started));

        let origin = origin.clone();
        spawn_local(async move {
            let action = match upload_contract(&origin, &file).await {
                Ok(outcome) => {
                    if let Some(notice) = &outcome.download {
                        open_in_new_tab(&notice.url);
                    }
                    Action::Succeeded(outcome)
                }
                Err(e) => {
                    web_sys::console::error_1(&JsValue::from_str(&format!("Upload error: {}", e)));
                    Action::Failed(e.to_string())
                }
            };
            state.update(|s| s.apply(action));
        });
    };

    let has_file = move || file_name.get().is_some();

    view! {
        <div class="upload-form">
            <form on:submit=on_submit class="d-flex flex-column gap-3">
                <input
                    type="file"
                    accept=ACCEPT_ATTRIBUTE
                    class="form-control"
                    node_ref=input_ref
                    on:change=on_change
                />
                <button
                    type="submit"
                    class=move || if has_file() { "btn btn-primary" } else { "btn btn-secondary" }
                    disabled=move || !has_file()
                >
                    {move || if has_file() { "Upload & Analyze" } else { "Choose a file first" }}
                </button>
            </form>

            {move || state.with(|s| {
                (!s.missing_clauses.is_empty()).then(|| {
                    let items = s
                        .missing_clauses
                        .iter()
                        .map(|m| view! { <li>{m.to_string()}</li> })
                        .collect_view();
                    view! {
                        <div class="mt-3 alert alert-warning">
                            <h5>{MISSING_CLAUSES_HEADING}</h5>
                            <ul>{items}</ul>
                        </div>
                    }
                })
            })}

            {move || state.with(|s| {
                s.download.clone().map(|notice| {
                    view! {
                        <div class="mt-3 alert alert-success">
                            <h5>{MODIFIED_CONTRACT_HEADING}</h5>
                            <p>{notice.message}</p>
                            <p>
                                "The modified contract (DOCX) should have opened in a new tab for download. "
                                <a href=notice.url target="_blank" rel="noopener noreferrer">
                                    "Open it again"
                                </a>
                            </p>
                        </div>
                    }
                })
            })}
        </div>
    }
}
