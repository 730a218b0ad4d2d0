//! 解析バックエンド連携
//!
//! `POST {origin}/upload` に契約書ファイルを multipart で送り、
//! 条項ごとの解析結果を受け取る。

use contract_analyzer_common::{
    upload::{parse_response, upload_url, UPLOAD_FIELD},
    Error, UploadOutcome, DEFAULT_BACKEND_ORIGIN, UPLOAD_TIMEOUT_SECS,
};
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Request, RequestInit, RequestMode, Response};

/// バックエンドのオリジン
///
/// ビルド時に `CONTRACT_ANALYZER_BACKEND` があればそれを使う。
pub fn backend_origin() -> String {
    let origin = option_env!("CONTRACT_ANALYZER_BACKEND").unwrap_or(DEFAULT_BACKEND_ORIGIN);
    origin.trim().trim_end_matches('/').to_string()
}

/// JS例外をメッセージ文字列にする
fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_default()
}

fn transport(value: JsValue) -> Error {
    Error::transport(js_error_message(&value))
}

/// 契約書をアップロードして解析結果を受け取る
///
/// 送信から本文の受信完了までを120秒で打ち切る。リトライはしない。
pub async fn upload_contract(origin: &str, file: &File) -> Result<UploadOutcome, Error> {
    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(transport)?;

    let controller = AbortController::new().map_err(transport)?;

    // Content-Type は boundary 付きでブラウザが設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);
    opts.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(&upload_url(origin), &opts).map_err(transport)?;

    let window = web_sys::window().ok_or_else(|| Error::transport("window is not available"))?;

    // ヘッダ受信から本文の読み終わりまでをまとめてタイムアウトの対象にする
    let exchange = async move {
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let resp: Response = resp_value.dyn_into().map_err(transport)?;
        let body = JsFuture::from(resp.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .unwrap_or_default();
        Ok::<_, Error>((resp.ok(), resp.status(), body))
    };

    let timeout_ms = UPLOAD_TIMEOUT_SECS * 1000;
    let timeout = TimeoutFuture::new(timeout_ms as u32);

    let (ok, status, body) = within_timeout(exchange, timeout, timeout_ms, || controller.abort()).await?;

    if !ok {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Upload failed with status {}", status)));
        return Err(Error::from_failed_response(status, &body));
    }

    let response = parse_response(&body)?;
    Ok(UploadOutcome::new(origin, response))
}

/// `work` が `timer` より先に終わらなければ `on_timeout` を呼んで打ち切る
async fn within_timeout<T>(
    work: impl Future<Output = Result<T, Error>>,
    timer: impl Future<Output = ()>,
    timeout_ms: u64,
    on_timeout: impl FnOnce(),
) -> Result<T, Error> {
    match select(Box::pin(work), Box::pin(timer)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            on_timeout();
            Err(Error::Timeout(timeout_ms))
        }
    }
}

/// 修正版契約書を新しいタブで開く（ダウンロードはブラウザ任せ）
pub fn open_in_new_tab(url: &str) {
    let opened = web_sys::window()
        .map(|window| window.open_with_url_and_target(url, "_blank"))
        .unwrap_or_else(|| Err(JsValue::from_str("window is not available")));

    if let Err(e) = opened {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Could not open {}: {}",
            url,
            js_error_message(&e)
        )));
    }
}
