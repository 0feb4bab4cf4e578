//! Fishy Dex API連携（fetch）
//!
//! - 一覧取得は失敗しても空の一覧を返す（コンソールにログ）
//! - 最終目撃日時の更新は1回だけ送る

use chrono::{DateTime, Utc};
use fishy_dex_common::{session_present, DivingCenter, Endpoints, Fish, LastSeenUpdate};
use gloo::console;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestMode, Response};

fn endpoints() -> Endpoints {
    Endpoints::default()
}

/// 現在時刻（ブラウザの時計）
pub fn now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// API呼び出し（共通処理）。成功時は本文テキストを返す
async fn call_api(method: &str, url: &str, body: Option<String>) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    opts.set_credentials(RequestCredentials::Include);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)?;
    if body.is_some() {
        request.headers().set("Content-Type", "application/json")?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    let text = JsFuture::from(resp.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, JsValue> {
    let text = call_api("GET", url, None).await?;
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// 失敗時は空の一覧
async fn fetch_list<T: DeserializeOwned>(label: &str, url: &str) -> Vec<T> {
    match get_json::<Vec<T>>(url).await {
        Ok(list) => list,
        Err(e) => {
            console::error!(format!("[{}] Failed: {:?}", label, e));
            Vec::new()
        }
    }
}

pub async fn fetch_fishes() -> Vec<Fish> {
    fetch_list("fetchFishes", &endpoints().fishes()).await
}

pub async fn fetch_diving_centers() -> Vec<DivingCenter> {
    fetch_list("fetchDivingCenters", &endpoints().diving_centers()).await
}

/// 最終目撃日時を更新し、サーバーが受理した日時を返す
pub async fn update_last_seen(
    fish_id: &str,
    timestamp: DateTime<Utc>,
) -> Result<DateTime<Utc>, JsValue> {
    let body = serde_json::to_string(&LastSeenUpdate { timestamp })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let text = call_api("PATCH", &endpoints().last_seen(fish_id), Some(body)).await?;
    let echoed: LastSeenUpdate =
        serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(echoed.timestamp)
}

/// セッションの有無。確認できなければ無しとみなす
pub async fn check_session() -> bool {
    match call_api("GET", &endpoints().session(), None).await {
        Ok(body) => session_present(&body),
        Err(e) => {
            console::warn!(format!("[checkSession] {:?}", e));
            false
        }
    }
}
