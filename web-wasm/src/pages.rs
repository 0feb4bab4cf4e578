//! 画面の外枠（セッション確認 → 取得 → 表示）

use crate::api;
use crate::components::{
    diving_centers::DivingCenters, fish_catalog::FishCatalog, fish_tracker::FishTracker,
};
use fishy_dex_common::LOGIN_ROUTE;
use gloo::console;
use leptos::prelude::*;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;

/// 読み込み状態
#[derive(Debug, Clone, PartialEq)]
enum Load<T> {
    Loading,
    Ready(T),
}

fn redirect_to_login() {
    if let Err(e) = window().location().set_href(LOGIN_ROUTE) {
        console::error!(format!("[session] リダイレクト失敗: {:?}", e));
    }
}

/// セッションが無ければログインへ、あれば一覧を取得する
fn load_gated<T, Fut>(fetch: impl FnOnce() -> Fut + 'static) -> ReadSignal<Load<T>>
where
    T: Send + Sync + 'static,
    Fut: Future<Output = T> + 'static,
{
    let (state, set_state) = signal(Load::Loading);
    spawn_local(async move {
        if !api::check_session().await {
            redirect_to_login();
            return;
        }
        let data = fetch().await;
        set_state.try_set(Load::Ready(data));
    });
    state
}

fn loading() -> impl IntoView {
    view! { <p class="text-muted">"LOADING..."</p> }
}

#[component]
pub fn TrackerPage() -> impl IntoView {
    let state = load_gated(api::fetch_fishes);

    move || match state.get() {
        Load::Loading => loading().into_any(),
        Load::Ready(fishes) => view! { <FishTracker fishes=fishes /> }.into_any(),
    }
}

#[component]
pub fn CatalogPage() -> impl IntoView {
    let state = load_gated(api::fetch_fishes);

    move || match state.get() {
        Load::Loading => loading().into_any(),
        Load::Ready(fishes) => view! {
            <h2 class="page-title">"FISH CATALOG"</h2>
            <FishCatalog fishes=fishes />
        }
        .into_any(),
    }
}

#[component]
pub fn DivingCentersPage() -> impl IntoView {
    let state = load_gated(api::fetch_diving_centers);

    move || match state.get() {
        Load::Loading => loading().into_any(),
        Load::Ready(centers) => view! {
            <h2 class="page-title">"DIVING CENTERS"</h2>
            <DivingCenters centers=centers />
        }
        .into_any(),
    }
}
