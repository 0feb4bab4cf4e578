//! 魚カードコンポーネント

use crate::api;
use crate::storage::{is_seen_set_event, WebSeenStore};
use fishy_dex_common::{
    format_coordinate, format_last_seen, CardState, Fish, ACKNOWLEDGEMENT_DURATION,
};
use gloo::console;
use gloo::timers::callback::Timeout;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn FishCard<F>(fish: Fish, on_toggle: F) -> impl IntoView
where
    F: Fn(String, bool) + 'static + Clone + Send + Sync,
{
    let store = expect_context::<WebSeenStore>();
    let card = RwSignal::new(CardState::mount(&fish, &store));

    // 他のカード・他タブでの変更に追従
    let handle = window_event_listener(ev::storage, move |event| {
        if is_seen_set_event(&event) {
            let seen = store.read();
            card.try_update(|c| c.resync(&seen));
        }
    });
    on_cleanup(move || handle.remove());

    let on_click = move |_| {
        // 表示を先に反転してから通知する（通知は同期的に配送される）
        let mut next = card.get_untracked();
        let toggle = next.begin_toggle();
        card.set(next);

        on_toggle(toggle.fish_id.clone(), toggle.state.is_seen());
        toggle.commit(&store);

        let token = toggle.acknowledgement;
        Timeout::new(ACKNOWLEDGEMENT_DURATION.as_millis() as u32, move || {
            card.try_update(|c| c.clear_acknowledgement(token));
        })
        .forget();

        if toggle.needs_remote_update() {
            let fish_id = toggle.fish_id.clone();
            spawn_local(async move {
                let result = api::update_last_seen(&fish_id, api::now()).await;
                if let Err(e) = &result {
                    console::error!(format!("[updateLastSeen] {}: {:?}", fish_id, e));
                }
                card.try_update(|c| c.apply_remote_result(result));
            });
        }
    };

    let is_seen = move || card.with(CardState::is_seen);
    let sighting = fish.latest_sighting;

    view! {
        <div class="fish-card" class:unseen=move || !is_seen()>
            <Show when=move || card.with(|c| c.acknowledgement().is_some())>
                <div class="toggle-ack">
                    <span>{move || card.with(|c| c.acknowledgement().unwrap_or_default())}</span>
                </div>
            </Show>

            <div class="fish-card-body">
                <div class="fish-card-header">
                    <div class="fish-card-title">
                        <div class="fish-name">{fish.name.clone()}</div>
                        <span class=fish.rarity.badge_class()>{fish.rarity.to_string()}</span>
                    </div>
                    <div class="fish-card-actions">
                        <span class="seen-badge" class:spotted=is_seen>
                            {move || card.with(|c| c.state().badge_label())}
                        </span>
                        <button class="btn btn-small" class:btn-active=is_seen on:click=on_click>
                            {move || card.with(|c| c.state().action_label())}
                        </button>
                    </div>
                </div>

                <div class="fish-card-meta">
                    {sighting.map(|s| view! {
                        <div class="meta-row">
                            <span>"LAT"</span>
                            <span class="meta-value">{format_coordinate(s.latitude)}</span>
                        </div>
                        <div class="meta-row">
                            <span>"LON"</span>
                            <span class="meta-value">{format_coordinate(s.longitude)}</span>
                        </div>
                    })}
                    <div class="meta-row meta-last-seen">
                        <span>"LAST SEEN"</span>
                        <span class="meta-highlight">
                            {move || format_last_seen(card.with(|c| c.last_seen()), api::now())}
                        </span>
                    </div>
                    <img src=fish.image.clone() alt=fish.name.clone() />
                </div>
            </div>
        </div>
    }
}
