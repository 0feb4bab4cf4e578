//! 目撃トラッカー（地図 + 新しい目撃順の一覧）

use crate::api;
use crate::storage::BrowserStorage;
use fishy_dex_common::{
    format_coordinate, format_last_seen, Fish, PanelSplit, Tracker, LIST_PANEL_MIN,
    MAP_PANEL_MIN,
};
use leptos::prelude::*;

/// 正距円筒図法で viewBox (0 0 360 180) 上の座標へ
fn project(latitude: f64, longitude: f64) -> (f64, f64) {
    (longitude + 180.0, 90.0 - latitude)
}

#[component]
pub fn FishTracker(fishes: Vec<Fish>) -> impl IntoView {
    // 分割比はリロード後も引き継ぐ
    let split = PanelSplit::restore(&BrowserStorage);
    let tracker = RwSignal::new(Tracker::new(fishes).with_split(split));

    let highlighted = move |id: &str| tracker.with(|t| t.is_highlighted(id));
    let hover = move |id: Option<String>| tracker.update(|t| t.set_hovered(id));

    // 一覧の中身は変わらないので一度だけ描画し、強調だけを追従させる
    let markers = tracker.with_untracked(|t| {
        t.fishes()
            .iter()
            .filter_map(|fish| {
                let sighting = fish.latest_sighting?;
                let (x, y) = project(sighting.latitude, sighting.longitude);
                let id = fish.id.clone();
                let enter_id = fish.id.clone();
                Some(view! {
                    <circle
                        class="marker"
                        class:marker-active=move || highlighted(&id)
                        cx=x.to_string()
                        cy=y.to_string()
                        r="2"
                        on:mouseenter=move |_| hover(Some(enter_id.clone()))
                        on:mouseleave=move |_| hover(None)
                    >
                        <title>{fish.name.clone()}</title>
                    </circle>
                })
            })
            .collect_view()
    });

    let now = api::now();
    let rows = tracker.with_untracked(|t| {
        t.sorted()
            .iter()
            .map(|fish| {
                let id = fish.id.clone();
                let enter_id = fish.id.clone();
                let coordinates = fish.latest_sighting.map(|s| {
                    format!(
                        "{}, {}",
                        format_coordinate(s.latitude),
                        format_coordinate(s.longitude)
                    )
                });
                view! {
                    <li
                        class="tracker-row"
                        class:tracker-row-active=move || highlighted(&id)
                        on:mouseenter=move |_| hover(Some(enter_id.clone()))
                        on:mouseleave=move |_| hover(None)
                    >
                        <div class="fish-name">{fish.name.clone()}</div>
                        <span class=fish.rarity.badge_class()>{fish.rarity.to_string()}</span>
                        <div class="meta-value">{coordinates}</div>
                        <div class="meta-highlight">{format_last_seen(fish.last_seen(), now)}</div>
                    </li>
                }
            })
            .collect_view()
    });

    let map_width = move || format!("width: {}%", tracker.with(|t| t.split().map()));
    let list_width = move || format!("width: {}%", tracker.with(|t| t.split().list()));

    view! {
        <div class="fish-tracker">
            <div class="tracker-panels">
                <section class="tracker-map" style=map_width>
                    <svg viewBox="0 0 360 180" class="world-map">
                        <rect width="360" height="180" class="ocean" />
                        {markers}
                    </svg>
                </section>
                <section class="tracker-list" style=list_width>
                    <ul>{rows}</ul>
                </section>
            </div>
            <input
                type="range"
                class="panel-resizer"
                min=MAP_PANEL_MIN.to_string()
                max=(100.0 - LIST_PANEL_MIN).to_string()
                prop:value=move || tracker.with(|t| t.split().map()).to_string()
                on:input=move |ev| {
                    if let Ok(map) = event_target_value(&ev).parse::<f32>() {
                        tracker.update(|t| t.resize(map));
                        tracker.with_untracked(|t| t.split().save(&BrowserStorage));
                    }
                }
            />
        </div>
    }
}
