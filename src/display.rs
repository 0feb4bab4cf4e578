//! ターミナル表示
//!
//! カード・カタログ・トラッカー・ダイビングセンターを文字列に整形する。

use chrono::{DateTime, Utc};
use fishy_dex_common::catalog::CatalogStats;
use fishy_dex_common::directory::directory_footer;
use fishy_dex_common::{
    format_coordinate, format_last_seen, CardState, Catalog, DivingCenter, Fish, Tracker,
};
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────";

/// 魚カード
pub fn render_card(fish: &Fish, card: &CardState, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let state = card.state();

    let _ = writeln!(out, "{}  [{}]  {}", fish.name, fish.rarity, state.badge_label());
    let _ = writeln!(out, "  ID         {}", fish.id);
    if let Some(sighting) = &fish.latest_sighting {
        let _ = writeln!(out, "  LAT        {}", format_coordinate(sighting.latitude));
        let _ = writeln!(out, "  LON        {}", format_coordinate(sighting.longitude));
    }
    let _ = writeln!(out, "  LAST SEEN  {}", format_last_seen(card.last_seen(), now));
    if !fish.image.is_empty() {
        let _ = writeln!(out, "  IMAGE      {}", fish.image);
    }
    if let Some(message) = card.acknowledgement() {
        let _ = writeln!(out, "  ✔ {}", message);
    }
    out
}

pub fn render_stats(stats: &CatalogStats) -> String {
    format!(
        "TOTAL: {}  SPOTTED: {}  UNSEEN: {}",
        stats.total, stats.seen, stats.unseen
    )
}

/// カタログ一覧
pub fn render_catalog(catalog: &Catalog, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CATALOG  (filter: {})", catalog.filter());
    let _ = writeln!(out, "{}", RULE);

    for fish in catalog.visible() {
        let card = CardState::new(fish, catalog.is_seen(&fish.id));
        out.push_str(&render_card(fish, &card, now));
        out.push('\n');
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", catalog.footer());
    let _ = writeln!(out, "{}", render_stats(&catalog.stats()));
    out
}

/// トラッカー一覧（新しい目撃順）
pub fn render_tracker(tracker: &Tracker, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TRACKER");
    let _ = writeln!(out, "{}", RULE);

    for fish in tracker.sorted() {
        let position = fish
            .latest_sighting
            .as_ref()
            .map(|s| {
                format!(
                    "{}, {}",
                    format_coordinate(s.latitude),
                    format_coordinate(s.longitude)
                )
            })
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<24} {:<10} {:<26} {}",
            fish.name,
            fish.rarity.as_str(),
            position,
            format_last_seen(fish.last_seen(), now)
        );
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{} species tracked", tracker.fishes().len());
    out
}

/// ダイビングセンター一覧
pub fn render_centers(centers: &[&DivingCenter], total: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "DIVING CENTERS");
    let _ = writeln!(out, "{}", RULE);

    if centers.is_empty() {
        let _ = writeln!(out, "NO CENTERS FOUND");
        let _ = writeln!(out, "Try adjusting your search");
    }

    for center in centers {
        let _ = writeln!(out, "{}", center.name);
        if let Some(address) = &center.address {
            let _ = writeln!(out, "  {}", address);
        }
        let _ = writeln!(
            out,
            "  LAT: {}  LON: {}",
            format_coordinate(center.latitude),
            format_coordinate(center.longitude)
        );
        if let Some(phone) = &center.phone_number {
            let _ = writeln!(out, "  PHONE: {}", phone);
        }
        if let Some(email) = &center.email {
            let _ = writeln!(out, "  EMAIL: {}", email);
        }
        if let Some(description) = &center.description {
            let _ = writeln!(out, "  {}", description);
        }
        let _ = writeln!(out, "  MAP: {}", center.maps_url());
        out.push('\n');
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", directory_footer(centers.len(), total));
    out
}
