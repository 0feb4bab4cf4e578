//! メインアプリケーションコンポーネント

use crate::components::nav_header::NavHeader;
use crate::pages::{CatalogPage, DivingCentersPage, TrackerPage};
use crate::storage;
use leptos::ev;
use leptos::prelude::*;

/// 画面（URLハッシュで切り替える）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Tracker,
    Catalog,
    DivingCenters,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Tracker, Page::Catalog, Page::DivingCenters];

    pub fn from_hash(hash: &str) -> Self {
        match hash.trim_start_matches('#') {
            "catalog" => Page::Catalog,
            "diving-centers" => Page::DivingCenters,
            _ => Page::Tracker,
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Page::Tracker => "#tracker",
            Page::Catalog => "#catalog",
            Page::DivingCenters => "#diving-centers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Tracker => "TRACKER",
            Page::Catalog => "CATALOG",
            Page::DivingCenters => "DIVING CENTERS",
        }
    }

    /// ドキュメントタイトル
    pub fn title(&self) -> &'static str {
        match self {
            Page::Tracker => "Fishy Dex",
            Page::Catalog => "Fish Catalog | Fishy Dex",
            Page::DivingCenters => "Diving Centers | Fishy Dex",
        }
    }
}

fn current_page() -> Page {
    window()
        .location()
        .hash()
        .map(|hash| Page::from_hash(&hash))
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    // 既見セットのストアは全画面で共有する
    provide_context(storage::seen_store());

    let (page, set_page) = signal(current_page());

    let handle = window_event_listener(ev::hashchange, move |_| set_page.set(current_page()));
    on_cleanup(move || handle.remove());

    Effect::new(move |_| {
        document().set_title(page.get().title());
    });

    view! {
        <div class="container">
            <NavHeader page=page />

            <main>
                {move || match page.get() {
                    Page::Tracker => view! { <TrackerPage /> }.into_any(),
                    Page::Catalog => view! { <CatalogPage /> }.into_any(),
                    Page::DivingCenters => view! { <DivingCentersPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_hash() {
        assert_eq!(Page::from_hash("#catalog"), Page::Catalog);
        assert_eq!(Page::from_hash("diving-centers"), Page::DivingCenters);
        assert_eq!(Page::from_hash(""), Page::Tracker);
        assert_eq!(Page::from_hash("#unknown"), Page::Tracker);
    }

    #[test]
    fn test_page_hash_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_hash(page.hash()), page);
        }
    }
}
