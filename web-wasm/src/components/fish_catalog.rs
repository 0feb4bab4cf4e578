//! 魚カタログ（フィルタ・検索・カード一覧）

use crate::components::fish_card::FishCard;
use crate::storage::{is_seen_set_event, WebSeenStore};
use fishy_dex_common::{Catalog, Fish, FilterMode};
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn FishCatalog(fishes: Vec<Fish>) -> impl IntoView {
    let store = expect_context::<WebSeenStore>();
    let catalog = RwSignal::new(Catalog::new(fishes, store.read()));

    let handle = window_event_listener(ev::storage, move |event| {
        if is_seen_set_event(&event) {
            let seen = store.read();
            catalog.try_update(|c| c.resync(seen));
        }
    });
    on_cleanup(move || handle.remove());

    // カード側の切り替えを自分のコピーへ即時反映（ストアへはカードが書く）
    let on_toggle = move |id: String, seen: bool| {
        catalog.update(|c| c.apply_toggle(&id, seen));
    };

    let visible = Memo::new(move |_| {
        catalog.with(|c| c.visible().into_iter().cloned().collect::<Vec<_>>())
    });
    let stats = Memo::new(move |_| catalog.with(Catalog::stats));

    view! {
        <div class="fish-catalog">
            <div class="catalog-controls">
                <div class="filter-buttons">
                    {FilterMode::ALL
                        .into_iter()
                        .map(|mode| {
                            view! {
                                <button
                                    class="btn btn-small"
                                    class:btn-active=move || catalog.with(|c| c.filter() == mode)
                                    on:click=move |_| catalog.update(|c| c.set_filter(mode))
                                >
                                    {mode.as_str().to_uppercase()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <input
                    type="search"
                    class="catalog-search"
                    placeholder="Search species..."
                    prop:value=move || catalog.with(|c| c.query().to_string())
                    on:input=move |ev| {
                        catalog.update(|c| c.set_query(event_target_value(&ev)));
                    }
                />
            </div>

            <Show
                when=move || !visible.with(Vec::is_empty)
                fallback=|| view! { <p class="text-muted">"NO SPECIES FOUND"</p> }
            >
                <div class="fish-grid">
                    <For
                        each=move || visible.get()
                        key=|fish| fish.id.clone()
                        children=move |fish| {
                            view! { <FishCard fish=fish on_toggle=on_toggle /> }
                        }
                    />
                </div>
            </Show>

            <footer class="catalog-footer">
                <span>{move || catalog.with(Catalog::footer)}</span>
                <span class="stat">"TOTAL: " {move || stats.get().total}</span>
                <span class="stat">"SPOTTED: " {move || stats.get().seen}</span>
                <span class="stat">"UNSEEN: " {move || stats.get().unseen}</span>
            </footer>
        </div>
    }
}
