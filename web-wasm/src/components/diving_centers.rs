//! ダイビングセンター一覧

use fishy_dex_common::{directory_footer, filter_centers, DirectorySort, DivingCenter};
use leptos::prelude::*;

#[component]
pub fn DivingCenters(centers: Vec<DivingCenter>) -> impl IntoView {
    let total = centers.len();
    let centers = StoredValue::new(centers);
    let (query, set_query) = signal(String::new());
    let (sort, set_sort) = signal(DirectorySort::Name);

    let visible = Memo::new(move |_| {
        centers.with_value(|centers| {
            filter_centers(centers, &query.get(), sort.get())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="diving-centers">
            <div class="catalog-controls">
                <input
                    type="search"
                    class="catalog-search"
                    placeholder="Search by name or address..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button
                    class="btn btn-small"
                    class:btn-active=move || sort.get() == DirectorySort::Name
                    on:click=move |_| set_sort.set(DirectorySort::Name)
                >
                    "NAME"
                </button>
            </div>

            <Show
                when=move || !visible.with(Vec::is_empty)
                fallback=|| view! { <p class="text-muted">"NO CENTERS FOUND"</p> }
            >
                <div class="center-grid">
                    <For
                        each=move || visible.get()
                        key=|center| center.id.clone()
                        children=|center| view! { <CenterCard center=center /> }
                    />
                </div>
            </Show>

            <footer class="catalog-footer">
                {move || directory_footer(visible.with(Vec::len), total)}
            </footer>
        </div>
    }
}

#[component]
fn CenterCard(center: DivingCenter) -> impl IntoView {
    let maps_url = center.maps_url();

    view! {
        <div class="center-card">
            <div class="fish-card-header">
                <div class="fish-name">{center.name}</div>
                <a href=maps_url target="_blank" rel="noopener noreferrer" class="btn btn-small">
                    "MAP"
                </a>
            </div>
            {center.address.map(|address| view! { <p class="center-address">{address}</p> })}
            {center.description.map(|text| view! { <p class="center-description">{text}</p> })}
            <div class="center-contacts">
                {center.phone_number.map(|phone| {
                    let href = format!("tel:{}", phone);
                    view! { <a href=href>{phone}</a> }
                })}
                {center.email.map(|email| {
                    let href = format!("mailto:{}", email);
                    view! { <a href=href>{email}</a> }
                })}
            </div>
        </div>
    }
}
