//! ヘッダー（画面切り替え）

use crate::app::Page;
use leptos::prelude::*;

#[component]
pub fn NavHeader(page: ReadSignal<Page>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Fishy Dex"</h1>
            <nav class="nav-links">
                {Page::ALL
                    .into_iter()
                    .map(|p| {
                        view! {
                            <a href=p.hash() class:nav-active=move || page.get() == p>
                                {p.label()}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}
