//! Pagination Bar Component

use leptos::prelude::*;
use shopdesk_core::pagination::total_pages;
use shopdesk_core::PageWindow;

use crate::hooks::range_caption;

#[component]
pub fn PaginationBar(
    window: RwSignal<PageWindow>,
    #[prop(into)] total_items: Signal<usize>,
) -> impl IntoView {
    let pages = move || total_pages(total_items.get(), window.get().per_page());

    view! {
        <div class="pagination-bar">
            <span class="pagination-caption">
                {move || range_caption(window.get(), total_items.get())}
            </span>
            <button
                disabled=move || window.get().page() <= 1
                on:click=move |_| window.update(|w| w.prev())
            >
                "Prev"
            </button>
            <span class="pagination-page">
                {move || format!("{} / {}", window.get().page(), pages())}
            </span>
            <button
                disabled=move || window.get().page() >= pages()
                on:click=move |_| {
                    let total = total_items.get_untracked();
                    window.update(|w| w.next(total));
                }
            >
                "Next"
            </button>
        </div>
    }
}
