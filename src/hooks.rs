//! Reactive Hooks
//!
//! Glue between the pure helpers in `shopdesk_core` and Leptos signals.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use shopdesk_core::clock::{Clock, Millis, SystemClock};
use shopdesk_core::pagination::{bounds, total_pages};
use shopdesk_core::search::{filter_items, Searchable};
use shopdesk_core::{Debouncer, PageWindow};

/// Copy of `source` that only changes after `delay_ms` without edits
pub fn use_debounced(source: Signal<String>, delay_ms: Millis) -> ReadSignal<String> {
    let (settled, set_settled) = signal(source.get_untracked());
    let debouncer = StoredValue::new(Debouncer::<String>::new(delay_ms));
    // Dropping a Timeout cancels it, so replacing the handle cancels the old timer.
    let timer = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |prev: Option<()>| {
        let value = source.get();
        if prev.is_none() {
            return;
        }
        let Some(ticket) = debouncer.try_update_value(|d| d.input(value, SystemClock.now_ms())) else {
            return;
        };
        let handle = Timeout::new(delay_ms as u32, move || {
            if let Some(Some(value)) = debouncer.try_update_value(|d| d.fire(ticket)) {
                set_settled.set(value);
            }
        });
        timer.set_value(Some(handle));
    });

    settled
}

/// A searchable list paged through a [`PageWindow`]
pub struct PagedList<T: Send + Sync + 'static> {
    pub window: RwSignal<PageWindow>,
    /// Items passing the current filter
    pub filtered: Memo<Vec<T>>,
    /// Items on the current page
    pub visible: Memo<Vec<T>>,
}

impl<T: Send + Sync + 'static> Clone for PagedList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for PagedList<T> {}

impl<T: Clone + PartialEq + Send + Sync + 'static> PagedList<T> {
    pub fn total_items(&self) -> Signal<usize> {
        let filtered = self.filtered;
        Signal::derive(move || filtered.with(|f| f.len()))
    }
}

/// Filter `items` by the debounced `query` and page the result.
/// A new query starts again at page 1; a refresh that shrinks the list
/// past the current page does too.
pub fn use_paged_list<T>(items: Signal<Vec<T>>, query: ReadSignal<String>, per_page: usize) -> PagedList<T>
where
    T: Searchable + Clone + PartialEq + Send + Sync + 'static,
{
    let window = RwSignal::new(PageWindow::new(per_page));
    let filtered = Memo::new(move |_| items.with(|list| filter_items(list, &query.get())));

    Effect::new(move |prev: Option<String>| {
        let q = query.get();
        if prev.is_some_and(|p| p != q) {
            window.update(|w| w.reset());
        }
        q
    });
    Effect::new(move |_| {
        let len = filtered.with(|f| f.len());
        window.update(|w| w.refresh(len));
    });

    let visible = Memo::new(move |_| {
        let w = window.get();
        filtered.with(|list| w.project(list).visible.to_vec())
    });

    PagedList { window, filtered, visible }
}

/// "Showing a-b of n" caption for a page
pub fn range_caption(window: PageWindow, total: usize) -> String {
    if total == 0 {
        return "No results".to_string();
    }
    let (first, last) = bounds(total, window.page(), window.per_page());
    format!(
        "Showing {}-{} of {} (page {} of {})",
        first + 1,
        last,
        total,
        window.page(),
        total_pages(total, window.per_page())
    )
}
