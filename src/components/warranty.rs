//! Warranty Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::models::WarrantyStatus;

use super::{today, PaginationBar, SearchBox};
use crate::commands;
use crate::context::use_app_context;
use crate::hooks::{use_debounced, use_paged_list};
use crate::models::Warranty;

fn status_class(status: WarrantyStatus) -> &'static str {
    match status {
        WarrantyStatus::Active => "pill pill-ok",
        WarrantyStatus::Expiring => "pill pill-warn",
        WarrantyStatus::Expired => "pill pill-bad",
        WarrantyStatus::Unknown => "pill",
    }
}

#[component]
pub fn WarrantyPage() -> impl IntoView {
    let ctx = use_app_context();
    let (warranties, set_warranties) = signal(Vec::<Warranty>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match commands::list_warranties().await {
                Ok(list) => set_warranties.set(list),
                Err(e) => ctx.error(format!("Failed to load warranties: {}", e)),
            }
        });
    });

    let query = RwSignal::new(String::new());
    let settled = use_debounced(query.into(), ctx.ui_config.get_untracked().search_debounce_ms);
    let list = use_paged_list(warranties.into(), settled, ctx.ui_config.get_untracked().items_per_page);

    view! {
        <section class="page warranty-page">
            <header class="page-header">
                <h2>"Warranties"</h2>
            </header>

            <SearchBox query=query placeholder="Search by product, serial or customer" />

            <table class="data-table">
                <thead>
                    <tr><th>"Product"</th><th>"Serial"</th><th>"Customer"</th><th>"Expires"</th><th>"Status"</th></tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.visible.get()
                        key=|w| w.id
                        children=move |w| {
                            let status = w.status_on(today());
                            view! {
                                <tr>
                                    <td>{w.product_name.clone()}</td>
                                    <td>{w.serial_no.clone().unwrap_or_default()}</td>
                                    <td>{w.customer_name().to_string()}</td>
                                    <td>{w.expiry_date.clone().unwrap_or_default()}</td>
                                    <td><span class=status_class(status)>{status.as_str()}</span></td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <PaginationBar window=list.window total_items=list.total_items() />
        </section>
    }
}
