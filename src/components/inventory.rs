//! Inventory Page
//!
//! Product list with stock levels, a restock form and the restock history
//! chart.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::aggregate::{restock_by_date, RestockPoint};

use super::{PaginationBar, SearchBox, money};
use crate::commands;
use crate::context::use_app_context;
use crate::hooks::{use_debounced, use_paged_list};
use crate::models::{RestockEntry, RestockRequest};
use crate::store::{store_adjust_stock, use_app_store, AppStateStoreFields};

/// Parse a restock quantity; it must be a whole number above zero
pub(crate) fn parse_restock_quantity(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(q) if q > 0 => Ok(q),
        Ok(_) => Err("Quantity must be greater than zero".to_string()),
        Err(_) => Err(format!("'{}' is not a whole number", raw.trim())),
    }
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (restock_log, set_restock_log) = signal(Vec::<RestockEntry>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match commands::list_restock_log().await {
                Ok(entries) => set_restock_log.set(entries),
                Err(e) => ctx.error(format!("Failed to load restock history: {}", e)),
            }
        });
    });

    let points = Memo::new(move |_| restock_log.with(|entries| restock_by_date(entries)));

    let query = RwSignal::new(String::new());
    let settled = use_debounced(query.into(), ctx.ui_config.get_untracked().search_debounce_ms);
    let products = Signal::derive(move || store.products().get());
    let list = use_paged_list(products, settled, ctx.ui_config.get_untracked().items_per_page);

    view! {
        <section class="page inventory-page">
            <header class="page-header">
                <h2>"Inventory"</h2>
            </header>

            <RestockForm on_restocked=Callback::new(move |(product_id, quantity): (i64, i64)| {
                store_adjust_stock(&store, product_id, quantity);
                ctx.reload();
            }) />

            <SearchBox query=query placeholder="Search by name, SKU or category" />

            <table class="data-table">
                <thead>
                    <tr><th>"Product"</th><th>"SKU"</th><th>"Price"</th><th>"Stock"</th></tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.visible.get()
                        key=|p| (p.id, p.stock)
                        children=move |product| {
                            let row_class = if product.is_low_stock() { "low-stock" } else { "" };
                            view! {
                                <tr class=row_class>
                                    <td>{product.name.clone()}</td>
                                    <td>{product.sku.clone().unwrap_or_default()}</td>
                                    <td>{money(product.price)}</td>
                                    <td>{product.stock}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <PaginationBar window=list.window total_items=list.total_items() />

            <h3>"Restocks by Date"</h3>
            <RestockChart points=points />
        </section>
    }
}

#[component]
fn RestockForm(on_restocked: Callback<(i64, i64)>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (product_id, set_product_id) = signal::<Option<i64>>(None);
    let (quantity, set_quantity) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = product_id.get_untracked() else {
            return ctx.error("Select a product to restock");
        };
        let qty = match parse_restock_quantity(&quantity.get_untracked()) {
            Ok(q) => q,
            Err(e) => return ctx.error(e),
        };

        set_busy.set(true);
        spawn_local(async move {
            let request = RestockRequest { product_id: id, quantity: qty };
            match commands::restock(&request).await {
                Ok(_) => {
                    ctx.success(format!("Added {} units", qty));
                    set_quantity.set(String::new());
                    on_restocked.run((id, qty));
                }
                Err(e) => ctx.error(format!("Restock failed: {}", e)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="restock-form" on:submit=submit>
            <select on:change=move |ev| set_product_id.set(event_target_value(&ev).parse::<i64>().ok())>
                <option value="">"Select product"</option>
                {move || store.products().get().into_iter().map(|p| view! {
                    <option value=p.id.to_string()>{format!("{} ({} in stock)", p.name, p.stock)}</option>
                }).collect_view()}
            </select>
            <input
                type="number"
                min="1"
                placeholder="Quantity"
                prop:value=move || quantity.get()
                on:input=move |ev| set_quantity.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Restock"</button>
        </form>
    }
}

#[component]
fn RestockChart(points: Memo<Vec<RestockPoint>>) -> impl IntoView {
    view! {
        <div class="bar-chart restock-chart">
            {move || {
                let points = points.get();
                let max = points.iter().map(|p| p.quantity).max().unwrap_or(0).max(1);
                points.into_iter().map(|p| {
                    let height = p.quantity * 100 / max;
                    view! {
                        <div class="bar" title=p.quantity.to_string()>
                            <div class="bar-fill" style=format!("height: {}%", height)></div>
                            <span class="bar-label">{p.date}</span>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}
