//! Billing Page (Point of Sale)
//!
//! Cart, discount and payment are validated client-side; an invalid bill is
//! never sent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::cart::Cart;
use shopdesk_core::search::filter_items;

use super::{money, parse_amount, SearchBox};
use crate::commands;
use crate::context::use_app_context;
use crate::hooks::use_debounced;
use crate::store::{store_adjust_stock, store_customer_name, use_app_store, AppStateStoreFields};

/// Products shown in the picker at most
const PICKER_LIMIT: usize = 12;

#[component]
pub fn BillingPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let cart = RwSignal::new(Cart::new());
    let (customer_id, set_customer_id) = signal::<Option<i64>>(None);
    let (paid_input, set_paid_input) = signal(String::new());
    let (discount_input, set_discount_input) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let query = RwSignal::new(String::new());
    let settled = use_debounced(query.into(), ctx.ui_config.get_untracked().search_debounce_ms);
    let picker = Memo::new(move |_| {
        store.products().with(|products| {
            let mut hits = filter_items(products, &settled.get());
            hits.truncate(PICKER_LIMIT);
            hits
        })
    });

    let add_product = move |product_id: i64| {
        let product = store.products().with_untracked(|list| list.iter().find(|p| p.id == product_id).cloned());
        let Some(product) = product else { return };
        if let Some(Err(e)) = cart.try_update(|c| c.add(&product)) {
            ctx.error(e.to_string());
        }
    };

    let set_quantity = move |product_id: i64, raw: String| {
        let quantity = raw.trim().parse::<u32>().unwrap_or(0);
        let result = if quantity == 0 {
            cart.update(|c| c.remove(product_id));
            Ok(())
        } else {
            cart.try_update(|c| c.set_quantity(product_id, quantity)).unwrap_or(Ok(()))
        };
        if let Err(e) = result {
            ctx.error(e.to_string());
        }
    };

    let apply_discount = move |raw: String| {
        set_discount_input.set(raw.clone());
        let result = parse_amount(&raw)
            .and_then(|d| cart.try_update(|c| c.set_discount(d)).unwrap_or(Ok(())).map_err(|e| e.to_string()));
        if let Err(e) = result {
            ctx.error(e);
        }
    };

    // Live payment preview; errors render inline until submit.
    let summary = move || {
        let paid = parse_amount(&paid_input.get())?;
        cart.with(|c| c.validate_payment(paid)).map_err(|e| e.to_string())
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let paid = match parse_amount(&paid_input.get_untracked()) {
            Ok(p) => p,
            Err(e) => return ctx.error(e),
        };
        let request = match cart.with_untracked(|c| c.to_request(customer_id.get_untracked(), paid)) {
            Ok(r) => r,
            Err(e) => return ctx.error(e.to_string()),
        };

        set_submitting.set(true);
        spawn_local(async move {
            match commands::create_bill(&request).await {
                Ok(_) => {
                    for item in &request.items {
                        store_adjust_stock(&store, item.product_id, -(item.quantity as i64));
                    }
                    let who = store_customer_name(&store, request.customer_id).unwrap_or_default();
                    ctx.success(format!("Bill saved for {} ({})", who, money(request.final_amount)));
                    cart.set(Cart::new());
                    set_paid_input.set(String::new());
                    set_discount_input.set(String::new());
                    ctx.reload();
                }
                Err(e) => ctx.error(format!("Failed to create bill: {}", e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="page billing-page">
            <header class="page-header">
                <h2>"New Bill"</h2>
            </header>

            <div class="billing-layout">
                <div class="product-picker">
                    <SearchBox query=query placeholder="Search products by name or SKU" />
                    <ul class="picker-list">
                        <For
                            each=move || picker.get()
                            key=|p| (p.id, p.stock)
                            children=move |product| {
                                let id = product.id;
                                let out = product.stock <= 0;
                                view! {
                                    <li class="picker-item">
                                        <span>{product.name.clone()}</span>
                                        <span class="muted">{format!("{} · {} in stock", money(product.price), product.stock)}</span>
                                        <button disabled=out on:click=move |_| add_product(id)>"Add"</button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>

                <form class="cart" on:submit=submit>
                    <label>
                        "Customer"
                        <select on:change=move |ev| {
                            set_customer_id.set(event_target_value(&ev).parse::<i64>().ok());
                        }>
                            <option value="">"Select customer"</option>
                            {move || store.customers().get().into_iter().map(|c| view! {
                                <option value=c.id.to_string()>{c.name.clone()}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <table class="cart-table">
                        <thead>
                            <tr><th>"Item"</th><th>"Price"</th><th>"Qty"</th><th>"Total"</th><th></th></tr>
                        </thead>
                        <tbody>
                            {move || cart.get().lines().iter().cloned().map(|line| {
                                let id = line.product_id;
                                view! {
                                    <tr>
                                        <td>{line.name.clone()}</td>
                                        <td>{money(line.unit_price)}</td>
                                        <td>
                                            <input
                                                type="number"
                                                min="0"
                                                class="qty-input"
                                                prop:value=line.quantity.to_string()
                                                on:change=move |ev| set_quantity(id, event_target_value(&ev))
                                            />
                                        </td>
                                        <td>{money(line.line_total())}</td>
                                        <td>
                                            <button type="button" on:click=move |_| cart.update(|c| c.remove(id))>"×"</button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>

                    <div class="cart-totals">
                        <p>{move || format!("Subtotal: {}", money(cart.with(|c| c.subtotal())))}</p>
                        <label>
                            "Discount"
                            <input
                                type="number"
                                min="0"
                                prop:value=move || discount_input.get()
                                on:change=move |ev| apply_discount(event_target_value(&ev))
                            />
                        </label>
                        <p class="grand-total">{move || format!("Total: {}", money(cart.with(|c| c.grand_total())))}</p>
                        <label>
                            "Paid"
                            <input
                                type="number"
                                min="0"
                                prop:value=move || paid_input.get()
                                on:input=move |ev| set_paid_input.set(event_target_value(&ev))
                            />
                        </label>
                        {move || match summary() {
                            Ok(s) => view! {
                                <p class="payment-preview">
                                    {format!("Balance {} · {}", money(s.balance), s.status.as_str())}
                                </p>
                            }.into_any(),
                            Err(e) => view! { <p class="form-error">{e}</p> }.into_any(),
                        }}
                    </div>

                    <button type="submit" class="primary" disabled=move || submitting.get() || cart.with(|c| c.is_empty())>
                        {move || if submitting.get() { "Saving…" } else { "Create Bill" }}
                    </button>
                </form>
            </div>
        </section>
    }
}
