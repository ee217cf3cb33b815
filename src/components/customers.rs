//! Customers Page
//!
//! Ledger rollup over debtor and history bills: dues, open bills and
//! payment collection against a single bill.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::aggregate::{customer_ledgers, CustomerLedger};
use shopdesk_core::cart::validate_due_payment;

use super::{money, parse_amount, PaginationBar, SearchBox};
use crate::commands;
use crate::context::use_app_context;
use crate::hooks::{use_debounced, use_paged_list};
use crate::models::Bill;

#[component]
pub fn CustomersPage() -> impl IntoView {
    let ctx = use_app_context();
    let (debtors, set_debtors) = signal(Vec::<Bill>::new());
    let (history, set_history) = signal(Vec::<Bill>::new());
    let (expanded, set_expanded) = signal::<Option<i64>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match commands::list_debtors().await {
                Ok(bills) => set_debtors.set(bills),
                Err(e) => ctx.error(format!("Failed to load debtors: {}", e)),
            }
            match commands::bill_history().await {
                Ok(bills) => set_history.set(bills),
                Err(e) => ctx.error(format!("Failed to load bill history: {}", e)),
            }
        });
    });

    let ledgers = Memo::new(move |_| {
        debtors.with(|open| history.with(|closed| customer_ledgers(open, closed)))
    });
    let total_due = move || ledgers.with(|l| l.iter().map(|c| c.due).sum::<f64>());

    let query = RwSignal::new(String::new());
    let settled = use_debounced(query.into(), ctx.ui_config.get_untracked().search_debounce_ms);
    let list = use_paged_list(ledgers.into(), settled, ctx.ui_config.get_untracked().items_per_page);

    view! {
        <section class="page customers-page">
            <header class="page-header">
                <h2>"Customer Ledger"</h2>
                <span class="muted">{move || format!("Total outstanding: {}", money(total_due()))}</span>
            </header>

            <SearchBox query=query placeholder="Search by name or phone" />

            <table class="data-table">
                <thead>
                    <tr><th>"Customer"</th><th>"Phone"</th><th>"Bills"</th><th>"Due"</th></tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.visible.get()
                        key=|l| (l.customer_id, l.bill_count(), (l.due * 100.0).round() as i64)
                        children=move |ledger| {
                            let id = ledger.customer_id;
                            let row_class = if ledger.is_debtor() { "ledger-row debtor" } else { "ledger-row" };
                            let detail = ledger.clone();
                            view! {
                                <tr
                                    class=row_class
                                    on:click=move |_| set_expanded.update(|e| {
                                        *e = if *e == Some(id) { None } else { Some(id) };
                                    })
                                >
                                    <td>{ledger.name.clone()}</td>
                                    <td>{ledger.phone.clone()}</td>
                                    <td>{ledger.bill_count()}</td>
                                    <td>{money(ledger.due)}</td>
                                </tr>
                                <Show when=move || expanded.get() == Some(id)>
                                    <tr class="ledger-detail">
                                        <td colspan="4">
                                            <LedgerBills ledger=detail.clone() />
                                        </td>
                                    </tr>
                                </Show>
                            }
                        }
                    />
                </tbody>
            </table>

            <PaginationBar window=list.window total_items=list.total_items() />
        </section>
    }
}

#[component]
fn LedgerBills(ledger: CustomerLedger) -> impl IntoView {
    let bills: Vec<Bill> = ledger.bills().cloned().collect();
    view! {
        <table class="bill-table">
            <thead>
                <tr><th>"Invoice"</th><th>"Date"</th><th>"Total"</th><th>"Paid"</th><th>"Balance"</th><th>"Status"</th><th></th></tr>
            </thead>
            <tbody>
                {bills.into_iter().map(|bill| {
                    let date = bill.issued_on().map(|d| d.to_string()).unwrap_or_default();
                    let open = bill.is_open();
                    let (id, balance) = (bill.id, bill.balance);
                    view! {
                        <tr>
                            <td>{bill.display_number()}</td>
                            <td>{date}</td>
                            <td>{money(bill.final_amount)}</td>
                            <td>{money(bill.paid_amount)}</td>
                            <td>{money(bill.balance)}</td>
                            <td>{bill.payment_status.as_str()}</td>
                            <td>
                                <Show when=move || open>
                                    <PayDueForm bill_id=id balance=balance />
                                </Show>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

/// Collect a payment against one open bill
#[component]
fn PayDueForm(bill_id: i64, balance: f64) -> impl IntoView {
    let ctx = use_app_context();
    let (amount, set_amount) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = parse_amount(&amount.get_untracked())
            .and_then(|a| validate_due_payment(bill_id, balance, a).map_err(|e| e.to_string()));
        let request = match request {
            Ok(r) => r,
            Err(e) => return ctx.error(e),
        };

        set_busy.set(true);
        spawn_local(async move {
            match commands::pay_due(&request).await {
                Ok(_) => {
                    ctx.success(format!("Recorded payment of {}", money(request.amount)));
                    set_amount.set(String::new());
                    ctx.reload();
                }
                Err(e) => ctx.error(format!("Payment failed: {}", e)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="pay-due-form" on:submit=submit on:click=|ev| ev.stop_propagation()>
            <input
                type="number"
                min="0"
                step="0.01"
                placeholder=format!("max {}", money(balance))
                prop:value=move || amount.get()
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Pay"</button>
        </form>
    }
}
