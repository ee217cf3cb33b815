//! Reports Page
//!
//! Sales report with CSV export, revenue by month, and the debtors list
//! export. Both CSV files are generated here and saved through the browser.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::aggregate::{customer_ledgers, monthly_revenue};
use shopdesk_core::export::{debtors_csv, export_file_name, sales_report_csv, ReportKind};

use super::{money, today, PaginationBar, SearchBox};
use crate::commands;
use crate::context::use_app_context;
use crate::download::download_csv;
use crate::hooks::{use_debounced, use_paged_list};
use crate::models::Bill;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let ctx = use_app_context();
    let (bills, set_bills) = signal(Vec::<Bill>::new());
    let (exporting, set_exporting) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match commands::sales_report().await {
                Ok(list) => set_bills.set(list),
                Err(e) => ctx.error(format!("Failed to load sales report: {}", e)),
            }
        });
    });

    let revenue = Memo::new(move |_| bills.with(|b| monthly_revenue(b)));
    let totals = move || {
        bills.with(|list| {
            let sales: f64 = list.iter().map(|b| b.final_amount).sum();
            let collected: f64 = list.iter().map(|b| b.paid_amount).sum();
            (sales, collected)
        })
    };

    let query = RwSignal::new(String::new());
    let settled = use_debounced(query.into(), ctx.ui_config.get_untracked().search_debounce_ms);
    let list = use_paged_list(bills.into(), settled, ctx.ui_config.get_untracked().items_per_page);

    let export_sales = move |_: leptos::ev::MouseEvent| {
        // Filtered rows, all pages
        let csv = list.filtered.with_untracked(|rows| sales_report_csv(rows));
        if let Err(e) = download_csv(&export_file_name(ReportKind::Sales, today()), &csv) {
            ctx.error(format!("Export failed: {}", e));
        }
    };

    let export_debtors = move |_: leptos::ev::MouseEvent| {
        set_exporting.set(true);
        spawn_local(async move {
            let result = async {
                let open = commands::list_debtors().await?;
                let closed = commands::bill_history().await?;
                let csv = debtors_csv(&customer_ledgers(&open, &closed));
                download_csv(&export_file_name(ReportKind::Debtors, today()), &csv)
            }
            .await;
            if let Err(e) = result {
                ctx.error(format!("Debtors export failed: {}", e));
            }
            set_exporting.set(false);
        });
    };

    view! {
        <section class="page reports-page">
            <header class="page-header">
                <h2>"Reports"</h2>
                <div class="actions">
                    <button on:click=export_sales>"Export Sales CSV"</button>
                    <button disabled=move || exporting.get() on:click=export_debtors>"Export Debtors CSV"</button>
                </div>
            </header>

            <p class="muted">{move || {
                let (sales, collected) = totals();
                format!("Sales {} · Collected {} · Outstanding {}", money(sales), money(collected), money(sales - collected))
            }}</p>

            <h3>"Revenue by Month"</h3>
            <table class="data-table compact">
                <tbody>
                    {move || revenue.get().into_iter().map(|m| view! {
                        <tr><td>{m.month}</td><td>{money(m.revenue)}</td></tr>
                    }).collect_view()}
                </tbody>
            </table>

            <h3>"Invoices"</h3>
            <SearchBox query=query placeholder="Search by invoice, customer or status" />
            <table class="data-table">
                <thead>
                    <tr><th>"Invoice"</th><th>"Date"</th><th>"Customer"</th><th>"Total"</th><th>"Paid"</th><th>"Balance"</th><th>"Status"</th></tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.visible.get()
                        key=|b| b.id
                        children=move |bill| view! {
                            <tr>
                                <td>{bill.display_number()}</td>
                                <td>{bill.issued_on().map(|d| d.to_string()).unwrap_or_default()}</td>
                                <td>{bill.customer_name().to_string()}</td>
                                <td>{money(bill.final_amount)}</td>
                                <td>{money(bill.paid_amount)}</td>
                                <td>{money(bill.balance)}</td>
                                <td>{bill.payment_status.as_str()}</td>
                            </tr>
                        }
                    />
                </tbody>
            </table>
            <PaginationBar window=list.window total_items=list.total_items() />
        </section>
    }
}
