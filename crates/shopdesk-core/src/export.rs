//! CSV Export
//!
//! Builds the sales report and debtors list entirely client-side. Fields are
//! quoted per RFC 4180 when they contain a comma, quote or line break.

use chrono::NaiveDate;

use crate::aggregate::CustomerLedger;
use crate::models::Bill;

pub const SALES_REPORT_HEADERS: [&str; 7] =
    ["Invoice No", "Date", "Customer", "Total", "Paid", "Balance", "Status"];
pub const DEBTORS_HEADERS: [&str; 4] = ["Customer", "Phone", "Open Bills", "Total Due"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales,
    Debtors,
}

impl ReportKind {
    fn slug(&self) -> &'static str {
        match self {
            ReportKind::Sales => "sales-report",
            ReportKind::Debtors => "debtors",
        }
    }
}

pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f.as_ref())).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn sales_report_csv(bills: &[Bill]) -> String {
    let mut out = String::new();
    push_row(&mut out, &SALES_REPORT_HEADERS);
    for bill in bills {
        let date = bill
            .issued_on()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        push_row(
            &mut out,
            &[
                bill.display_number(),
                date,
                bill.customer_name().to_string(),
                money(bill.final_amount),
                money(bill.paid_amount),
                money(bill.balance),
                bill.payment_status.as_str().to_string(),
            ],
        );
    }
    out
}

/// Debtors only: ledgers with nothing due are left out
pub fn debtors_csv(ledgers: &[CustomerLedger]) -> String {
    let mut out = String::new();
    push_row(&mut out, &DEBTORS_HEADERS);
    for ledger in ledgers.iter().filter(|l| l.is_debtor()) {
        let open = ledger.open_bills.iter().filter(|b| b.is_open()).count();
        push_row(
            &mut out,
            &[
                ledger.name.clone(),
                ledger.phone.clone(),
                open.to_string(),
                money(ledger.due),
            ],
        );
    }
    out
}

pub fn export_file_name(kind: ReportKind, on: NaiveDate) -> String {
    format!("{}-{}.csv", kind.slug(), on.format("%Y-%m-%d"))
}
