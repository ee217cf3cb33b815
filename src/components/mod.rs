//! UI Components
//!
//! Pages and reusable Leptos components.

mod update_banner;
mod pagination_bar;
mod search_box;
mod toast_stack;
mod loading_screen;
mod reminder_bell;
mod dashboard;
mod billing;
mod customers;
mod inventory;
mod services;
mod warranty;
mod reports;

pub use update_banner::{dispatch_update_command, UpdateBanner};
pub use pagination_bar::PaginationBar;
pub use search_box::SearchBox;
pub use toast_stack::ToastStack;
pub use loading_screen::LoadingScreen;
pub use reminder_bell::ReminderBell;
pub use dashboard::DashboardPage;
pub use billing::BillingPage;
pub use customers::CustomersPage;
pub use inventory::InventoryPage;
pub use services::ServicesPage;
pub use warranty::WarrantyPage;
pub use reports::ReportsPage;

use chrono::NaiveDate;

/// Local calendar date
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Parse a numeric form field; blank means zero
pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{}' is not a number", raw))
}
