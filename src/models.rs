//! Frontend Models
//!
//! API payload types come from `shopdesk_core`; only view-level types live here.

pub use shopdesk_core::models::*;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Billing,
    Customers,
    Inventory,
    Services,
    Warranty,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Dashboard,
        Tab::Billing,
        Tab::Customers,
        Tab::Inventory,
        Tab::Services,
        Tab::Warranty,
        Tab::Reports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Billing => "Billing",
            Tab::Customers => "Customers",
            Tab::Inventory => "Inventory",
            Tab::Services => "Services",
            Tab::Warranty => "Warranty",
            Tab::Reports => "Reports",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}
