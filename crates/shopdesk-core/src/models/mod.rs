//! API Models
//!
//! Payload shapes returned by the remote API. Every field the server may
//! omit or send as `null` has an explicit default here.

pub mod de;

mod bill;
mod customer;
mod dashboard;
mod product;
mod service;
mod warranty;

pub use bill::{Bill, BillItemRequest, CreateBillRequest, InvoiceStatus, PayDueRequest, PaymentStatus};
pub use customer::{Customer, CustomerRef, EmployeeRef};
pub use dashboard::DashboardMetrics;
pub use product::{low_stock, Product, RestockEntry, RestockRequest};
pub use service::ServiceTask;
pub use warranty::{Warranty, WarrantyStatus, EXPIRING_WINDOW_DAYS};

/// Shown when a bill has no joined customer
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";
/// Shown when a task has no joined employee
pub const UNASSIGNED: &str = "Unassigned";
/// Task type used when the server sends none
pub const GENERAL_TASK: &str = "General";
