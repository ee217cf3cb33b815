//! Monthly Revenue Series

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::models::Bill;

/// Month labels indexed by `month0`
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub month: &'static str,
    /// 1 = January
    pub month_index: u32,
    pub revenue: f64,
}

/// Sum `final_amount` per calendar month, January first.
/// Bills whose date cannot be read are left out.
pub fn monthly_revenue(bills: &[Bill]) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();
    for bill in bills {
        match bill.issued_on() {
            Some(date) => *by_month.entry(date.month()).or_default() += bill.final_amount,
            None => tracing::debug!(bill_id = bill.id, "bill without readable date"),
        }
    }

    by_month
        .into_iter()
        .map(|(month_index, revenue)| MonthlyRevenue {
            month: MONTHS[(month_index - 1) as usize],
            month_index,
            revenue,
        })
        .collect()
}
