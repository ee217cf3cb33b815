//! Derived Aggregators
//!
//! Pure folds from raw record lists into the rollups the pages render.
//! Each is recomputed whenever its input collection changes.

mod heatmap;
mod ledger;
mod restock;
mod revenue;
mod technician;

pub use heatmap::{DensityTier, HeatCell, ServiceHeatmap};
pub use ledger::{customer_ledgers, CustomerLedger, UNATTRIBUTED_CUSTOMER_ID};
pub use restock::{restock_by_date, RestockPoint};
pub use revenue::{monthly_revenue, MonthlyRevenue, MONTHS};
pub use technician::{task_type_distribution, technician_performance, TaskTypeShare, TechnicianStats};

/// `part` as a whole percentage of `whole`, 0 when `whole` is 0
pub(crate) fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn test_percent_rounds_to_nearest() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(5, 5), 100);
    }
}
