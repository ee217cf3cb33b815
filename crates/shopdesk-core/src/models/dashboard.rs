//! Dashboard Metrics Payload

use serde::{Deserialize, Serialize};

use super::de;

/// Body of `/dashboard/metrics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub today_sales: f64,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub month_sales: f64,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub total_due: f64,
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub low_stock_count: i64,
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub pending_services: i64,
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub total_customers: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_metrics_default_to_zero() {
        let m: DashboardMetrics = serde_json::from_str(r#"{"today_sales": "1500.50", "total_customers": 12}"#).unwrap();
        assert_eq!(m.today_sales, 1500.5);
        assert_eq!(m.total_customers, 12);
        assert_eq!(m.total_due, 0.0);
        assert_eq!(m.pending_services, 0);
    }
}
