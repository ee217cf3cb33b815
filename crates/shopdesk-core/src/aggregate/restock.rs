//! Restock-by-Date Chart Series

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{de, RestockEntry};

/// One bar in the restock chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestockPoint {
    /// Short label, e.g. `Jun 1`
    pub date: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
}

pub fn chart_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Total restocked quantity per calendar day, oldest first
pub fn restock_by_date(entries: &[RestockEntry]) -> Vec<RestockPoint> {
    let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for entry in entries {
        if let Some(day) = de::parse_date(&entry.date) {
            *by_day.entry(day).or_default() += entry.qty;
        }
    }
    by_day
        .into_iter()
        .map(|(day, quantity)| RestockPoint {
            date: chart_label(day),
            quantity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, qty: i64) -> RestockEntry {
        RestockEntry {
            product_id: Some(1),
            date: date.to_string(),
            qty,
        }
    }

    #[test]
    fn test_same_day_entries_merge() {
        let points = restock_by_date(&[entry("2024-06-01", 5), entry("2024-06-01", 3)]);
        assert_eq!(points, vec![RestockPoint { date: "Jun 1".into(), quantity: 8 }]);

        let json = serde_json::to_value(&points[0]).unwrap();
        assert_eq!(json, serde_json::json!({"date": "Jun 1", "Quantity": 8}));
    }

    #[test]
    fn test_sorted_by_date_with_timestamps() {
        let points = restock_by_date(&[
            entry("2024-06-12T08:00:00Z", 2),
            entry("2024-05-30", 1),
            entry("garbage", 100),
        ]);
        let labels: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(labels, vec!["May 30", "Jun 12"]);
    }
}
