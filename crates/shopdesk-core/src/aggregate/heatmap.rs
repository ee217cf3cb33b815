//! Service Calendar Heatmap
//!
//! Per-day task counts for one displayed month, bucketed into four density
//! tiers for the calendar view.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;
use crate::models::ServiceTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DensityTier {
    Empty,
    Low,
    Medium,
    High,
}

impl DensityTier {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => DensityTier::Empty,
            1 => DensityTier::Low,
            2..=3 => DensityTier::Medium,
            _ => DensityTier::High,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DensityTier::Empty => "heat-empty",
            DensityTier::Low => "heat-low",
            DensityTier::Medium => "heat-medium",
            DensityTier::High => "heat-high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub day: u32,
    pub count: usize,
    pub tier: DensityTier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHeatmap {
    first: NaiveDate,
    days: u32,
    counts: BTreeMap<u32, usize>,
}

impl ServiceHeatmap {
    pub fn build(tasks: &[ServiceTask], year: i32, month: u32) -> Result<Self, CoreError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CoreError::InvalidMonth(month))?;
        let days = days_in_month(first);

        let mut counts = BTreeMap::new();
        for date in tasks.iter().filter_map(ServiceTask::scheduled_on) {
            if date.year() == year && date.month() == month {
                *counts.entry(date.day()).or_default() += 1;
            }
        }
        Ok(Self { first, days, counts })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        self.days
    }

    pub fn count(&self, day: u32) -> usize {
        self.counts.get(&day).copied().unwrap_or(0)
    }

    pub fn tier(&self, day: u32) -> DensityTier {
        DensityTier::from_count(self.count(day))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Blank cells before day 1 in a Sunday-first grid
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn cells(&self) -> Vec<HeatCell> {
        (1..=self.days)
            .map(|day| HeatCell {
                day,
                count: self.count(day),
                tier: self.tier(day),
            })
            .collect()
    }

    /// Same view shifted by `delta` months
    pub fn shifted(year: i32, month: u32, delta: i32) -> (i32, u32) {
        let zero_based = year * 12 + month as i32 - 1 + delta;
        (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map(|n| (n - first).num_days() as u32).unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(date: Option<&str>) -> ServiceTask {
        serde_json::from_value(serde_json::json!({ "service_date": date })).unwrap()
    }

    #[test]
    fn test_tiers() {
        assert_eq!(DensityTier::from_count(0), DensityTier::Empty);
        assert_eq!(DensityTier::from_count(1), DensityTier::Low);
        assert_eq!(DensityTier::from_count(2), DensityTier::Medium);
        assert_eq!(DensityTier::from_count(3), DensityTier::Medium);
        assert_eq!(DensityTier::from_count(4), DensityTier::High);
        assert_eq!(DensityTier::from_count(40), DensityTier::High);
    }

    #[test]
    fn test_counts_only_displayed_month() {
        let tasks = vec![
            task(Some("2024-02-10")),
            task(Some("2024-02-10")),
            task(Some("2024-02-29")),
            task(Some("2024-03-10")),
            task(Some("2023-02-10")),
            task(None),
            task(Some("not a date")),
        ];
        let map = ServiceHeatmap::build(&tasks, 2024, 2).unwrap();
        assert_eq!(map.days_in_month(), 29);
        assert_eq!(map.count(10), 2);
        assert_eq!(map.tier(10), DensityTier::Medium);
        assert_eq!(map.count(29), 1);
        assert_eq!(map.count(11), 0);
        assert_eq!(map.total(), 3);
        assert_eq!(map.cells().len(), 29);
    }

    #[test]
    fn test_grid_offset_and_invalid_month() {
        // 1 June 2024 was a Saturday
        let map = ServiceHeatmap::build(&[], 2024, 6).unwrap();
        assert_eq!(map.leading_blanks(), 6);
        assert_eq!(map.days_in_month(), 30);
        assert_eq!(ServiceHeatmap::build(&[], 2024, 13), Err(CoreError::InvalidMonth(13)));
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        assert_eq!(ServiceHeatmap::shifted(2024, 12, 1), (2025, 1));
        assert_eq!(ServiceHeatmap::shifted(2024, 1, -1), (2023, 12));
        assert_eq!(ServiceHeatmap::shifted(2024, 6, 0), (2024, 6));
    }
}
