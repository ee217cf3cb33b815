//! Technician Performance and Task-Type Distribution

use std::collections::HashMap;

use serde::Serialize;

use super::percent;
use crate::models::ServiceTask;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicianStats {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    /// Whole percent, 0 when `total` is 0
    pub completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTypeShare {
    pub task_type: String,
    pub count: usize,
    pub percentage: u32,
}

/// Tasks per technician, busiest first
pub fn technician_performance(tasks: &[ServiceTask]) -> Vec<TechnicianStats> {
    let mut by_name: HashMap<&str, (usize, usize)> = HashMap::new();
    for task in tasks {
        let counts = by_name.entry(task.technician()).or_default();
        counts.0 += 1;
        if task.is_completed() {
            counts.1 += 1;
        }
    }

    let mut stats: Vec<TechnicianStats> = by_name
        .into_iter()
        .map(|(name, (total, completed))| TechnicianStats {
            name: name.to_string(),
            total,
            completed,
            completion_rate: percent(completed, total),
        })
        .collect();
    stats.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    stats
}

/// Share of each task type in the whole collection, largest first
pub fn task_type_distribution(tasks: &[ServiceTask]) -> Vec<TaskTypeShare> {
    let mut by_type: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        *by_type.entry(task.kind()).or_default() += 1;
    }

    let grand_total = tasks.len();
    let mut shares: Vec<TaskTypeShare> = by_type
        .into_iter()
        .map(|(task_type, count)| TaskTypeShare {
            task_type: task_type.to_string(),
            count,
            percentage: percent(count, grand_total),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.task_type.cmp(&b.task_type)));
    shares
}
