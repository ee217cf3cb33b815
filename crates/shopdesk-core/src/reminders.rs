//! Service Reminders
//!
//! The single definition of "due tomorrow", shared by the start-up
//! notification and the bell dropdown.

use chrono::{Days, NaiveDate};

use crate::models::ServiceTask;

/// Open tasks scheduled for the day after `today`
pub fn due_tomorrow(tasks: &[ServiceTask], today: NaiveDate) -> Vec<&ServiceTask> {
    let Some(tomorrow) = today.checked_add_days(Days::new(1)) else {
        return Vec::new();
    };
    tasks
        .iter()
        .filter(|t| !t.is_completed() && t.scheduled_on() == Some(tomorrow))
        .collect()
}

pub fn reminder_message(task: &ServiceTask) -> String {
    format!(
        "{} service for {} is due tomorrow (assigned to {})",
        task.kind(),
        task.customer_name(),
        task.technician()
    )
}

/// Notification body summarizing all reminders, `None` when there are none
pub fn summary(due: &[&ServiceTask]) -> Option<String> {
    match due.len() {
        0 => None,
        1 => Some(reminder_message(due[0])),
        n => Some(format!("{n} services are due tomorrow")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, date: &str, status: &str) -> ServiceTask {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "service_date": date,
            "status": status,
            "task_type": "Repair",
            "users": {"name": "Asha"},
        }))
        .unwrap()
    }

    #[test]
    fn test_due_tomorrow_filters() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let tasks = vec![
            task(1, "2024-07-01", "Pending"),
            task(2, "2024-07-01T09:30:00", "In Progress"),
            task(3, "2024-07-01", "Completed"),
            task(4, "2024-06-30", "Pending"),
            task(5, "2024-07-02", "Pending"),
        ];
        let ids: Vec<i64> = due_tomorrow(&tasks, today).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_summary_text() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let tasks = vec![task(1, "2024-07-01", "Pending")];
        let due = due_tomorrow(&tasks, today);
        assert_eq!(
            summary(&due).as_deref(),
            Some("Repair service for Asha is due tomorrow (assigned to Unassigned)")
        );
        assert_eq!(summary(&[]), None);
    }
}
