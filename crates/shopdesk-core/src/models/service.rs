//! Service Task Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::customer::{CustomerRef, EmployeeRef};
use super::{de, GENERAL_TASK, UNASSIGNED, UNKNOWN_CUSTOMER};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTask {
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::optional_id")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub task_type: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub status: String,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub service_date: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::relation")]
    pub employees: Option<EmployeeRef>,
    #[serde(default, deserialize_with = "de::relation")]
    pub users: Option<CustomerRef>,
}

impl ServiceTask {
    pub const COMPLETED: &'static str = "Completed";

    pub fn is_completed(&self) -> bool {
        self.status == Self::COMPLETED
    }

    pub fn technician(&self) -> &str {
        self.employees
            .as_ref()
            .and_then(|e| e.name.as_deref())
            .unwrap_or(UNASSIGNED)
    }

    pub fn kind(&self) -> &str {
        self.task_type.as_deref().unwrap_or(GENERAL_TASK)
    }

    pub fn customer_name(&self) -> &str {
        self.users
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or(UNKNOWN_CUSTOMER)
    }

    pub fn scheduled_on(&self) -> Option<NaiveDate> {
        self.service_date.as_deref().and_then(de::parse_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_for_missing_relations() {
        let task: ServiceTask = serde_json::from_str(r#"{"id": 1, "employees": null}"#).unwrap();
        assert_eq!(task.technician(), UNASSIGNED);
        assert_eq!(task.kind(), GENERAL_TASK);
        assert_eq!(task.customer_name(), UNKNOWN_CUSTOMER);
        assert!(!task.is_completed());
    }

    #[test]
    fn test_joined_employee() {
        let task: ServiceTask = serde_json::from_str(
            r#"{"id": 2, "status": "Completed", "employees": [{"name": "Kiran"}], "service_date": "2024-07-09"}"#,
        )
        .unwrap();
        assert_eq!(task.technician(), "Kiran");
        assert!(task.is_completed());
        assert_eq!(task.scheduled_on(), NaiveDate::from_ymd_opt(2024, 7, 9));
    }
}
