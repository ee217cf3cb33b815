//! Warranty Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::customer::CustomerRef;
use super::{de, UNKNOWN_CUSTOMER};

/// Warranties ending within this many days are flagged as expiring
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarrantyStatus {
    Active,
    Expiring,
    Expired,
    Unknown,
}

impl WarrantyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyStatus::Active => "Active",
            WarrantyStatus::Expiring => "Expiring",
            WarrantyStatus::Expired => "Expired",
            WarrantyStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warranty {
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::null_default")]
    pub product_name: String,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub serial_no: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub purchase_date: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub expiry_date: Option<String>,
    #[serde(default, deserialize_with = "de::relation")]
    pub users: Option<CustomerRef>,
}

impl Warranty {
    pub fn customer_name(&self) -> &str {
        self.users
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or(UNKNOWN_CUSTOMER)
    }

    pub fn status_on(&self, today: NaiveDate) -> WarrantyStatus {
        let Some(expiry) = self.expiry_date.as_deref().and_then(de::parse_date) else {
            return WarrantyStatus::Unknown;
        };
        let days_left = (expiry - today).num_days();
        if days_left < 0 {
            WarrantyStatus::Expired
        } else if days_left <= EXPIRING_WINDOW_DAYS {
            WarrantyStatus::Expiring
        } else {
            WarrantyStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warranty(expiry: Option<&str>) -> Warranty {
        Warranty {
            id: 1,
            product_name: "Inverter".to_string(),
            serial_no: None,
            purchase_date: None,
            expiry_date: expiry.map(str::to_string),
            users: None,
        }
    }

    #[test]
    fn test_status_boundaries() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(warranty(Some("2024-05-31")).status_on(today), WarrantyStatus::Expired);
        assert_eq!(warranty(Some("2024-06-01")).status_on(today), WarrantyStatus::Expiring);
        assert_eq!(warranty(Some("2024-07-01")).status_on(today), WarrantyStatus::Expiring);
        assert_eq!(warranty(Some("2024-07-02")).status_on(today), WarrantyStatus::Active);
        assert_eq!(warranty(None).status_on(today), WarrantyStatus::Unknown);
    }
}
