//! Bill (Invoice) Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::customer::CustomerRef;
use super::{de, UNKNOWN_CUSTOMER};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Partial,
    #[default]
    Unpaid,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Unknown => "Unknown",
        }
    }

    /// Status implied by how much of `total` has been paid
    pub fn from_amounts(total: f64, paid: f64) -> Self {
        if paid >= total {
            PaymentStatus::Paid
        } else if paid > 0.0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Accepted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::optional_id")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub invoice_no: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub discount: f64,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub final_amount: f64,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub paid_amount: f64,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub balance: f64,
    #[serde(default, deserialize_with = "de::null_default")]
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "de::null_default")]
    pub status: InvoiceStatus,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::relation")]
    pub users: Option<CustomerRef>,
}

impl Bill {
    pub fn customer_name(&self) -> &str {
        self.users
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or(UNKNOWN_CUSTOMER)
    }

    pub fn customer_phone(&self) -> &str {
        self.users
            .as_ref()
            .and_then(|u| u.phone.as_deref())
            .unwrap_or("")
    }

    /// Issue date: `created_at`, falling back to `date`
    pub fn issued_on(&self) -> Option<NaiveDate> {
        self.created_at
            .as_deref()
            .and_then(de::parse_date)
            .or_else(|| self.date.as_deref().and_then(de::parse_date))
    }

    pub fn is_open(&self) -> bool {
        self.balance > 0.0
    }

    pub fn display_number(&self) -> String {
        self.invoice_no
            .clone()
            .unwrap_or_else(|| format!("INV-{:05}", self.id))
    }
}

/// Line item for `/billing/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillItemRequest {
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
}

/// Body of `/billing/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBillRequest {
    pub customer_id: i64,
    pub items: Vec<BillItemRequest>,
    pub total_amount: f64,
    pub discount: f64,
    pub final_amount: f64,
    pub paid_amount: f64,
    pub balance: f64,
    pub payment_status: PaymentStatus,
}

/// Body of `/billing/pay-due`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayDueRequest {
    pub bill_id: i64,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_defaults_missing_fields() {
        let bill: Bill = serde_json::from_str(
            r#"{"id": 3, "customer_id": "9", "balance": "250", "payment_status": null, "users": null}"#,
        )
        .unwrap();
        assert_eq!(bill.customer_id, Some(9));
        assert_eq!(bill.balance, 250.0);
        assert_eq!(bill.payment_status, PaymentStatus::Unpaid);
        assert_eq!(bill.status, InvoiceStatus::Accepted);
        assert_eq!(bill.customer_name(), UNKNOWN_CUSTOMER);
        assert_eq!(bill.customer_phone(), "");
        assert!(bill.is_open());
    }

    #[test]
    fn test_unknown_payment_status() {
        let bill: Bill = serde_json::from_str(r#"{"payment_status": "Refunded"}"#).unwrap();
        assert_eq!(bill.payment_status, PaymentStatus::Unknown);
    }

    #[test]
    fn test_issued_on_prefers_created_at() {
        let bill: Bill = serde_json::from_str(
            r#"{"created_at": "2024-03-05T09:00:00Z", "date": "2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(bill.issued_on(), NaiveDate::from_ymd_opt(2024, 3, 5));

        let bill: Bill = serde_json::from_str(r#"{"date": "2024-01-01"}"#).unwrap();
        assert_eq!(bill.issued_on(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_payment_status_from_amounts() {
        assert_eq!(PaymentStatus::from_amounts(100.0, 100.0), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from_amounts(100.0, 40.0), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::from_amounts(100.0, 0.0), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_display_number_fallback() {
        let bill: Bill = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(bill.display_number(), "INV-00042");
    }
}
