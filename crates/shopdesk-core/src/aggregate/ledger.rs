//! Customer Ledger Rollup
//!
//! Open bills come from the debtors list, closed bills from billing history
//! filtered to `Paid`. A customer only appears if at least one bill of either
//! kind references them. Bills with no `customer_id` share one placeholder
//! ledger so every open balance is accounted for.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Bill, PaymentStatus, UNKNOWN_CUSTOMER};

/// Ledger id for bills that reference no customer. Real ids are positive.
pub const UNATTRIBUTED_CUSTOMER_ID: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerLedger {
    pub customer_id: i64,
    pub name: String,
    pub phone: String,
    /// Sum of `balance` over open bills
    pub due: f64,
    pub open_bills: Vec<Bill>,
    pub closed_bills: Vec<Bill>,
}

impl CustomerLedger {
    fn new(customer_id: i64, bill: &Bill) -> Self {
        Self {
            customer_id,
            name: bill.customer_name().to_string(),
            phone: bill.customer_phone().to_string(),
            due: 0.0,
            open_bills: Vec::new(),
            closed_bills: Vec::new(),
        }
    }

    fn unattributed() -> Self {
        Self {
            customer_id: UNATTRIBUTED_CUSTOMER_ID,
            name: UNKNOWN_CUSTOMER.to_string(),
            phone: String::new(),
            due: 0.0,
            open_bills: Vec::new(),
            closed_bills: Vec::new(),
        }
    }

    pub fn is_unattributed(&self) -> bool {
        self.customer_id == UNATTRIBUTED_CUSTOMER_ID
    }

    pub fn is_debtor(&self) -> bool {
        self.open_bills.iter().any(Bill::is_open)
    }

    pub fn bill_count(&self) -> usize {
        self.open_bills.len() + self.closed_bills.len()
    }

    /// Every bill, open first
    pub fn bills(&self) -> impl Iterator<Item = &Bill> {
        self.open_bills.iter().chain(self.closed_bills.iter())
    }
}

/// Group open (`debtors`) and paid (`history`) bills per customer.
/// Bills without a `customer_id` are collected under
/// [`UNATTRIBUTED_CUSTOMER_ID`]. Output is ordered by `due` descending, then name.
pub fn customer_ledgers(debtors: &[Bill], history: &[Bill]) -> Vec<CustomerLedger> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut ledgers: Vec<CustomerLedger> = Vec::new();

    let mut entry = |bill: &Bill| -> usize {
        let customer_id = bill.customer_id.unwrap_or_else(|| {
            tracing::debug!(bill_id = bill.id, "bill without customer");
            UNATTRIBUTED_CUSTOMER_ID
        });
        *index.entry(customer_id).or_insert_with(|| {
            ledgers.push(if customer_id == UNATTRIBUTED_CUSTOMER_ID {
                CustomerLedger::unattributed()
            } else {
                CustomerLedger::new(customer_id, bill)
            });
            ledgers.len() - 1
        })
    };

    let open: Vec<_> = debtors.iter().map(|bill| (entry(bill), bill)).collect();
    let closed: Vec<_> = history
        .iter()
        .filter(|b| b.payment_status == PaymentStatus::Paid)
        .map(|bill| (entry(bill), bill))
        .collect();

    for (slot, bill) in open {
        let ledger = &mut ledgers[slot];
        ledger.due += bill.balance;
        ledger.open_bills.push(bill.clone());
    }
    for (slot, bill) in closed {
        ledgers[slot].closed_bills.push(bill.clone());
    }

    // Prefer a real name if the first bill seen had no joined customer.
    for ledger in ledgers.iter_mut().filter(|l| !l.is_unattributed()) {
        let named = ledger
            .bills()
            .find(|b| b.users.as_ref().and_then(|u| u.name.as_ref()).is_some())
            .map(|b| (b.customer_name().to_string(), b.customer_phone().to_string()));
        if let Some((name, phone)) = named {
            ledger.name = name;
            ledger.phone = phone;
        }
    }

    ledgers.sort_by(|a, b| {
        b.due
            .total_cmp(&a.due)
            .then_with(|| a.name.cmp(&b.name))
    });
    ledgers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerRef, UNKNOWN_CUSTOMER};

    fn bill(id: i64, customer: Option<i64>, balance: f64, status: PaymentStatus, name: Option<&str>) -> Bill {
        Bill {
            id,
            customer_id: customer,
            invoice_no: None,
            total_amount: 1000.0,
            discount: 0.0,
            final_amount: 1000.0,
            paid_amount: 1000.0 - balance,
            balance,
            payment_status: status,
            status: Default::default(),
            created_at: Some("2024-06-01".to_string()),
            date: None,
            users: name.map(|n| CustomerRef {
                name: Some(n.to_string()),
                phone: Some("555".to_string()),
            }),
        }
    }

    #[test]
    fn test_due_matches_open_balances() {
        let debtors = vec![
            bill(1, Some(10), 400.0, PaymentStatus::Partial, Some("Asha")),
            bill(2, Some(10), 100.0, PaymentStatus::Unpaid, Some("Asha")),
            bill(3, Some(20), 250.0, PaymentStatus::Unpaid, Some("Ravi")),
        ];
        let history = vec![
            bill(4, Some(20), 0.0, PaymentStatus::Paid, Some("Ravi")),
            bill(5, Some(30), 0.0, PaymentStatus::Paid, Some("Meena")),
        ];

        let ledgers = customer_ledgers(&debtors, &history);
        let total_due: f64 = ledgers.iter().map(|l| l.due).sum();
        let open_balance: f64 = debtors.iter().map(|b| b.balance).sum();
        assert_eq!(total_due, open_balance);

        let names: Vec<&str> = ledgers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "Ravi", "Meena"]);

        let ravi = &ledgers[1];
        assert_eq!(ravi.open_bills.len(), 1);
        assert_eq!(ravi.closed_bills.len(), 1);
        assert_eq!(ravi.bill_count(), 2);
        assert!(ravi.is_debtor());

        let meena = &ledgers[2];
        assert_eq!(meena.due, 0.0);
        assert!(!meena.is_debtor());
    }

    #[test]
    fn test_unpaid_history_is_not_closed() {
        let history = vec![
            bill(1, Some(10), 300.0, PaymentStatus::Partial, Some("Asha")),
            bill(2, Some(11), 0.0, PaymentStatus::Unknown, Some("Ravi")),
        ];
        assert!(customer_ledgers(&[], &history).is_empty());
    }

    #[test]
    fn test_customer_without_bills_absent() {
        let debtors = vec![bill(1, Some(10), 50.0, PaymentStatus::Unpaid, Some("Asha"))];
        let ledgers = customer_ledgers(&debtors, &[]);
        assert_eq!(ledgers.len(), 1);
        assert!(ledgers.iter().all(|l| l.bill_count() > 0));
    }

    #[test]
    fn test_missing_relation_uses_placeholder_then_real_name() {
        let debtors = vec![bill(1, Some(10), 50.0, PaymentStatus::Unpaid, None)];
        let ledgers = customer_ledgers(&debtors, &[]);
        assert_eq!(ledgers[0].name, UNKNOWN_CUSTOMER);

        let history = vec![bill(2, Some(10), 0.0, PaymentStatus::Paid, Some("Asha"))];
        let ledgers = customer_ledgers(&debtors, &history);
        assert_eq!(ledgers[0].name, "Asha");
        assert_eq!(ledgers[0].phone, "555");
    }

    #[test]
    fn test_unattributed_bills_keep_due_total() {
        let debtors = vec![
            bill(1, Some(10), 400.0, PaymentStatus::Partial, Some("Asha")),
            bill(2, None, 250.0, PaymentStatus::Unpaid, Some("Walk-in")),
        ];
        let history = vec![bill(3, None, 0.0, PaymentStatus::Paid, None)];

        let ledgers = customer_ledgers(&debtors, &history);
        let total_due: f64 = ledgers.iter().map(|l| l.due).sum();
        let open_balance: f64 = debtors.iter().map(|b| b.balance).sum();
        assert_eq!(total_due, open_balance);

        let unknown = ledgers.iter().find(|l| l.is_unattributed()).unwrap();
        assert_eq!(unknown.customer_id, UNATTRIBUTED_CUSTOMER_ID);
        assert_eq!(unknown.name, UNKNOWN_CUSTOMER);
        assert_eq!(unknown.due, 250.0);
        assert_eq!(unknown.bill_count(), 2);
    }
}
