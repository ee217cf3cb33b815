//! Search Filtering
//!
//! Case-insensitive substring match applied to lists once the debounced
//! query settles.

use crate::aggregate::CustomerLedger;
use crate::models::{Bill, Customer, Product, ServiceTask, Warranty};

pub trait Searchable {
    /// Fields the query is matched against
    fn search_fields(&self) -> Vec<&str>;
}

pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Items matching `query`; an empty query keeps everything
pub fn filter_items<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    items.iter().filter(|i| matches(*i, query)).cloned().collect()
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.phone.as_deref());
        fields.extend(self.email.as_deref());
        fields
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.sku.as_deref());
        fields.extend(self.category.as_deref());
        fields
    }
}

impl Searchable for Bill {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.customer_name(),
            self.customer_phone(),
            self.payment_status.as_str(),
        ];
        fields.extend(self.invoice_no.as_deref());
        fields
    }
}

impl Searchable for CustomerLedger {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str()]
    }
}

impl Searchable for ServiceTask {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer_name(), self.technician(), self.kind()]
    }
}

impl Searchable for Warranty {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.product_name.as_str(), self.customer_name()];
        fields.extend(self.serial_no.as_deref());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> Vec<Customer> {
        serde_json::from_str(
            r#"[
                {"id": 1, "name": "Asha Rao", "phone": "98450 11111"},
                {"id": 2, "name": "Ravi Kumar", "phone": null},
                {"id": 3, "name": "Meena", "email": "meena@example.com"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_case_insensitive_name_and_phone() {
        let all = customers();
        let ids = |q: &str| filter_items(&all, q).iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids("asha"), vec![1]);
        assert_eq!(ids("KUMAR"), vec![2]);
        assert_eq!(ids("11111"), vec![1]);
        assert_eq!(ids("example"), vec![3]);
        assert_eq!(ids("  "), vec![1, 2, 3]);
        assert!(ids("zzz").is_empty());
    }

    #[test]
    fn test_settled_query_restarts_paging() {
        use crate::debounce::Debouncer;
        use crate::pagination::PageWindow;

        let all: Vec<Customer> = (1..=30)
            .map(|id| Customer {
                id,
                name: if id % 10 == 0 { format!("Asha {id}") } else { format!("Customer {id}") },
                phone: None,
                email: None,
                address: None,
            })
            .collect();

        let mut window = PageWindow::new(10);
        window.go_to(3, all.len());
        let mut applied = String::new();
        let mut debouncer = Debouncer::new(500);
        let mut filtered_with = Vec::new();

        for (at, typed) in [(0, "a"), (100, "as"), (200, "ash"), (300, "asha")] {
            debouncer.input(typed.to_string(), at);
            // Nothing has settled while keys keep coming
            assert_eq!(debouncer.poll(at + 99), None);
        }
        if let Some(query) = debouncer.poll(800) {
            filtered_with.push(query.clone());
            if query != applied {
                window.reset();
                applied = query;
            }
        }
        assert_eq!(filtered_with, vec!["asha".to_string()]);
        assert_eq!(window.page(), 1);

        let hits = filter_items(&all, &applied);
        let slice = window.project(&hits);
        assert_eq!(slice.visible.iter().map(|c| c.id).collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(slice.total_pages, 1);
    }

    #[test]
    fn test_product_sku_search() {
        let products: Vec<Product> =
            serde_json::from_str(r#"[{"id": 1, "name": "Battery", "sku": "BT-100"}]"#).unwrap();
        assert_eq!(filter_items(&products, "bt-1").len(), 1);
    }
}
