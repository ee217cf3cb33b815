//! Inventory Models

use serde::{Deserialize, Serialize};

use super::de;

fn default_reorder_level() -> i64 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub price: f64,
    #[serde(default, alias = "quantity", deserialize_with = "de::lenient_i64")]
    pub stock: i64,
    #[serde(default = "default_reorder_level", deserialize_with = "de::lenient_i64")]
    pub reorder_level: i64,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_level
    }
}

/// One restock event from `/inventory/restock`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockEntry {
    #[serde(default, deserialize_with = "de::optional_id")]
    pub product_id: Option<i64>,
    #[serde(default, alias = "created_at", deserialize_with = "de::null_default")]
    pub date: String,
    #[serde(default, alias = "quantity", deserialize_with = "de::lenient_i64")]
    pub qty: i64,
}

/// Body of a `POST /inventory/restock`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// Products at or below their reorder level, lowest stock first
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    let mut low: Vec<&Product> = products.iter().filter(|p| p.is_low_stock()).collect();
    low.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));
    low
}
