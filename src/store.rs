//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Reference lists
//! shared by several pages are loaded once here and refreshed on reload.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::{Customer, Product, ServiceTask};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All customers
    pub customers: Vec<Customer>,
    /// All products with current stock
    pub products: Vec<Product>,
    /// All service tasks
    pub services: Vec<ServiceTask>,
    /// Host package version, empty until fetched
    pub app_version: String,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Apply a stock delta after a sale or restock without refetching
pub fn store_adjust_stock(store: &AppStore, product_id: i64, delta: i64) {
    if let Some(product) = store.products().write().iter_mut().find(|p| p.id == product_id) {
        product.stock += delta;
    }
}

/// Customer name by id, for forms that only hold the id
pub fn store_customer_name(store: &AppStore, customer_id: i64) -> Option<String> {
    store.customers().with(|list| {
        list.iter()
            .find(|c| c.id == customer_id)
            .map(|c| c.name.clone())
    })
}
