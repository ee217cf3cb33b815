//! Host <-> UI Contract
//!
//! Channel names and payloads exchanged over Tauri IPC, defined once so both
//! ends agree on them. Update messages live in [`crate::update`].

use serde::{Deserialize, Serialize};

use crate::cache::DASHBOARD_TTL_MS;
use crate::clock::Millis;
use crate::debounce::DEFAULT_DELAY_MS;
use crate::pagination::PageWindow;
use crate::update::UPDATE_GRACE_PERIOD_MS;

/// Host -> UI heartbeat channel
pub const CONNECTION_EVENT_CHANNEL: &str = "connection://status";

/// Health endpoint pinged by the heartbeat
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub online: bool,
    /// RFC 3339 timestamp of the check
    pub checked_at: String,
}

/// UI tunables, served by the host from its config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub dashboard_ttl_ms: Millis,
    pub search_debounce_ms: Millis,
    pub items_per_page: usize,
    pub update_grace_period_ms: Millis,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dashboard_ttl_ms: DASHBOARD_TTL_MS,
            search_debounce_ms: DEFAULT_DELAY_MS,
            items_per_page: PageWindow::DEFAULT_PER_PAGE,
            update_grace_period_ms: UPDATE_GRACE_PERIOD_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

/// One remote API call, proxied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub method: ApiMethod,
    /// Relative path such as `/customers/`
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: ApiMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: ApiMethod::Post,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }
}

/// Remote API paths
pub mod paths {
    pub const CUSTOMERS: &str = "/customers/";
    pub const PRODUCTS: &str = "/inventory/products";
    pub const RESTOCK: &str = "/inventory/restock";
    pub const BILL_CREATE: &str = "/billing/create";
    pub const BILL_PAY_DUE: &str = "/billing/pay-due";
    pub const BILL_REPORT: &str = "/billing/report";
    pub const BILL_DEBTORS: &str = "/billing/debtors";
    pub const BILL_HISTORY: &str = "/billing/history";
    pub const SERVICES: &str = "/services/";
    pub const SERVICES_UPCOMING: &str = "/services/upcoming";
    pub const WARRANTIES: &str = "/warranty/list";
    pub const SERVICE_REPORT: &str = "/reports/services";
    pub const DASHBOARD_METRICS: &str = "/dashboard/metrics";
    pub const DASHBOARD_REVENUE: &str = "/dashboard/revenue";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_config_defaults_fill_gaps() {
        let config: UiConfig = serde_json::from_str(r#"{"items_per_page": 25}"#).unwrap();
        assert_eq!(config.items_per_page, 25);
        assert_eq!(config.dashboard_ttl_ms, 300_000);
        assert_eq!(config.search_debounce_ms, 500);
    }

    #[test]
    fn test_api_request_wire_format() {
        let req = ApiRequest::post(paths::BILL_PAY_DUE, &serde_json::json!({"bill_id": 1, "amount": 50.0})).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["method"], "POST");
        assert_eq!(json["path"], "/billing/pay-due");

        let get: ApiRequest = serde_json::from_str(r#"{"path": "/customers/"}"#).unwrap();
        assert_eq!(get, ApiRequest::get("/customers/"));
    }
}
