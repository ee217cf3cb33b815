//! Remote API Commands
//!
//! Every request is proxied through the host's `api_request` command.
//! Failures come back as `Err(String)` for the caller to toast.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shopdesk_core::ipc::{paths, ApiRequest, ConnectionStatus, CONNECTION_EVENT_CHANNEL};

use crate::models::{
    Bill, CreateBillRequest, Customer, DashboardMetrics, PayDueRequest, Product, RestockEntry,
    RestockRequest, ServiceTask, Warranty,
};
use super::{js_error, listen_event, to_args, try_invoke};

#[derive(Serialize)]
struct ApiArgs<'a> {
    request: &'a ApiRequest,
}

async fn send<T: DeserializeOwned>(request: ApiRequest) -> Result<T, String> {
    let js_args = to_args(&ApiArgs { request: &request })?;
    let result = try_invoke("api_request", js_args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result)
        .map_err(|e| format!("Unexpected response from {}: {}", request.path, e))
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    send(ApiRequest::get(path)).await
}

async fn post<B: Serialize>(path: &str, body: &B) -> Result<Value, String> {
    let request = ApiRequest::post(path, body).map_err(|e| e.to_string())?;
    send(request).await
}

// ========================
// Reads
// ========================

pub async fn list_customers() -> Result<Vec<Customer>, String> {
    get(paths::CUSTOMERS).await
}

pub async fn list_products() -> Result<Vec<Product>, String> {
    get(paths::PRODUCTS).await
}

pub async fn list_restock_log() -> Result<Vec<RestockEntry>, String> {
    get(paths::RESTOCK).await
}

pub async fn sales_report() -> Result<Vec<Bill>, String> {
    get(paths::BILL_REPORT).await
}

pub async fn list_debtors() -> Result<Vec<Bill>, String> {
    get(paths::BILL_DEBTORS).await
}

pub async fn bill_history() -> Result<Vec<Bill>, String> {
    get(paths::BILL_HISTORY).await
}

pub async fn list_services() -> Result<Vec<ServiceTask>, String> {
    get(paths::SERVICES).await
}

pub async fn upcoming_services() -> Result<Vec<ServiceTask>, String> {
    get(paths::SERVICES_UPCOMING).await
}

/// Tasks with technician assignments, for the performance rollup
pub async fn service_report() -> Result<Vec<ServiceTask>, String> {
    get(paths::SERVICE_REPORT).await
}

pub async fn list_warranties() -> Result<Vec<Warranty>, String> {
    get(paths::WARRANTIES).await
}

pub async fn dashboard_metrics() -> Result<DashboardMetrics, String> {
    get(paths::DASHBOARD_METRICS).await
}

/// Bills feeding the monthly revenue chart
pub async fn revenue_bills() -> Result<Vec<Bill>, String> {
    get(paths::DASHBOARD_REVENUE).await
}

// ========================
// Writes
// ========================

pub async fn create_bill(request: &CreateBillRequest) -> Result<Value, String> {
    post(paths::BILL_CREATE, request).await
}

pub async fn pay_due(request: &PayDueRequest) -> Result<Value, String> {
    post(paths::BILL_PAY_DUE, request).await
}

pub async fn restock(request: &RestockRequest) -> Result<Value, String> {
    post(paths::RESTOCK, request).await
}

// ========================
// Events
// ========================

pub async fn listen_connection(on_status: impl FnMut(ConnectionStatus) + 'static) -> Result<(), String> {
    listen_event(CONNECTION_EVENT_CHANNEL, on_status).await
}
