//! API Proxy Command
//!
//! Forwards one request to the shop server and hands back the JSON body.

use serde_json::Value;
use shopdesk_core::ipc::ApiRequest;
use tauri::State;

use crate::AppState;

#[tauri::command]
pub async fn api_request(state: State<'_, AppState>, request: ApiRequest) -> Result<Value, String> {
    let started = std::time::Instant::now();
    let result = state.api.send(&request).await;
    match &result {
        Ok(_) => tracing::debug!(
            method = ?request.method,
            path = %request.path,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api request ok"
        ),
        Err(e) => tracing::warn!(method = ?request.method, path = %request.path, error = %e, "api request failed"),
    }
    result.map_err(|e| e.to_string())
}
