//! App Commands
//!
//! Version and UI tunables from the host.

use wasm_bindgen::prelude::*;
use shopdesk_core::ipc::UiConfig;
use super::invoke;

pub async fn get_app_version() -> Result<String, String> {
    let result = invoke("get_app_version", JsValue::NULL).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn get_ui_config() -> Result<UiConfig, String> {
    let result = invoke("get_ui_config", JsValue::NULL).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
