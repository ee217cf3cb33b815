//! Update Commands
//!
//! User actions go to the host fire-and-forget; their effect arrives later
//! as an event on the update channel.

use wasm_bindgen::prelude::*;
use shopdesk_core::update::{UpdateEvent, UpdatePhase, UPDATE_EVENT_CHANNEL};
use super::{invoke, listen_event};

/// Send a host update command; nothing comes back
pub async fn send_update_command(command: &'static str) {
    web_sys::console::log_1(&format!("[UPDATE] -> {}", command).into());
    let _ = invoke(command, JsValue::NULL).await;
}

/// Host phase, for catching up on events missed before the listener existed
pub async fn get_update_state() -> Result<UpdatePhase, String> {
    let result = invoke("get_update_state", JsValue::NULL).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn listen_update_events(on_event: impl FnMut(UpdateEvent) + 'static) -> Result<(), String> {
    listen_event(UPDATE_EVENT_CHANNEL, on_event).await
}
