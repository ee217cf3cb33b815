//! Tauri Command Wrappers
//!
//! Frontend bindings to host commands and event channels, organized by domain.

mod api;
mod app;
mod update;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> JsValue;

    /// `invoke` that surfaces a command's `Err` instead of throwing
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], js_name = invoke, catch)]
    async fn try_invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> JsValue;
}

// Re-export all public items
pub use api::*;
pub use app::*;
pub use update::*;

/// Serialize command arguments as plain JSON objects (not JS `Map`s)
pub(crate) fn to_args<T: Serialize>(args: &T) -> Result<JsValue, String> {
    args.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

pub(crate) fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// Subscribe to a host event channel for the rest of the session
pub async fn listen_event<T, F>(channel: &'static str, mut on_event: F) -> Result<(), String>
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<T>>(raw) {
            Ok(envelope) => on_event(envelope.payload),
            Err(e) => web_sys::console::warn_1(
                &format!("[EVENT] Bad payload on {}: {}", channel, e).into(),
            ),
        }
    });
    let unlisten = listen(channel, &handler).await;
    handler.forget();
    if unlisten.is_function() {
        Ok(())
    } else {
        Err(format!("Failed to subscribe to {}", channel))
    }
}
