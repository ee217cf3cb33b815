//! CSV Download
//!
//! Wraps generated CSV in a Blob and clicks a temporary anchor.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};

use crate::commands::js_error;

/// WebViews may start the download after `click` returns; keep the URL alive until then
const REVOKE_DELAY_MS: u32 = 10_000;

pub fn download_csv(file_name: &str, csv: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(csv));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "Anchor element unavailable".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Timeout::new(REVOKE_DELAY_MS, move || {
        let _ = web_sys::Url::revoke_object_url(&url);
    })
    .forget();
    web_sys::console::log_1(&format!("[EXPORT] Downloaded {}", file_name).into());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoke_outlives_click() {
        assert!(REVOKE_DELAY_MS >= 1_000);
    }
}
