//! Local Storage
//!
//! The theme preference is the only value the UI persists itself.

use shopdesk_core::theme::{Theme, THEME_STORAGE_KEY};

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_theme() -> Theme {
    let stored = local_storage().and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    Theme::from_stored(stored.as_deref())
}

pub fn save_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        if storage.set_item(THEME_STORAGE_KEY, theme.as_str()).is_err() {
            web_sys::console::warn_1(&"[THEME] Failed to persist theme".into());
        }
    }
}

/// Reflect the theme on `<html data-theme=...>`
pub fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}
