//! App Commands
//!
//! Version, UI tunables and diagnostics.

use shopdesk_core::ipc::UiConfig;
use tauri::{AppHandle, State};

use crate::AppState;

const DEFAULT_LOG_LINES: usize = 200;

/// Version shown in the header and the update banner
#[tauri::command]
pub fn get_app_version(app: AppHandle) -> String {
    app.package_info().version.to_string()
}

#[tauri::command]
pub fn get_ui_config(state: State<'_, AppState>) -> UiConfig {
    state.config.ui.clone()
}

/// Tail of the host log, oldest first
#[tauri::command]
pub fn get_recent_logs(limit: Option<usize>) -> Vec<String> {
    rolling_logger::recent_lines(limit.unwrap_or(DEFAULT_LOG_LINES))
}
