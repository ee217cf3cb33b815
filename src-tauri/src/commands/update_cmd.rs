//! Update Commands
//!
//! Fire-and-forget: each command hands work to the update hub and returns at
//! once. Outcomes reach the UI as events on the update channel.

use std::sync::Arc;

use shopdesk_core::UpdatePhase;
use tauri::State;

use crate::AppState;

#[tauri::command]
pub fn manual_check_update(state: State<'_, AppState>) {
    let hub = Arc::clone(&state.updates);
    tauri::async_runtime::spawn(async move { hub.check(true).await });
}

#[tauri::command]
pub fn start_download(state: State<'_, AppState>) {
    let hub = Arc::clone(&state.updates);
    tauri::async_runtime::spawn(async move { hub.download().await });
}

#[tauri::command]
pub fn restart_app(state: State<'_, AppState>) {
    state.updates.restart();
}

/// Current host phase, for a UI that mounted after events went by
#[tauri::command]
pub fn get_update_state(state: State<'_, AppState>) -> UpdatePhase {
    state.updates.phase()
}
