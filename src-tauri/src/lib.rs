//! ShopDesk Host
//!
//! Layered architecture:
//! - config: host settings file plus environment override
//! - api: the single HTTP client every UI request is proxied through
//! - updater: authoritative update session, pushed to the UI as events
//! - health: connection heartbeat
//! - commands: Tauri command handlers

use std::sync::Arc;
use std::time::Duration;

use tauri::Manager;

mod api;
mod commands;
mod config;
mod health;
mod updater;

use api::ApiClient;
use config::AppConfig;
use updater::{TauriUpdateSource, UpdateHub};

/// Delay before the start-up update check, so the UI has subscribed
const STARTUP_CHECK_DELAY: Duration = Duration::from_secs(2);

/// Application state shared across commands
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub updates: Arc<UpdateHub>,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_updater::Builder::new().build())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "ShopDesk")?;
            let _ = rolling_logger::info(&format!(
                "ShopDesk {} starting",
                app_handle.package_info().version
            ));

            let config = AppConfig::load(&app_handle.path().app_config_dir()?);
            tracing::info!(api = %config.api_base_url, "config loaded");

            let api = ApiClient::new(&config)?;
            let updates = UpdateHub::new(
                Arc::new(TauriUpdateSource::new(app_handle.clone())),
                Arc::new(app_handle.clone()),
                Duration::from_millis(config.update_grace_period_ms),
            );

            health::spawn_heartbeat(
                app_handle.clone(),
                api.clone(),
                Duration::from_secs(config.health_interval_secs),
            );

            if config.auto_check_updates {
                let hub = Arc::clone(&updates);
                tauri::async_runtime::spawn(async move {
                    tokio::time::sleep(STARTUP_CHECK_DELAY).await;
                    hub.check(false).await;
                });
            }

            app.manage(AppState { config, api, updates });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // App
            commands::get_app_version,
            commands::get_ui_config,
            commands::get_recent_logs,
            // Remote API
            commands::api_request,
            // Updates
            commands::manual_check_update,
            commands::start_download,
            commands::restart_app,
            commands::get_update_state,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
