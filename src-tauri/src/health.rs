//! Connection Heartbeat
//!
//! Pings the API health endpoint on a fixed interval and pushes the result
//! to the UI on [`CONNECTION_EVENT_CHANNEL`]. Only changes are logged.

use std::time::Duration;

use shopdesk_core::ipc::{ConnectionStatus, CONNECTION_EVENT_CHANNEL};
use tauri::{AppHandle, Emitter, Runtime};

use crate::api::ApiClient;

pub fn status_now(online: bool) -> ConnectionStatus {
    ConnectionStatus {
        online,
        checked_at: chrono::Utc::now().to_rfc3339(),
    }
}

pub fn spawn_heartbeat<R: Runtime>(app: AppHandle<R>, api: ApiClient, every: Duration) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut last: Option<bool> = None;
        loop {
            ticker.tick().await;
            let online = api.ping().await;
            if last != Some(online) {
                if online {
                    tracing::info!(url = api.base_url(), "API reachable");
                } else {
                    tracing::warn!(url = api.base_url(), "API unreachable");
                }
                last = Some(online);
            }
            if let Err(e) = app.emit(CONNECTION_EVENT_CHANNEL, status_now(online)) {
                tracing::warn!(error = %e, "failed to emit connection status");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_timestamp_is_rfc3339() {
        let status = status_now(true);
        assert!(status.online);
        assert!(chrono::DateTime::parse_from_rfc3339(&status.checked_at).is_ok());
    }
}
