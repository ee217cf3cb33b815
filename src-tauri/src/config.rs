//! Host Configuration
//!
//! Read once at start-up from `shopdesk.json` in the app config directory.
//! Missing keys take their defaults; a missing or unreadable file means all
//! defaults. `SHOPDESK_API_BASE_URL` overrides the API base URL.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shopdesk_core::ipc::UiConfig;
use shopdesk_core::update::UPDATE_GRACE_PERIOD_MS;

pub const CONFIG_FILE: &str = "shopdesk.json";
pub const ENV_API_BASE_URL: &str = "SHOPDESK_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub health_interval_secs: u64,
    pub auto_check_updates: bool,
    pub update_grace_period_ms: u64,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
            health_interval_secs: 15,
            auto_check_updates: true,
            update_grace_period_ms: UPDATE_GRACE_PERIOD_MS,
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `dir`, then apply the environment override
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let config = match std::fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }),
            Err(_) => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
        };
        config.with_env_override(std::env::var(ENV_API_BASE_URL).ok())
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    pub fn with_env_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self.normalize();
        self
    }

    /// Keep the two grace periods in step and the intervals non-zero
    fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self.health_interval_secs = self.health_interval_secs.max(1);
        self.ui.update_grace_period_ms = self.update_grace_period_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.health_interval_secs, 15);
        assert!(config.auto_check_updates);
        assert_eq!(config.ui.dashboard_ttl_ms, 300_000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::parse(
            r#"{"api_base_url": "https://api.shop.test/", "update_grace_period_ms": 5000}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.shop.test");
        assert_eq!(config.health_interval_secs, 15);
        assert_eq!(config.ui.update_grace_period_ms, 5000);
    }

    #[test]
    fn test_env_override() {
        let config = AppConfig::default().with_env_override(Some("https://other.test/".into()));
        assert_eq!(config.api_base_url, "https://other.test");

        let untouched = AppConfig::default().with_env_override(Some("  ".into()));
        assert_eq!(untouched.api_base_url, AppConfig::default().api_base_url);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"auto_check_updates": false}"#).unwrap();
        let config = AppConfig::load(dir.path());
        assert!(!config.auto_check_updates);

        let empty = tempfile::tempdir().unwrap();
        std::fs::write(empty.path().join(CONFIG_FILE), "not json").unwrap();
        assert!(AppConfig::load(empty.path()).auto_check_updates);
    }
}
