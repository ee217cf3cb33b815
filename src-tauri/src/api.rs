//! Remote API Client
//!
//! The UI never talks to the shop server directly; every request goes
//! through [`ApiClient`] so the base URL and timeout live in one place.

use std::time::Duration;

use serde_json::Value;
use shopdesk_core::ipc::{ApiMethod, ApiRequest, HEALTH_PATH};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid API path: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a relative API path. Absolute URLs and `..` are
    /// refused; the query string is passed through untouched.
    pub fn url(&self, path: &str) -> Result<String, ApiError> {
        let path = path.trim();
        let route = path.split(['?', '#']).next().unwrap_or_default();
        if !route.starts_with('/') || route.contains("://") || route.split('/').any(|s| s == "..") {
            return Err(ApiError::InvalidPath(path.to_string()));
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    pub async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request.path)?;
        let builder = match request.method {
            ApiMethod::Get => self.http.get(&url),
            ApiMethod::Post => self.http.post(&url),
            ApiMethod::Put => self.http.put(&url),
            ApiMethod::Delete => self.http.delete(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// True when the health endpoint answers with a success status
    pub async fn ping(&self) -> bool {
        let Ok(url) = self.url(HEALTH_PATH) else {
            return false;
        };
        match self.http.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }
}

/// Human-readable message from an error body (`detail`, `message` or `error`)
pub fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message", "error"] {
            match json.get(key) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = AppConfig::default().with_env_override(Some("https://api.shop.test/".into()));
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_joins_relative_paths() {
        let api = client();
        assert_eq!(api.url("/customers/").unwrap(), "https://api.shop.test/customers/");
        assert_eq!(api.url(" /health ").unwrap(), "https://api.shop.test/health");
    }

    #[test]
    fn test_url_rejects_escapes() {
        let api = client();
        assert!(matches!(api.url("customers"), Err(ApiError::InvalidPath(_))));
        assert!(matches!(api.url("/../secret"), Err(ApiError::InvalidPath(_))));
        assert!(matches!(api.url("/https://evil.test/x"), Err(ApiError::InvalidPath(_))));
        assert!(api.url("/x?u=https://evil").is_ok());
        assert!(matches!(api.url("/a/https://evil?q=1"), Err(ApiError::InvalidPath(_))));
    }

    #[test]
    fn test_url_keeps_query_with_links() {
        let api = client();
        assert_eq!(
            api.url("/customers/?search=https://shop.test/x").unwrap(),
            "https://api.shop.test/customers/?search=https://shop.test/x"
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"detail": "Bill not found"}"#), "Bill not found");
        assert_eq!(error_message(r#"{"message": "Insufficient stock"}"#), "Insufficient stock");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(""), "no response body");
    }
}
