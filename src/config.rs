//! Runtime configuration
//!
//! The API credential is never compiled in; it arrives from the command line or the
//! `DOG_API_KEY` environment variable and is carried here.

use crate::{DogTableError, Result};
use std::time::Duration;

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://api.thedogapi.com/v1/images/search";

/// Number of images requested per load
pub const PAGE_LIMIT: u32 = 50;

/// Fixed query parameters sent with every image search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub size: &'static str,
    pub mime_types: &'static str,
    pub format: &'static str,
    pub has_breeds: bool,
    pub order: &'static str,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            size: "med",
            mime_types: "jpg",
            format: "json",
            has_breeds: true,
            order: "RANDOM",
            page: 0,
            limit: PAGE_LIMIT,
        }
    }
}

impl SearchParams {
    /// Query pairs in wire order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("size", self.size.to_string()),
            ("mime_types", self.mime_types.to_string()),
            ("format", self.format.to_string()),
            ("has_breeds", self.has_breeds.to_string()),
            ("order", self.order.to_string()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Image search endpoint
    pub endpoint: String,
    /// Value of the `x-api-key` header
    pub api_key: Option<String>,
    /// Overall request timeout; none means wait indefinitely
    pub timeout: Option<Duration>,
    /// Query parameters
    pub params: SearchParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: None,
            params: SearchParams::default(),
        }
    }
}

impl AppConfig {
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        // An empty variable counts as unset.
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject configurations that cannot produce a request.
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(DogTableError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(DogTableError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_in_wire_order() {
        let pairs = SearchParams::default().pairs();
        let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        assert_eq!(
            rendered.join("&"),
            "size=med&mime_types=jpg&format=json&has_breeds=true&order=RANDOM&page=0&limit=50"
        );
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let config = AppConfig::default().with_api_key(Some("   ".into()));
        assert!(config.api_key.is_none());

        let config = AppConfig::default().with_api_key(Some("secret".into()));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn validate_rejects_bad_endpoint_and_zero_timeout() {
        assert!(AppConfig::default().validate().is_ok());
        assert!(AppConfig::default()
            .with_endpoint("ftp://example.test")
            .validate()
            .is_err());
        assert!(AppConfig::default()
            .with_timeout(Some(Duration::ZERO))
            .validate()
            .is_err());
    }
}
