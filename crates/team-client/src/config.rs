//! Dashboard client configuration
//!
//! Loaded from TOML, optionally overridden from the environment, then
//! validated before the HTTP backend is built.

use crate::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`ClientConfig::base_url`]
pub const ENV_BASE_URL: &str = "PAMM_API_BASE_URL";

/// Environment variable overriding [`ClientConfig::session_header`]
pub const ENV_SESSION_HEADER: &str = "PAMM_SESSION_HEADER";

/// Backend endpoints, cache sizing and table paging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base, e.g. `https://api.example.com/v1`
    pub base_url: String,

    /// Team list endpoint path
    pub team_list_path: String,

    /// Leg business endpoint path
    pub leg_view_path: String,

    /// Header carrying the session credential
    pub session_header: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Max cached (viewer, leg) hierarchies
    pub cache_capacity: u64,

    /// Cache entry lifetime in seconds; 0 keeps entries until evicted
    pub cache_ttl_secs: u64,

    /// Rows per table page
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            team_list_path: "/user/team-list".to_string(),
            leg_view_path: "/user/team-leg-view".to_string(),
            session_header: "token".to_string(),
            timeout_secs: 30,
            cache_capacity: 256,
            cache_ttl_secs: 300,
            page_size: team_hierarchy::DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create config for a base URL with defaults elsewhere
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML or mistyped fields.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid config.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    #[must_use]
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |key| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(base_url) = present(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(header) = present(ENV_SESSION_HEADER) {
            self.session_header = header;
        }
        self
    }

    /// Check the config is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("base_url", "must not be empty"));
        }
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid("base_url", e.to_string()))?;
        for (field, path) in [
            ("team_list_path", &self.team_list_path),
            ("leg_view_path", &self.leg_view_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::invalid(field, format!("'{path}' must start with '/'")));
            }
        }
        if self.session_header.trim().is_empty() {
            return Err(ConfigError::invalid("session_header", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be positive"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "must be positive"));
        }
        Ok(())
    }

    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Cache TTL, `None` when disabled
    #[inline]
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }

    /// Set team list path
    #[must_use]
    pub fn with_team_list_path(mut self, path: impl Into<String>) -> Self {
        self.team_list_path = path.into();
        self
    }

    /// Set leg view path
    #[must_use]
    pub fn with_leg_view_path(mut self, path: impl Into<String>) -> Self {
        self.leg_view_path = path.into();
        self
    }

    /// Set session header name
    #[must_use]
    pub fn with_session_header(mut self, header: impl Into<String>) -> Self {
        self.session_header = header.into();
        self
    }

    /// Set request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set cache capacity and TTL
    #[must_use]
    pub fn with_cache(mut self, capacity: u64, ttl_secs: u64) -> Self {
        self.cache_capacity = capacity;
        self.cache_ttl_secs = ttl_secs;
        self
    }

    /// Set table page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.team_list_path, "/user/team-list");
        assert_eq!(config.leg_view_path, "/user/team-leg-view");
        assert_eq!(config.session_header, "token");
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://api.example.com/v1"
            page_size = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn mistyped_field_is_parse_error() {
        let err = ClientConfig::from_toml_str("page_size = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let empty = ClientConfig::new("  ");
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::InvalidValue { field: "base_url", .. })
        ));

        let zero_page = ClientConfig::default().with_page_size(0);
        assert!(matches!(
            zero_page.validate(),
            Err(ConfigError::InvalidValue { field: "page_size", .. })
        ));

        let relative = ClientConfig::default().with_team_list_path("user/team-list");
        assert!(matches!(
            relative.validate(),
            Err(ConfigError::InvalidValue { field: "team_list_path", .. })
        ));
    }

    #[test]
    fn overrides_replace_non_empty_values() {
        let env: HashMap<&str, &str> =
            [(ENV_BASE_URL, "https://override.test"), (ENV_SESSION_HEADER, "")].into();
        let config = ClientConfig::default().apply_overrides(|k| env.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.base_url, "https://override.test");
        assert_eq!(config.session_header, "token");
    }

    #[test]
    fn zero_ttl_disables_expiry() {
        assert_eq!(ClientConfig::default().with_cache(8, 0).cache_ttl(), None);
        assert_eq!(
            ClientConfig::default().cache_ttl(),
            Some(Duration::from_secs(300))
        );
    }
}
