//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ptp_http::HttpClientConfig;
use serde::Deserialize;

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://ptpsummercamps.com";

/// Everything needed to build an [`AppContext`](crate::AppContext).
///
/// Every field has a default, so a JSON file only needs the keys it
/// overrides:
///
/// ```json
/// { "base_url": "https://staging.ptpsummercamps.com", "token_path": "/tmp/ptp.json" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Site root of the WordPress backend.
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 30.
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds. Default: 10.
    pub connect_timeout_secs: u64,

    /// Where the session token is persisted. `None` keeps it in memory
    /// only, so every run starts signed out.
    pub token_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            token_path: None,
        }
    }
}

impl ClientConfig {
    /// Reads `PTP_API_BASE_URL`, `PTP_REQUEST_TIMEOUT_SECS`,
    /// `PTP_CONNECT_TIMEOUT_SECS` and `PTP_TOKEN_PATH`. Unset or
    /// unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("PTP_API_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.base_url),
            request_timeout_secs: lookup("PTP_REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            connect_timeout_secs: lookup("PTP_CONNECT_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.connect_timeout_secs),
            token_path: lookup("PTP_TOKEN_PATH")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Loads a JSON config file. Missing keys take their defaults.
    ///
    /// # Errors
    /// [`ConfigError::Read`] if the file can't be read,
    /// [`ConfigError::Parse`] if it isn't valid JSON for this struct.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PTP_API_BASE_URL", "http://localhost:8080"),
            ("PTP_REQUEST_TIMEOUT_SECS", "5"),
            ("PTP_CONNECT_TIMEOUT_SECS", "2"),
            ("PTP_TOKEN_PATH", "/tmp/ptp/session.json"),
        ]));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 2);
        assert_eq!(config.token_path, Some(PathBuf::from("/tmp/ptp/session.json")));
    }

    #[test]
    fn test_from_lookup_bad_number_keeps_default() {
        let config = ClientConfig::from_lookup(lookup(&[("PTP_REQUEST_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_from_json_file_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ptp.json");
        std::fs::write(&path, r#"{"base_url": "https://staging.example.com"}"#).unwrap();

        let config = ClientConfig::from_json_file(&path).unwrap();

        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(config.token_path.is_none());
    }

    #[test]
    fn test_from_json_file_missing_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_from_json_file_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ptp.json");
        std::fs::write(&path, "base_url = nope").unwrap();

        let err = ClientConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_http_config_converts_seconds() {
        let config = ClientConfig {
            request_timeout_secs: 12,
            ..ClientConfig::default()
        };
        let http = config.http_config();
        assert_eq!(http.request_timeout, Duration::from_secs(12));
        assert_eq!(http.base_url, DEFAULT_BASE_URL);
    }
}
