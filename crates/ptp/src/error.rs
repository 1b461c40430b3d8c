//! Unified error type for the PTP client core.

use std::path::PathBuf;

use ptp_api::{ApiError, TokenStoreError};
use ptp_auth::AuthError;
use ptp_http::HttpError;

/// Loading a [`ClientConfig`](crate::ClientConfig) from a file failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum PtpError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Building the HTTP client failed (bad base URL, TLS setup).
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
