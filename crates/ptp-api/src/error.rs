//! Error types for the API layer.
//!
//! The backend reports failures as WordPress error bodies:
//! `{ "code": "...", "message": "...", "data": { "status": 401 } }`.
//! Those become a [`ClientError`]. Anything that never produced such a
//! body (connection refused, timeout, unparseable payload) is a separate
//! [`ApiError`] variant, so callers can tell "the server said no" apart
//! from "we never got a usable answer".

use serde::Deserialize;

/// Error codes that mean the stored credential is no longer accepted.
const SESSION_EXPIRED_CODES: &[&str] = &[
    "jwt_auth_invalid_token",
    "jwt_auth_bad_auth_header",
    "rest_not_logged_in",
];

/// A typed error returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    /// Machine-readable code, e.g. `incorrect_password`.
    pub code: String,
    /// Human-readable message written by the backend.
    pub message: String,
    /// HTTP status of the response.
    pub status: u16,
}

/// Shape of a WordPress REST error body.
#[derive(Deserialize)]
struct WpErrorBody {
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<WpErrorData>,
}

#[derive(Deserialize)]
struct WpErrorData {
    status: Option<u16>,
}

impl ClientError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
        }
    }

    /// Builds a `ClientError` from a non-success response.
    ///
    /// Falls back to an `http_<status>` code when the body isn't a
    /// WordPress error, so every failed response still carries a code.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<WpErrorBody>(body) {
            Ok(wp) => {
                let status = wp.data.and_then(|d| d.status).unwrap_or(status);
                let message = if wp.message.is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    wp.message
                };
                Self::new(wp.code, message, status)
            }
            Err(_) => Self::new(
                format!("http_{status}"),
                format!("Request failed with status {status}"),
                status,
            ),
        }
    }

    /// Returns `true` if this error means the session token was rejected.
    pub fn is_session_expired(&self) -> bool {
        self.status == 401 || SESSION_EXPIRED_CODES.contains(&self.code.as_str())
    }
}

/// Errors produced by an [`ApiClient`](crate::ApiClient) call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with an error body.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The request never completed: DNS, connect, TLS, timeout.
    #[error("network request failed: {0}")]
    Network(String),

    /// A response arrived but couldn't be decoded into the expected type.
    #[error("unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns `true` only for a [`ClientError`] that signals an expired
    /// or invalid session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_session_expired())
    }

    /// The backend error code, when there is one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Client(e) => Some(&e.code),
            _ => None,
        }
    }
}

/// Errors from reading or writing the persisted session token.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    /// Reading, writing, or deleting the backing file failed.
    #[error("token store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but doesn't hold a valid token record.
    #[error("token store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
