//! Error types for the auth layer.

use ptp_api::ApiError;

/// Shown for any rejection of the username/password pair.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";

/// Shown when login fails without a backend error body.
pub const CONNECTION_MESSAGE: &str =
    "Unable to log in. Please check your connection and try again.";

/// Backend codes that mean "wrong username or password". The JWT plugin
/// prefixes WordPress's own codes with `[jwt_auth]`.
const CREDENTIAL_CODES: &[&str] = &[
    "invalid_username",
    "incorrect_password",
    "[jwt_auth] invalid_username",
    "[jwt_auth] incorrect_password",
];

/// Errors returned by [`AuthContext`](crate::AuthContext) operations.
///
/// The `Display` text of the login variants is what the sign-in screen
/// shows, so it is written for end users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the username or password.
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    /// The backend rejected the login with some other error. Carries the
    /// backend message verbatim.
    #[error("{0}")]
    Rejected(String),

    /// Login failed without a backend error body: network, decode, or the
    /// token couldn't be stored. The detail is for logs only.
    #[error("Unable to log in. Please check your connection and try again.")]
    Connection(String),

    /// Guest mode was requested while a user is signed in.
    #[error("already signed in; log out before continuing as guest")]
    AlreadyAuthenticated,
}

impl AuthError {
    /// Maps a failed login or profile call to the error the user sees.
    pub fn from_login_failure(err: &ApiError) -> Self {
        match err {
            ApiError::Client(client) if CREDENTIAL_CODES.contains(&client.code.as_str()) => {
                Self::InvalidCredentials
            }
            ApiError::Client(client) => Self::Rejected(client.message.clone()),
            other => Self::Connection(other.to_string()),
        }
    }
}
