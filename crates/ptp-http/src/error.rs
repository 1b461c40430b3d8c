/// Errors that can occur while setting up the HTTP client.
///
/// Request-time failures are reported as [`ptp_api::ApiError`] instead,
/// since callers above this crate only know that type.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The base URL is empty or doesn't start with `http://`/`https://`.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// reqwest refused the client configuration (TLS backend, etc.).
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}
