//! The API client seam.
//!
//! Everything above this crate talks to the backend through the
//! [`ApiClient`] trait. The HTTP implementation lives in `ptp-http`;
//! tests plug in scripted mocks. Neither the auth context nor the fetch
//! handles know which one they were given.

use std::future::Future;

use crate::{ApiError, AppConfig, Camp, LoginCredentials, LoginResponse, Session, Trainer, User};

/// Remote calls the mobile core needs from the backend.
///
/// # Trait bounds
///
/// - `Send + Sync` so one client can be shared by the auth context and
///   every resource handle across tasks.
/// - `'static` because the client lives as long as the app context.
///
/// Authenticated calls (`get_me`, `get_sessions`) are expected to attach
/// whatever bearer token the implementation currently holds, and to fail
/// with a session-expired [`ClientError`](crate::ClientError) when the
/// backend rejects it.
///
/// # Example
///
/// ```rust
/// use ptp_api::{ApiClient, ApiError, AppConfig, Camp, ClientError,
///     LoginCredentials, LoginResponse, Session, Trainer, User};
///
/// /// A backend that has no camps and rejects everything else.
/// struct EmptyBackend;
///
/// impl ApiClient for EmptyBackend {
///     async fn login(&self, _: &LoginCredentials) -> Result<LoginResponse, ApiError> {
///         Err(ClientError::new("incorrect_password", "Wrong password", 403).into())
///     }
///     async fn get_me(&self) -> Result<User, ApiError> {
///         Err(ClientError::new("rest_not_logged_in", "You must be logged in.", 401).into())
///     }
///     async fn get_camps(&self) -> Result<Vec<Camp>, ApiError> { Ok(Vec::new()) }
///     async fn get_trainers(&self) -> Result<Vec<Trainer>, ApiError> { Ok(Vec::new()) }
///     async fn get_sessions(&self) -> Result<Vec<Session>, ApiError> {
///         Err(ClientError::new("rest_not_logged_in", "You must be logged in.", 401).into())
///     }
///     async fn get_app_config(&self) -> Result<AppConfig, ApiError> {
///         Err(ApiError::Network("offline".into()))
///     }
/// }
/// ```
pub trait ApiClient: Send + Sync + 'static {
    /// Exchanges credentials for a session token.
    fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    /// Fetches the profile of the account the current token belongs to.
    fn get_me(&self) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Lists camps and clinics open for registration. Public.
    fn get_camps(&self) -> impl Future<Output = Result<Vec<Camp>, ApiError>> + Send;

    /// Lists trainer profiles. Public.
    fn get_trainers(&self) -> impl Future<Output = Result<Vec<Trainer>, ApiError>> + Send;

    /// Lists the signed-in user's booked sessions.
    fn get_sessions(&self) -> impl Future<Output = Result<Vec<Session>, ApiError>> + Send;

    /// Fetches remote app configuration. Public.
    fn get_app_config(&self) -> impl Future<Output = Result<AppConfig, ApiError>> + Send;
}
