//! # PTP
//!
//! Client core for the PTP Soccer Camps mobile app.
//!
//! An [`AppContext`] owns the HTTP client, the session token, the shared
//! query cache and the auth context. Screens ask it for resource handles
//! (camps, trainers, the user's sessions, remote app config) that track
//! loading, refreshing and error state, and log the user out when the
//! backend reports an expired session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ptp::prelude::*;
//!
//! # async fn run() -> Result<(), PtpError> {
//! ptp::logging::init();
//! let app = AppContext::builder().config(ClientConfig::from_env()).build()?;
//! app.initialize().await;
//!
//! if !app.auth().is_authenticated() {
//!     app.auth().continue_as_guest()?;
//! }
//! let trainers = app.trainers();
//! trainers.mount().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod error;
pub mod logging;
mod store;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use context::{AppContext, AppContextBuilder, PtpClient};
pub use error::{ConfigError, PtpError};
pub use store::SessionStore;

pub use ptp_api as api;
pub use ptp_auth as auth;
pub use ptp_fetch as fetch;
pub use ptp_http as http;

/// Common imports for building on the client core.
pub mod prelude {
    pub use crate::{AppContext, AppContextBuilder, ClientConfig, PtpError};
    pub use ptp_api::{
        ApiClient, ApiError, AppConfig, Camp, ClientError, LoginCredentials, Session, SessionKind,
        Trainer, User,
    };
    pub use ptp_auth::{AuthContext, AuthError, AuthPhase, AuthState};
    pub use ptp_fetch::{
        AppConfigResource, CampsResource, FetchHandle, FetchOptions, FetchState, SessionPartition,
        SessionsResource, TrainersResource,
    };
}
