//! API layer for the PTP mobile core.
//!
//! This crate defines what the rest of the workspace knows about the
//! backend:
//!
//! - **Types** ([`User`], [`Camp`], [`Session`], [`Trainer`], [`AppConfig`])
//!   that come back from the REST plugin.
//! - **Client seam** ([`ApiClient`]): the async calls the core makes.
//! - **Errors** ([`ApiError`], [`ClientError`]), including the
//!   session-expired signal the fetch layer reacts to.
//! - **Tokens** ([`TokenStore`], [`TokenManager`]): where the session
//!   token lives.
//! - **Cache** ([`QueryCache`]): the shared memo purged on logout.
//!
//! # Architecture
//!
//! ```text
//! Fetch / Auth (above)  ← call ApiClient, react to ApiError
//!     ↕
//! API layer (this crate)  ← types, traits, token + cache plumbing
//!     ↕
//! HTTP (ptp-http)  ← implements ApiClient over reqwest
//! ```

mod cache;
mod client;
mod error;
mod token;
mod types;

pub use cache::QueryCache;
pub use client::ApiClient;
pub use error::{ApiError, ClientError, TokenStoreError};
pub use token::{FileTokenStore, MemoryTokenStore, TokenManager, TokenStore};
pub use types::{
    AppConfig, Banner, Camp, FeatureFlags, LoginCredentials, LoginResponse, Session,
    SessionKind, Trainer, User, UserId,
};
