//! Authentication for the PTP mobile core.
//!
//! The [`AuthContext`] is the single owner of "who is signed in":
//!
//! 1. **Startup**: [`AuthContext::initialize`] checks for a stored token and
//!    validates it against `/me`.
//! 2. **Sign-in**: [`AuthContext::login`] exchanges credentials for a token,
//!    persists it, and loads the profile.
//! 3. **Sign-out**: [`AuthContext::logout`] deletes the token and purges the
//!    shared [`QueryCache`](ptp_api::QueryCache). Fetch handles call it when
//!    the backend reports an expired session.
//! 4. **Guest mode**: [`AuthContext::continue_as_guest`] lets the app browse
//!    public data without an account.
//!
//! # How it fits in the stack
//!
//! ```text
//! Resource handles (ptp-fetch)  ← call logout() on session expiry
//!     ↕
//! Auth context (this crate)     ← owns AuthState, token lifecycle
//!     ↕
//! ApiClient + TokenManager (ptp-api)
//! ```

mod context;
mod error;
mod state;

pub use context::AuthContext;
pub use error::{AuthError, CONNECTION_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
pub use state::{AuthPhase, AuthState};
