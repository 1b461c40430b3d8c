//! Auth state: what the app shell observes to pick a screen.

use ptp_api::User;

// ---------------------------------------------------------------------------
// AuthPhase
// ---------------------------------------------------------------------------

/// Where the auth context is in its lifecycle.
///
/// ```text
///   Uninitialized ──(initialize)──→ Initializing ──→ Authenticated
///                                        │                 ↑ │
///                                        │          (login)│ │(logout)
///                                        ▼                 │ ▼
///                                   Unauthenticated ←──────┘
///                                        │ ↑
///                         (continue_as_guest)│ │(logout)
///                                        ▼ │
///                                      Guest ──(login)──→ Authenticated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// `initialize` hasn't been called yet.
    Uninitialized,
    /// The stored token is being checked.
    Initializing,
    /// A user is signed in.
    Authenticated,
    /// Nobody is signed in.
    Unauthenticated,
    /// Browsing public data without an account.
    Guest,
}

// ---------------------------------------------------------------------------
// AuthState
// ---------------------------------------------------------------------------

/// Snapshot of the auth context.
///
/// `user` and `is_guest` are never set together. `is_initialized` flips to
/// `true` once the startup token check finishes and stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub user: Option<User>,
    /// A login or the startup check is in flight.
    pub is_loading: bool,
    pub is_initialized: bool,
    pub is_guest: bool,
}

impl AuthState {
    pub fn uninitialized() -> Self {
        Self {
            phase: AuthPhase::Uninitialized,
            user: None,
            is_loading: false,
            is_initialized: false,
            is_guest: false,
        }
    }

    /// The startup check is running. Nothing from before boot carries over.
    pub fn initializing() -> Self {
        Self {
            phase: AuthPhase::Initializing,
            is_loading: true,
            ..Self::uninitialized()
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            user: Some(user),
            is_loading: false,
            is_initialized: true,
            is_guest: false,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            phase: AuthPhase::Unauthenticated,
            user: None,
            is_loading: false,
            is_initialized: true,
            is_guest: false,
        }
    }

    pub fn guest() -> Self {
        Self {
            phase: AuthPhase::Guest,
            user: None,
            is_loading: false,
            is_initialized: true,
            is_guest: true,
        }
    }

    /// Returns `true` when a user is present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::uninitialized()
    }
}
