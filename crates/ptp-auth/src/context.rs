//! The auth context: owns the signed-in user and the token lifecycle.
//!
//! # Concurrency
//!
//! `AuthContext` is shared behind an `Arc` by the app shell and by every
//! fetch handle's expiry hook. State lives in a `watch` channel, so
//! observers see each transition and the context itself needs no outer
//! lock. Operations are not serialized against each other: a `logout`
//! that lands while a `login` is in flight settles `Unauthenticated`, and
//! the login then settles `Authenticated` when it finishes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ptp_api::{ApiClient, LoginCredentials, QueryCache, TokenManager, TokenStore, User};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::{AuthError, AuthPhase, AuthState};

/// Single source of truth for "who is signed in".
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ initialize() ──→ login() / continue_as_guest() / logout()
///                │
///                └─ runs once; later calls return immediately
/// ```
pub struct AuthContext<C: ApiClient, S: TokenStore> {
    client: Arc<C>,
    tokens: Arc<TokenManager<S>>,
    /// Purged on every logout.
    cache: Arc<QueryCache>,
    state: watch::Sender<AuthState>,
    initialized: AtomicBool,
}

impl<C: ApiClient, S: TokenStore> AuthContext<C, S> {
    /// Creates a context in [`AuthPhase::Uninitialized`].
    ///
    /// `tokens` should be the same manager the client reads its bearer
    /// token from, so a login here authenticates the client's requests.
    pub fn new(client: Arc<C>, tokens: Arc<TokenManager<S>>, cache: Arc<QueryCache>) -> Self {
        let (state, _) = watch::channel(AuthState::uninitialized());
        Self {
            client,
            tokens,
            cache,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    // -- Startup ----------------------------------------------------------

    /// Restores the previous session, if there is one.
    ///
    /// A stored token is checked against `/me`. Any failure along the way
    /// (unreadable store, rejected token, network) settles
    /// `Unauthenticated`; a rejected token is also deleted. Nothing is
    /// returned to the caller because the app shows the sign-in screen in
    /// every failure case.
    ///
    /// The check only runs from `Uninitialized`. A login, logout, or guest
    /// choice made before it settles the phase and wins over the check's
    /// outcome.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("auth already initialized");
            return;
        }
        let started = self.state.send_if_modified(|state| {
            if state.phase != AuthPhase::Uninitialized {
                return false;
            }
            *state = AuthState::initializing();
            true
        });
        if !started {
            debug!(phase = ?self.state.borrow().phase, "auth settled before startup check");
            return;
        }

        let settled = match self.tokens.load_stored().await {
            Ok(Some(_)) => match self.client.get_me().await {
                Ok(user) => {
                    info!(user_id = %user.id, "restored stored session");
                    AuthState::authenticated(user)
                }
                Err(err) => {
                    warn!(error = %err, "stored token rejected, clearing");
                    if let Err(clear_err) = self.tokens.clear().await {
                        error!(error = %clear_err, "failed to clear rejected token");
                    }
                    AuthState::unauthenticated()
                }
            },
            Ok(None) => {
                debug!("no stored token");
                AuthState::unauthenticated()
            }
            Err(err) => {
                error!(error = %err, "failed to read stored token");
                AuthState::unauthenticated()
            }
        };
        self.state.send_if_modified(|state| {
            if state.phase != AuthPhase::Initializing {
                debug!(phase = ?state.phase, "startup check overtaken, keeping current phase");
                return false;
            }
            *state = settled;
            true
        });
    }

    // -- Transitions ------------------------------------------------------

    /// Signs in and loads the user's profile.
    ///
    /// On success the state is `Authenticated` (guest mode, if it was on,
    /// is left). On failure the previous phase is kept and the returned
    /// [`AuthError`] carries the message to show.
    ///
    /// A token that was stored before the profile fetch failed stays
    /// stored; the next startup check will validate or clear it.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        self.state.send_modify(|state| state.is_loading = true);
        debug!(username = %credentials.username, "logging in");

        match self.sign_in(credentials).await {
            Ok(user) => {
                info!(user_id = %user.id, "logged in");
                self.state.send_replace(AuthState::authenticated(user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!(error = ?err, "login failed");
                self.state.send_modify(|state| state.is_loading = false);
                Err(err)
            }
        }
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        let response = self
            .client
            .login(credentials)
            .await
            .map_err(|e| AuthError::from_login_failure(&e))?;
        self.tokens
            .set(&response.token)
            .await
            .map_err(|e| AuthError::Connection(e.to_string()))?;
        self.client
            .get_me()
            .await
            .map_err(|e| AuthError::from_login_failure(&e))
    }

    /// Signs out: deletes the token, purges the query cache, and settles
    /// `Unauthenticated`.
    ///
    /// Never fails. A token store error is logged and the state still
    /// becomes `Unauthenticated`, and the in-memory token is gone either
    /// way.
    pub async fn logout(&self) {
        if let Err(err) = self.tokens.clear().await {
            error!(error = %err, "failed to clear stored token");
        }
        let dropped = self.cache.clear();
        info!(dropped, "logged out");
        self.state.send_replace(AuthState::unauthenticated());
    }

    /// Enters guest mode without touching the network.
    ///
    /// # Errors
    /// [`AuthError::AlreadyAuthenticated`] if a user is signed in.
    pub fn continue_as_guest(&self) -> Result<(), AuthError> {
        let mut rejected = false;
        self.state.send_if_modified(|state| {
            if state.is_authenticated() {
                rejected = true;
                return false;
            }
            *state = AuthState::guest();
            true
        });
        if rejected {
            return Err(AuthError::AlreadyAuthenticated);
        }
        info!("continuing as guest");
        Ok(())
    }

    // -- Observation ------------------------------------------------------

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// A receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn tokens(&self) -> &Arc<TokenManager<S>> {
        &self.tokens
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }
}

// =========================================================================
// Tests
// =========================================================================
