//! `AppContext` builder and wiring.
//!
//! This is the entry point for the client core. It ties the layers
//! together: config → token store → HTTP client → auth context →
//! resource handles.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ptp_api::{ApiClient, QueryCache, TokenManager, TokenStore};
use ptp_auth::AuthContext;
use ptp_fetch::{
    AppConfigResource, CampsResource, ExpiryHook, SessionsResource, TrainersResource, expiry_hook,
};
use ptp_http::HttpApiClient;
use tracing::info;

use crate::{ClientConfig, PtpError, SessionStore};

/// The HTTP client the builder wires up.
pub type PtpClient = HttpApiClient<SessionStore>;

/// Builder for an [`AppContext`] talking to the real backend.
///
/// # Example
///
/// ```rust,no_run
/// use ptp::prelude::*;
///
/// # async fn run() -> Result<(), PtpError> {
/// let app = AppContext::builder()
///     .base_url("https://ptpsummercamps.com")
///     .token_path("/tmp/ptp-session.json")
///     .build()?;
/// app.initialize().await;
///
/// let camps = app.camps();
/// camps.mount().await;
/// println!("{} camps", camps.camps().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppContextBuilder {
    config: ClientConfig,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Persists the session token at `path`.
    pub fn token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.token_path = Some(path.into());
        self
    }

    /// Keeps the session token in memory only.
    pub fn in_memory_tokens(mut self) -> Self {
        self.config.token_path = None;
        self
    }

    /// Rounded down to whole seconds.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_secs = timeout.as_secs();
        self
    }

    /// Builds the context. Nothing touches the network or the token store
    /// until [`AppContext::initialize`].
    ///
    /// # Errors
    /// [`PtpError::Http`] if the base URL is invalid or the HTTP client
    /// can't be built.
    pub fn build(self) -> Result<AppContext, PtpError> {
        let store = SessionStore::from_path(self.config.token_path.clone());
        let persistent = store.is_persistent();
        let tokens = Arc::new(TokenManager::new(store));
        let client = HttpApiClient::new(self.config.http_config(), Arc::clone(&tokens))?;

        info!(base_url = %client.base_url(), persistent, "app context ready");
        Ok(AppContext::from_parts(Arc::new(client), tokens))
    }
}

/// Owns the shared pieces of the client core for the life of the app.
///
/// One per process. Screens get their state from here: the auth context
/// for "who is signed in", and a fresh resource handle per screen.
pub struct AppContext<C: ApiClient = PtpClient, S: TokenStore = SessionStore> {
    client: Arc<C>,
    auth: Arc<AuthContext<C, S>>,
    cache: Arc<QueryCache>,
}

impl AppContext {
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }
}

impl<C: ApiClient, S: TokenStore> AppContext<C, S> {
    /// Wires a context from an existing client and the token manager it
    /// reads from.
    pub fn from_parts(client: Arc<C>, tokens: Arc<TokenManager<S>>) -> Self {
        let cache = Arc::new(QueryCache::new());
        let auth = Arc::new(AuthContext::new(
            Arc::clone(&client),
            tokens,
            Arc::clone(&cache),
        ));
        Self {
            client,
            auth,
            cache,
        }
    }

    /// Runs the startup session check. See [`AuthContext::initialize`].
    pub async fn initialize(&self) {
        self.auth.initialize().await;
    }

    pub fn auth(&self) -> &Arc<AuthContext<C, S>> {
        &self.auth
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// An expiry hook that logs out of this context.
    pub fn logout_hook(&self) -> ExpiryHook {
        let auth = Arc::clone(&self.auth);
        expiry_hook(move || {
            let auth = Arc::clone(&auth);
            async move { auth.logout().await }
        })
    }

    // -- Resources --------------------------------------------------------

    pub fn camps(&self) -> CampsResource {
        CampsResource::new(Arc::clone(&self.client), self.logout_hook())
    }

    pub fn trainers(&self) -> TrainersResource {
        TrainersResource::new(Arc::clone(&self.client), self.logout_hook())
    }

    pub fn sessions(&self) -> SessionsResource {
        SessionsResource::new(Arc::clone(&self.client), self.logout_hook())
    }

    pub fn app_config(&self) -> AppConfigResource {
        AppConfigResource::new(Arc::clone(&self.client), self.logout_hook())
    }

    /// Tears the context down at process end. The stored token is kept,
    /// so the next start restores the session.
    pub fn shutdown(self) {
        info!(
            authenticated = self.auth.is_authenticated(),
            cached = self.cache.len(),
            "app context shut down"
        );
    }
}
