//! Resource handles: one [`FetchHandle`] per backend endpoint.
//!
//! Each wrapper supplies the producer for its endpoint and reshapes the
//! data for the screen (an empty list instead of `None`, sessions split
//! into upcoming and past). The reshaping is recomputed from the latest
//! state on every read; nothing is cached here beyond what the handle
//! already holds.
//!
//! All wrappers deref to their [`FetchHandle`], so `mount`, `refetch`,
//! `refresh`, `state` and `subscribe` are available directly.

use std::ops::Deref;
use std::sync::Arc;

use ptp_api::{ApiClient, AppConfig, Camp, Session, Trainer};

use crate::{ExpiryHook, FetchHandle, FetchOptions, producer};

/// Implements `Deref` to the inner handle plus the flag accessors every
/// resource shares.
macro_rules! resource_common {
    ($name:ident, $data:ty) => {
        impl Deref for $name {
            type Target = FetchHandle<$data>;

            fn deref(&self) -> &Self::Target {
                &self.handle
            }
        }

        impl $name {
            pub fn is_loading(&self) -> bool {
                self.handle.with_state(|s| s.is_loading)
            }

            pub fn is_refreshing(&self) -> bool {
                self.handle.with_state(|s| s.is_refreshing)
            }

            pub fn error(&self) -> Option<String> {
                self.handle.with_state(|s| s.error.clone())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Camps
// ---------------------------------------------------------------------------

/// Camps and clinics open for registration.
pub struct CampsResource {
    handle: FetchHandle<Vec<Camp>>,
}

impl CampsResource {
    pub fn new<C: ApiClient>(client: Arc<C>, on_session_expired: ExpiryHook) -> Self {
        let fetch = producer(move || {
            let client = Arc::clone(&client);
            async move { client.get_camps().await }
        });
        Self {
            handle: FetchHandle::new(fetch, on_session_expired, FetchOptions::default()),
        }
    }

    /// The loaded camps, or an empty list before the first success.
    pub fn camps(&self) -> Vec<Camp> {
        self.handle.with_state(|s| s.data.clone().unwrap_or_default())
    }
}

resource_common!(CampsResource, Vec<Camp>);

// ---------------------------------------------------------------------------
// Trainers
// ---------------------------------------------------------------------------

/// Trainer profiles.
pub struct TrainersResource {
    handle: FetchHandle<Vec<Trainer>>,
}

impl TrainersResource {
    pub fn new<C: ApiClient>(client: Arc<C>, on_session_expired: ExpiryHook) -> Self {
        let fetch = producer(move || {
            let client = Arc::clone(&client);
            async move { client.get_trainers().await }
        });
        Self {
            handle: FetchHandle::new(fetch, on_session_expired, FetchOptions::default()),
        }
    }

    pub fn trainers(&self) -> Vec<Trainer> {
        self.handle.with_state(|s| s.data.clone().unwrap_or_default())
    }
}

resource_common!(TrainersResource, Vec<Trainer>);

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// The signed-in user's sessions split by status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPartition {
    /// Every session, in backend order.
    pub sessions: Vec<Session>,
    /// Sessions whose status is exactly `"upcoming"`, in backend order.
    pub upcoming: Vec<Session>,
    /// Everything else, in backend order.
    pub past: Vec<Session>,
}

impl SessionPartition {
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        let (upcoming, past): (Vec<Session>, Vec<Session>) = sessions
            .iter()
            .cloned()
            .partition(Session::is_upcoming);
        Self {
            sessions,
            upcoming,
            past,
        }
    }
}

/// The signed-in user's booked sessions.
pub struct SessionsResource {
    handle: FetchHandle<Vec<Session>>,
}

impl SessionsResource {
    pub fn new<C: ApiClient>(client: Arc<C>, on_session_expired: ExpiryHook) -> Self {
        let fetch = producer(move || {
            let client = Arc::clone(&client);
            async move { client.get_sessions().await }
        });
        Self {
            handle: FetchHandle::new(fetch, on_session_expired, FetchOptions::default()),
        }
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.handle.with_state(|s| s.data.clone().unwrap_or_default())
    }

    /// Splits the latest data into upcoming and past.
    pub fn partition(&self) -> SessionPartition {
        SessionPartition::from_sessions(self.sessions())
    }

    pub fn upcoming_sessions(&self) -> Vec<Session> {
        self.partition().upcoming
    }

    pub fn past_sessions(&self) -> Vec<Session> {
        self.partition().past
    }
}

resource_common!(SessionsResource, Vec<Session>);

// ---------------------------------------------------------------------------
// App config
// ---------------------------------------------------------------------------

/// Remote app configuration (minimum version, feature flags, banners).
pub struct AppConfigResource {
    handle: FetchHandle<AppConfig>,
}

impl AppConfigResource {
    pub fn new<C: ApiClient>(client: Arc<C>, on_session_expired: ExpiryHook) -> Self {
        let fetch = producer(move || {
            let client = Arc::clone(&client);
            async move { client.get_app_config().await }
        });
        Self {
            handle: FetchHandle::new(fetch, on_session_expired, FetchOptions::default()),
        }
    }

    pub fn config(&self) -> Option<AppConfig> {
        self.handle.with_state(|s| s.data.clone())
    }
}

resource_common!(AppConfigResource, AppConfig);
