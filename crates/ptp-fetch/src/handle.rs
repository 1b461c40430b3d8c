//! The fetch handle: async data + loading/refreshing/error state.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──→ mount() ──→ refetch() / refresh() / set_options() ──→ unmount()
//!              │                                                     │
//!              └─ runs the first fetch when `immediate`              └─ later
//!                                                                       results
//!                                                                       are dropped
//! ```
//!
//! # Guards
//!
//! - **Mounted flag**: every state write (before and after the producer
//!   runs) checks it first. Once unmounted the handle never writes again
//!   and never calls the expiry hook.
//! - **Request generation**: each trigger takes the next number from a
//!   counter. When the producer resolves, the result is only written if no
//!   newer trigger has started since. Overlapping `refetch`/`refresh` calls
//!   therefore can't let an older, slower response overwrite a newer one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::{ExpiryHook, FetchMode, FetchOptions, FetchState, Producer};

/// Shown when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

struct Inner<T, K> {
    producer: Producer<T>,
    on_session_expired: ExpiryHook,
    state: watch::Sender<FetchState<T>>,
    options: Mutex<FetchOptions<K>>,
    mounted: AtomicBool,
    generation: AtomicU64,
}

/// Tracks one async data source for one consumer.
///
/// Cheap to clone: clones share the same state, so a clone can be moved
/// into a spawned task to run a trigger in the background.
///
/// `T` is the data type; `K` is the subscription key (see
/// [`FetchOptions`]).
pub struct FetchHandle<T, K = ()> {
    inner: Arc<Inner<T, K>>,
}

impl<T, K> Clone for FetchHandle<T, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, K> FetchHandle<T, K>
where
    T: Clone + Send + Sync + 'static,
    K: PartialEq + Clone + Send + 'static,
{
    /// Creates an unmounted handle. Nothing runs until [`mount`](Self::mount).
    pub fn new(
        producer: Producer<T>,
        on_session_expired: ExpiryHook,
        options: FetchOptions<K>,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::initial(options.immediate));
        Self {
            inner: Arc::new(Inner {
                producer,
                on_session_expired,
                state,
                options: Mutex::new(options),
                mounted: AtomicBool::new(false),
                generation: AtomicU64::new(0),
            }),
        }
    }

    // -- Lifecycle --------------------------------------------------------

    /// Marks the handle mounted and, when `immediate`, runs the first fetch.
    ///
    /// Mounting an already mounted handle does nothing.
    pub async fn mount(&self) {
        if self.inner.mounted.swap(true, Ordering::SeqCst) {
            return;
        }
        trace!("fetch handle mounted");
        if self.options().immediate {
            self.run(FetchMode::Load).await;
        }
    }

    /// Marks the handle unmounted. In-flight fetches finish but their
    /// results are discarded.
    pub fn unmount(&self) {
        if self.inner.mounted.swap(false, Ordering::SeqCst) {
            trace!("fetch handle unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    // -- Triggers ---------------------------------------------------------

    /// Fresh load: sets `is_loading`.
    pub async fn refetch(&self) {
        self.run(FetchMode::Load).await;
    }

    /// Background reload: sets `is_refreshing` and keeps the current data
    /// visible until the new result arrives.
    pub async fn refresh(&self) {
        self.run(FetchMode::Refresh).await;
    }

    /// Replaces the options. If `immediate` or the key changed and the new
    /// options are `immediate`, reruns the automatic fetch.
    ///
    /// Returns `true` if a fetch was triggered.
    pub async fn set_options(&self, options: FetchOptions<K>) -> bool {
        let retrigger = {
            let mut current = self.lock_options();
            let changed = current.immediate != options.immediate || current.key != options.key;
            *current = options;
            changed && current.immediate
        };
        if retrigger && self.is_mounted() {
            debug!("fetch key changed, refetching");
            self.run(FetchMode::Load).await;
            return true;
        }
        false
    }

    /// Shorthand for [`set_options`](Self::set_options) that keeps
    /// `immediate` and swaps only the key.
    pub async fn set_key(&self, key: K) -> bool {
        let immediate = self.options().immediate;
        self.set_options(FetchOptions { immediate, key }).await
    }

    // -- Observation ------------------------------------------------------

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    pub fn options(&self) -> FetchOptions<K> {
        self.lock_options().clone()
    }

    /// Number of triggers started so far.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    fn lock_options(&self) -> std::sync::MutexGuard<'_, FetchOptions<K>> {
        self.inner
            .options
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    // -- Core -------------------------------------------------------------

    async fn run(&self, mode: FetchMode) {
        let inner = &self.inner;
        if !self.is_mounted() {
            trace!(?mode, "fetch skipped, handle not mounted");
            return;
        }

        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let refreshing = mode == FetchMode::Refresh;
        inner.state.send_modify(|state| {
            state.is_loading = !refreshing;
            state.is_refreshing = refreshing;
            state.error = None;
        });

        let result = (inner.producer)().await;

        if !self.is_mounted() {
            debug!(generation, "fetch finished after unmount, result dropped");
            return;
        }

        match result {
            Ok(data) => {
                if !self.is_latest(generation) {
                    debug!(generation, "stale fetch result discarded");
                    return;
                }
                inner.state.send_replace(FetchState::loaded(data));
                trace!(generation, ?mode, "fetch succeeded");
            }
            Err(err) if err.is_session_expired() => {
                // State is left as-is: the auth context takes the app to
                // the signed-out screen.
                warn!(generation, error = %err, "session expired during fetch, logging out");
                (inner.on_session_expired)().await;
            }
            Err(err) => {
                if !self.is_latest(generation) {
                    debug!(generation, error = %err, "stale fetch error discarded");
                    return;
                }
                let message = user_message(&err);
                debug!(generation, error = %err, "fetch failed");
                inner.state.send_modify(|state| {
                    state.is_loading = false;
                    state.is_refreshing = false;
                    state.error = Some(message);
                });
            }
        }
    }
}

/// The message a screen shows for a failed fetch.
fn user_message(err: &ptp_api::ApiError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
