//! Fetch state and options: what a screen binds to.

// ---------------------------------------------------------------------------
// FetchState
// ---------------------------------------------------------------------------

/// The observable state of one fetch handle.
///
/// - `is_loading`: a fresh load is in flight (nothing to show yet, or the
///   screen wants a full spinner).
/// - `is_refreshing`: a background reload is in flight; `data` still holds
///   the previous result until the new one lands.
///
/// The two flags are never both set. `error` is cleared at the start of
/// every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    /// State before anything has run. `is_loading` mirrors `immediate`
    /// so a screen that fetches on mount starts out showing a spinner.
    pub fn initial(immediate: bool) -> Self {
        Self {
            data: None,
            is_loading: immediate,
            is_refreshing: false,
            error: None,
        }
    }

    /// State after a successful fetch.
    pub fn loaded(data: T) -> Self {
        Self {
            data: Some(data),
            is_loading: false,
            is_refreshing: false,
            error: None,
        }
    }

    /// Returns `true` while either kind of fetch is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_refreshing
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::initial(true)
    }
}

// ---------------------------------------------------------------------------
// FetchMode
// ---------------------------------------------------------------------------

/// Which flag a trigger raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fresh load: raises `is_loading`.
    Load,
    /// Background reload: raises `is_refreshing`, keeps `data`.
    Refresh,
}

// ---------------------------------------------------------------------------
// FetchOptions
// ---------------------------------------------------------------------------

/// Options for a [`FetchHandle`](crate::FetchHandle).
///
/// `key` is the subscription key: the automatic fetch reruns when the key
/// stops comparing equal to the previous one (or when `immediate` flips).
/// Use `()` for a handle that only ever fetches on mount.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions<K = ()> {
    /// Fetch on mount and whenever the key changes. Default: `true`.
    pub immediate: bool,
    pub key: K,
}

impl<K: Default> Default for FetchOptions<K> {
    fn default() -> Self {
        Self {
            immediate: true,
            key: K::default(),
        }
    }
}

impl<K> FetchOptions<K> {
    pub fn with_key(key: K) -> Self {
        Self {
            immediate: true,
            key,
        }
    }

    /// Same key, but no automatic fetch: the caller drives everything
    /// through `refetch`/`refresh`.
    pub fn manual(key: K) -> Self {
        Self {
            immediate: false,
            key,
        }
    }
}
