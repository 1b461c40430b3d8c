//! Session token persistence.
//!
//! Two pieces:
//!
//! - [`TokenStore`]: where the token survives a restart (a file, the OS
//!   keychain, or plain memory in tests).
//! - [`TokenManager`]: wraps a store and also keeps the token in memory,
//!   so the HTTP client can attach it to every request without touching
//!   storage.
//!
//! Token lifecycle: written on successful login, read once at startup,
//! deleted on logout or when the stored token turns out to be invalid.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::TokenStoreError;

/// Persistent storage for the session token.
pub trait TokenStore: Send + Sync + 'static {
    /// Reads the stored token. `Ok(None)` means nothing is stored.
    fn load(&self) -> impl Future<Output = Result<Option<String>, TokenStoreError>> + Send;

    /// Replaces the stored token.
    fn save(&self, token: &str) -> impl Future<Output = Result<(), TokenStoreError>> + Send;

    /// Deletes the stored token. Deleting when nothing is stored is not an error.
    fn clear(&self) -> impl Future<Output = Result<(), TokenStoreError>> + Send;
}

// ---------------------------------------------------------------------------
// MemoryTokenStore
// ---------------------------------------------------------------------------

/// A [`TokenStore`] that forgets everything when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`, as if a previous run
    /// had logged in.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.slot().clone())
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot() = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileTokenStore
// ---------------------------------------------------------------------------

/// On-disk record. Wrapped in an object so fields can be added later
/// without breaking old files.
#[derive(Serialize, Deserialize)]
struct TokenRecord {
    token: String,
}

/// A [`TokenStore`] backed by a small JSON file.
///
/// On Unix the file is created with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: TokenRecord = serde_json::from_slice(&bytes)?;
        if record.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(record.token))
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let record = TokenRecord {
            token: token.to_string(),
        };
        let bytes = serde_json::to_vec(&record)?;
        tokio::fs::write(&self.path, bytes).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, perms).await?;
        }

        tracing::debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// TokenManager
// ---------------------------------------------------------------------------

/// A [`TokenStore`] plus the in-memory bearer token.
///
/// Shared (behind an `Arc`) between the HTTP client, which reads
/// [`current`](Self::current) on every request, and the auth context,
/// which drives the lifecycle.
#[derive(Debug)]
pub struct TokenManager<S: TokenStore> {
    store: S,
    current: RwLock<Option<String>>,
}

impl<S: TokenStore> TokenManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// The token to send with the next request, if any.
    pub fn current(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_current(&self, token: Option<String>) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    /// Reads the persisted token and, if present, makes it current.
    pub async fn load_stored(&self) -> Result<Option<String>, TokenStoreError> {
        let token = self.store.load().await?;
        if token.is_some() {
            self.set_current(token.clone());
        }
        Ok(token)
    }

    /// Makes `token` current and persists it.
    ///
    /// The in-memory token is updated first so requests made right after
    /// login are authenticated even if persisting fails.
    pub async fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        self.set_current(Some(token.to_string()));
        self.store.save(token).await
    }

    /// Forgets the in-memory token and deletes the persisted one.
    pub async fn clear(&self) -> Result<(), TokenStoreError> {
        self.set_current(None);
        self.store.clear().await
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
