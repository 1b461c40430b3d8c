//! The token store the app context picks from its config.

use std::path::PathBuf;

use ptp_api::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};

/// File-backed when a token path is configured, in-memory otherwise.
#[derive(Debug)]
pub enum SessionStore {
    File(FileTokenStore),
    Memory(MemoryTokenStore),
}

impl SessionStore {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(FileTokenStore::new(path)),
            None => Self::Memory(MemoryTokenStore::new()),
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl TokenStore for SessionStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match self {
            Self::File(store) => store.load().await,
            Self::Memory(store) => store.load().await,
        }
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        match self {
            Self::File(store) => store.save(token).await,
            Self::Memory(store) => store.save(token).await,
        }
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match self {
            Self::File(store) => store.clear().await,
            Self::Memory(store) => store.clear().await,
        }
    }
}
