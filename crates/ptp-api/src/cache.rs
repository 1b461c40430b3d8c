//! Shared query cache.
//!
//! Memoizes prior results keyed by request identity (a string such as
//! `"camps"` or `"sessions"`). Values are stored as `serde_json::Value`
//! so one cache can hold every resource type.
//!
//! The auth context calls [`QueryCache::clear`] on logout so nothing
//! fetched under the previous account outlives its token.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A thread-safe map from query key to the last result stored under it.
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache").field("len", &self.len()).finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, serde_json::Value>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, serde_json::Value>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached value for `key`, if present and decodable as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.read();
        let value = entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    /// Returns the serde error if `value` can't be represented as JSON.
    pub fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.write().insert(key.to_string(), value);
        Ok(())
    }

    /// Removes every entry. Returns how many were dropped.
    pub fn clear(&self) -> usize {
        let mut entries = self.write();
        let dropped = entries.len();
        entries.clear();
        tracing::debug!(dropped, "query cache cleared");
        dropped
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
