//! The [`RecordStore`]: typed collections over a [`KeyValueStore`].
//!
//! CRUD helpers for each collection live in their own module as further
//! `impl RecordStore` blocks.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::keys;
use crate::kv::KeyValueStore;

/// Typed read/modify/write access to the per-user collections.
pub struct RecordStore<K> {
    kv: K,
}

impl<K: KeyValueStore> RecordStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Borrow the underlying key-value backend.
    pub fn backend(&self) -> &K {
        &self.kv
    }

    pub fn into_backend(self) -> K {
        self.kv
    }

    /// Load a whole collection.
    ///
    /// Fail-open policy: an absent key, a backend read error or a blob that
    /// does not decode as `T` all yield `T::default()`. The latter two are
    /// logged at `warn` so corruption is visible without breaking callers.
    pub(crate) fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using empty collection");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed stored JSON, using empty collection");
                T::default()
            }
        }
    }

    /// Replace a whole collection.
    pub(crate) fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)?;
        self.kv.set(key, &json)
    }

    pub(crate) fn remove(&self, key: &str) -> Result<()> {
        self.kv.remove(key)
    }

    /// Wipe transactions, budgets and settings for `username`.
    ///
    /// The account record itself is kept, so the user can log in again and
    /// starts over with default settings.
    pub fn factory_reset(&self, username: &str) -> Result<()> {
        self.clear_transactions(username)?;
        self.clear_budgets(username)?;
        self.remove(&keys::settings(username))?;
        tracing::info!(username, "factory reset");
        Ok(())
    }
}
