//! Persisted identity of the logged-in user.

use crate::error::Result;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::store::RecordStore;

impl<K: KeyValueStore> RecordStore<K> {
    /// Username remembered from the last login, if any.
    pub fn current_user(&self) -> Option<String> {
        match self.backend().get(keys::CURRENT_USER) {
            Ok(username) => username.filter(|u| !u.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read current user");
                None
            }
        }
    }

    pub fn set_current_user(&self, username: &str) -> Result<()> {
        self.backend().set(keys::CURRENT_USER, username)
    }

    pub fn clear_current_user(&self) -> Result<()> {
        self.remove(keys::CURRENT_USER)
    }
}
