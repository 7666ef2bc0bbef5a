//! Session state shared by every command.
//!
//! A [`Session`] owns the [`RecordStore`] and caches who is logged in along
//! with that user's settings. It is created once per process with
//! [`Session::restore`] and handed to commands explicitly.
//!
//! Lifecycle:
//! - `restore` picks up the identity persisted by the last `login`;
//! - `login` persists the identity and reloads settings from the store;
//! - `logout` forgets the identity and resets the cache to defaults;
//! - `update_settings` merges into the cache and writes through at once.

use hissab_shared::{SettingsPatch, UserSettings};
use hissab_store::{KeyValueStore, RecordStore};
use tracing::info;

use crate::error::{ClientError, Result};

pub struct Session<K: KeyValueStore> {
    store: RecordStore<K>,
    username: Option<String>,
    settings: UserSettings,
}

impl<K: KeyValueStore> Session<K> {
    /// Build a session over `store`, resuming the persisted login if any.
    pub fn restore(store: RecordStore<K>) -> Self {
        let username = store.current_user();
        let settings = username
            .as_deref()
            .map(|u| store.get_settings(u))
            .unwrap_or_default();

        if let Some(ref u) = username {
            info!(username = %u, "resumed session");
        }

        Self {
            store,
            username,
            settings,
        }
    }

    pub fn store(&self) -> &RecordStore<K> {
        &self.store
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Settings of the logged-in user, or defaults when logged out.
    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// The logged-in username, or [`ClientError::NotLoggedIn`].
    pub fn require_user(&self) -> Result<&str> {
        self.username().ok_or(ClientError::NotLoggedIn)
    }

    pub fn login(&mut self, username: &str) -> Result<()> {
        self.store.set_current_user(username)?;
        self.username = Some(username.to_string());
        self.reload_settings();
        info!(username, "logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.clear_current_user()?;
        if let Some(username) = self.username.take() {
            info!(username = %username, "logged out");
        }
        self.settings = UserSettings::default();
        Ok(())
    }

    /// Merge `patch` into the cached settings and persist them.
    /// Does nothing while logged out.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        let Some(ref username) = self.username else {
            return Ok(());
        };

        self.settings.apply(patch);
        self.store.save_settings(username, &self.settings)?;
        info!(username = %username, currency = %self.settings.currency, "settings updated");
        Ok(())
    }

    /// Re-read the cached settings from the store.
    pub fn reload_settings(&mut self) {
        self.settings = match self.username {
            Some(ref u) => self.store.get_settings(u),
            None => UserSettings::default(),
        };
    }
}
