use hissab_shared::{SettingsPatch, UserSettings};

use crate::error::Result;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::store::RecordStore;

impl<K: KeyValueStore> RecordStore<K> {
    /// Settings for `username`; defaults when none were ever saved.
    pub fn get_settings(&self, username: &str) -> UserSettings {
        self.load(&keys::settings(username))
    }

    pub fn save_settings(&self, username: &str, settings: &UserSettings) -> Result<()> {
        self.save(&keys::settings(username), settings)?;
        tracing::debug!(username, currency = %settings.currency, "settings saved");
        Ok(())
    }

    /// Merge `patch` into the stored settings and write them back.
    pub fn update_settings(&self, username: &str, patch: SettingsPatch) -> Result<UserSettings> {
        let mut settings = self.get_settings(username);
        settings.apply(patch);
        self.save_settings(username, &settings)?;
        Ok(settings)
    }
}
