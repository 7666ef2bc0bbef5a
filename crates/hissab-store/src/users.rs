//! CRUD operations for [`User`] records.
//!
//! All users share one blob: a map keyed by username.

use std::collections::BTreeMap;

use hissab_shared::User;

use crate::error::Result;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::store::RecordStore;

impl<K: KeyValueStore> RecordStore<K> {
    /// Every registered user, keyed by username.
    pub fn list_users(&self) -> BTreeMap<String, User> {
        self.load(keys::USERS)
    }

    pub fn get_user(&self, username: &str) -> Option<User> {
        self.list_users().remove(username)
    }

    /// Insert or replace the user stored under `username`.
    pub fn save_user(&self, username: &str, user: &User) -> Result<()> {
        let mut users = self.list_users();
        users.insert(username.to_string(), user.clone());
        self.save(keys::USERS, &users)?;
        tracing::debug!(username, "user saved");
        Ok(())
    }

    /// Find the account registered with `email`, ignoring case.
    pub fn find_user_by_email(&self, email: &str) -> Option<(String, User)> {
        let email = email.trim();
        self.list_users()
            .into_iter()
            .find(|(_, user)| user.email.eq_ignore_ascii_case(email))
    }
}
