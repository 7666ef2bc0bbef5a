//! Storage key layout.
//!
//! One blob holds the map of all users; settings, transactions and budgets
//! get one blob per username.

/// Map of username to [`User`](hissab_shared::User).
pub const USERS: &str = "users";

/// Username of the logged-in user, kept across restarts.
pub const CURRENT_USER: &str = "currentUser";

pub fn settings(username: &str) -> String {
    format!("settings_{username}")
}

pub fn transactions(username: &str) -> String {
    format!("transactions_{username}")
}

pub fn budgets(username: &str) -> String {
    format!("budgets_{username}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_by_username() {
        assert_eq!(settings("alice"), "settings_alice");
        assert_eq!(transactions("alice"), "transactions_alice");
        assert_ne!(budgets("alice"), budgets("bob"));
    }
}
