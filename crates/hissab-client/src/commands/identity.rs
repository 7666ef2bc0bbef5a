//! Signup, login, logout and password recovery.

use hissab_shared::constants::MIN_PASSWORD_LEN;
use hissab_shared::crypto::{normalize_answer, SecretHasher};
use hissab_shared::User;
use hissab_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::require_non_empty;
use crate::error::{ClientError, Result};
use crate::state::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub recovery_question: Option<String>,
    pub recovery_answer: Option<String>,
}

fn check_password(password: &str, confirm: &str) -> Result<()> {
    if password != confirm {
        return Err(ClientError::Validation("Passwords do not match".into()));
    }
    check_password_length(password)
}

fn check_password_length(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation(format!(
            "Password too short (minimum {MIN_PASSWORD_LEN} characters)"
        )));
    }
    Ok(())
}

/// Register a new account and log it in.
pub fn sign_up<K: KeyValueStore>(
    session: &mut Session<K>,
    hasher: &impl SecretHasher,
    request: SignUpRequest,
) -> Result<User> {
    let username = request.username.trim().to_string();
    require_non_empty("Username", &username)?;
    require_non_empty("Email", &request.email)?;
    check_password_length(&request.password)?;

    if session.store().get_user(&username).is_some() {
        return Err(ClientError::UsernameTaken(username));
    }

    let recovery_answer_digest = match request.recovery_answer.as_deref() {
        Some(answer) if !answer.trim().is_empty() => Some(hasher.hash(&normalize_answer(answer))?),
        _ => None,
    };

    let user = User {
        username: username.clone(),
        email: request.email.trim().to_string(),
        password_digest: hasher.hash(&request.password)?,
        recovery_question: request
            .recovery_question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty()),
        recovery_answer_digest,
        avatar: None,
    };

    session.store().save_user(&username, &user)?;
    info!(username = %username, "account created");

    session.login(&username)?;
    Ok(user)
}

/// Check credentials and log in. Unknown user and wrong password are
/// reported identically.
pub fn log_in<K: KeyValueStore>(
    session: &mut Session<K>,
    hasher: &impl SecretHasher,
    username: &str,
    password: &str,
) -> Result<()> {
    let username = username.trim();
    let Some(user) = session.store().get_user(username) else {
        warn!(username, "login for unknown user");
        return Err(ClientError::InvalidCredentials);
    };

    if !hasher.verify(password, &user.password_digest) {
        warn!(username, "login with wrong password");
        return Err(ClientError::InvalidCredentials);
    }

    session.login(username)
}

pub fn log_out<K: KeyValueStore>(session: &mut Session<K>) -> Result<()> {
    session.logout()
}

/// Replace the password of the account registered with `email`, then log
/// that account in.
pub fn reset_password<K: KeyValueStore>(
    session: &mut Session<K>,
    hasher: &impl SecretHasher,
    email: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<String> {
    let (username, mut user) = session
        .store()
        .find_user_by_email(email)
        .ok_or(ClientError::UnknownEmail)?;

    check_password(new_password, confirm_password)?;

    user.password_digest = hasher.hash(new_password)?;
    session.store().save_user(&username, &user)?;
    info!(username = %username, "password reset");

    session.login(&username)?;
    Ok(username)
}

/// Whether `answer` matches the stored recovery answer. Accounts without a
/// recovery answer never match.
pub fn verify_recovery_answer<K: KeyValueStore>(
    session: &Session<K>,
    hasher: &impl SecretHasher,
    username: &str,
    answer: &str,
) -> bool {
    session
        .store()
        .get_user(username)
        .and_then(|user| user.recovery_answer_digest)
        .map(|digest| hasher.verify(&normalize_answer(answer), &digest))
        .unwrap_or(false)
}

/// Set or clear the avatar of the logged-in user. Returns `false` if the
/// account record no longer exists.
pub fn set_avatar<K: KeyValueStore>(session: &Session<K>, avatar: Option<String>) -> Result<bool> {
    let username = session.require_user()?;
    let Some(mut user) = session.store().get_user(username) else {
        return Ok(false);
    };

    user.avatar = avatar.filter(|a| !a.trim().is_empty());
    session.store().save_user(username, &user)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use hissab_shared::crypto::Argon2Hasher;
    use hissab_store::{MemoryStore, RecordStore};

    use super::*;

    fn request(username: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: password.into(),
            recovery_question: Some("First pet?".into()),
            recovery_answer: Some("Fluffy".into()),
        }
    }

    fn fresh() -> Session<MemoryStore> {
        Session::restore(RecordStore::new(MemoryStore::new()))
    }

    #[test]
    fn test_sign_up_then_log_in() {
        let hasher = Argon2Hasher::new();
        let mut session = fresh();

        let user = sign_up(&mut session, &hasher, request("alice", "secret")).unwrap();
        assert_ne!(user.password_digest, "secret");
        assert_eq!(session.username(), Some("alice"));

        log_out(&mut session).unwrap();
        assert!(!session.is_authenticated());

        log_in(&mut session, &hasher, "alice", "secret").unwrap();
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let hasher = Argon2Hasher::new();
        let mut session = fresh();
        sign_up(&mut session, &hasher, request("alice", "secret")).unwrap();

        let err = sign_up(&mut session, &hasher, request("alice", "other1")).unwrap_err();
        assert!(matches!(err, ClientError::UsernameTaken(_)));
    }

    #[test]
    fn test_short_password_rejected() {
        let hasher = Argon2Hasher::new();
        let mut session = fresh();
        let err = sign_up(&mut session, &hasher, request("alice", "abc")).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(session.store().get_user("alice").is_none());
    }

    #[test]
    fn test_bad_credentials_look_the_same() {
        let hasher = Argon2Hasher::new();
        let mut session = fresh();
        sign_up(&mut session, &hasher, request("alice", "secret")).unwrap();
        log_out(&mut session).unwrap();

        let wrong_password = log_in(&mut session, &hasher, "alice", "nope").unwrap_err();
        let unknown_user = log_in(&mut session, &hasher, "mallory", "secret").unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_reset_password_by_email() {
        let hasher = Argon2Hasher::new();
        let mut session = fresh();
        sign_up(&mut session, &hasher, request("alice", "secret")).unwrap();
        log_out(&mut session).unwrap();

        let mismatch =
            reset_password(&mut session, &hasher, "alice@example.com", "newpass", "newpasx");
        assert!(matches!(mismatch, Err(ClientError::Validation(_))));

        let unknown = reset_password(&mut session, &hasher, "x@example.com", "newpass", "newpass");
        assert!(matches!(unknown, Err(ClientError::UnknownEmail)));

        let username =
            reset_password(&mut session, &hasher, "ALICE@example.com", "newpass", "newpass")
                .unwrap();
        assert_eq!(username, "alice");
        assert_eq!(session.username(), Some("alice"));

        log_out(&mut session).unwrap();
        assert!(log_in(&mut session, &hasher, "alice", "secret").is_err());
        log_in(&mut session, &hasher, "alice", "newpass").unwrap();
    }

    #[test]
    fn test_recovery_answer_ignores_case() {
        let hasher = Argon2Hasher::new();
        let mut session = fresh();
        sign_up(&mut session, &hasher, request("alice", "secret")).unwrap();

        assert!(verify_recovery_answer(&session, &hasher, "alice", " fluffy"));
        assert!(!verify_recovery_answer(&session, &hasher, "alice", "rex"));
        assert!(!verify_recovery_answer(&session, &hasher, "bob", "fluffy"));
    }

    #[test]
    fn test_set_avatar() {
        let hasher = Argon2Hasher::new();
        let mut session = fresh();
        sign_up(&mut session, &hasher, request("alice", "secret")).unwrap();

        assert!(set_avatar(&session, Some("data:image/png;base64,AAAA".into())).unwrap());
        assert!(session.store().get_user("alice").unwrap().avatar.is_some());

        log_out(&mut session).unwrap();
        assert!(matches!(
            set_avatar(&session, None),
            Err(ClientError::NotLoggedIn)
        ));
    }
}
