use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::CryptoError;

/// One-way hashing of passwords and recovery answers.
///
/// The flows only ever store the digest and compare through `verify`.
pub trait SecretHasher {
    fn hash(&self, secret: &str) -> Result<String, CryptoError>;

    fn verify(&self, secret: &str, digest: &str) -> bool;
}

/// Argon2id with a random per-digest salt, encoded as a PHC string.
#[derive(Debug, Default, Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<String, CryptoError> {
        let salt = SaltString::generate(&mut rand::rngs::OsRng);
        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CryptoError::HashFailed(e.to_string()))
    }

    fn verify(&self, secret: &str, digest: &str) -> bool {
        match PasswordHash::new(digest) {
            Ok(parsed) => self
                .argon2
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// Normalise a recovery answer so casing and stray whitespace don't matter.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}
