use hissab_shared::error::CryptoError;
use hissab_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Incorrect credentials")]
    InvalidCredentials,

    #[error("No account found with this email address")]
    UnknownEmail,

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
