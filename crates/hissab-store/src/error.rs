use thiserror::Error;

/// Errors produced by the store layer.
///
/// Missing records are never errors here; see the crate docs.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error from the persistent backend.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection could not be encoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Malformed CSV input or a CSV write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A backup payload failed its integrity check.
    #[error("Corrupt backup: {0}")]
    Corrupt(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
