//! CLI configuration loaded from environment variables.
//!
//! Every setting has a default so the binary runs with zero configuration.
//! Command-line flags take precedence over what is loaded here.

use std::path::PathBuf;

use hissab_shared::constants::DEFAULT_RECENT_LIMIT;

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path of the SQLite database file.
    /// Env: `HISSAB_DB_PATH`
    /// Default: `None` (platform data directory).
    pub db_path: Option<PathBuf>,

    /// Number of recent transactions shown on the dashboard.
    /// Env: `HISSAB_RECENT_LIMIT`
    /// Default: `5`
    pub recent_limit: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("HISSAB_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("HISSAB_RECENT_LIMIT") {
            match val.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.recent_limit = n,
                _ => {
                    tracing::warn!(value = %val, "Invalid HISSAB_RECENT_LIMIT, using default");
                }
            }
        }

        // RUST_LOG is read by tracing-subscriber's EnvFilter directly.

        config
    }
}
