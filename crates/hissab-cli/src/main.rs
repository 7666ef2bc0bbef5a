//! # hissab
//!
//! Command-line front end for the hissab ledger.
//!
//! The binary opens the SQLite store, restores the persisted session and
//! runs one sub-command against it. All behaviour lives in `hissab-client`;
//! this crate only parses arguments, loads configuration and prints results.

mod cli;
mod config;
mod run;

use anyhow::Context;
use clap::Parser;
use hissab_client::Session;
use hissab_shared::constants::APP_NAME;
use hissab_store::{Database, RecordStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::CliConfig;

const DEFAULT_LOG_FILTER: &str = "hissab_cli=info,hissab_client=info,hissab_store=warn,warn";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --log-level wins over RUST_LOG, which wins over the default.
    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!("{APP_NAME} v{}", env!("CARGO_PKG_VERSION"));

    let mut config = CliConfig::from_env();
    if let Some(path) = cli.db.clone() {
        config.db_path = Some(path);
    }
    debug!(?config, "loaded configuration");

    let db = match config.db_path {
        Some(ref path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            Database::open_at(path).with_context(|| format!("opening {}", path.display()))?
        }
        None => Database::new().context("opening default database")?,
    };

    let mut session = Session::restore(RecordStore::new(db));
    let today = chrono::Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();

    run::run(
        &mut session,
        cli.command,
        &run::RunOptions {
            today,
            json: cli.json,
            recent_limit: config.recent_limit,
        },
        &mut stdout,
    )
}
