//! # hissab-store
//!
//! Per-user local storage for Hissab.
//!
//! Two layers live here:
//! - a [`KeyValueStore`] adapter (get / set / remove of a named text blob),
//!   the only I/O boundary, with in-memory, SQLite and detached backends;
//! - the [`RecordStore`], which keeps users, settings, transactions and
//!   budgets as JSON blobs keyed by entity type and username.
//!
//! Every mutation reads the whole collection, modifies it in memory and
//! writes the whole collection back. Absent or malformed blobs read as empty
//! collections (or default settings) and never surface as errors.

pub mod backup;
pub mod budgets;
pub mod database;
pub mod keys;
pub mod kv;
pub mod ledger_csv;
pub mod migrations;
pub mod session;
pub mod settings;
pub mod store;
pub mod transactions;
pub mod users;

mod error;

pub use backup::{BackupPayload, ImportStats};
pub use database::Database;
pub use error::{Result, StoreError};
pub use kv::{DetachedStore, KeyValueStore, MemoryStore};
pub use ledger_csv::{CsvImportStats, CsvRejection};
pub use store::RecordStore;
