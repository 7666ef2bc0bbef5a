//! SQLite-backed key-value store.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation. It stores every blob as one
//! row of the `kv_entries` table.

use std::path::{Path, PathBuf};

use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/hissab/hissab.db`
    /// - macOS:   `~/Library/Application Support/com.hissab.hissab/hissab.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\hissab\hissab\data\hissab.db`
    pub fn new() -> Result<Self> {
        let db_path = Self::default_path()?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Platform default location of the database file.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from("com", "hissab", "hissab").ok_or(StoreError::NoDataDir)?;
        Ok(project_dirs.data_dir().join("hissab.db"))
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    /// Open a private in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// Every stored key, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<String>, _>>()
            .map_err(StoreError::Sqlite)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());
    }

    #[test]
    fn set_get_remove() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("users").unwrap(), None);

        db.set("users", "{}").unwrap();
        db.set("users", "{\"a\":1}").unwrap();
        assert_eq!(db.get("users").unwrap().as_deref(), Some("{\"a\":1}"));

        db.remove("users").unwrap();
        db.remove("users").unwrap();
        assert_eq!(db.get("users").unwrap(), None);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.set("currentUser", "alice").unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("currentUser").unwrap().as_deref(), Some("alice"));
        assert_eq!(db.keys().unwrap(), vec!["currentUser".to_string()]);
    }

    #[test]
    fn record_store_over_sqlite() {
        use hissab_shared::Budget;

        let store = crate::RecordStore::new(Database::open_in_memory().unwrap());
        store.upsert_budget("alice", &Budget::monthly("Food", 100_000)).unwrap();
        assert_eq!(store.list_budgets("alice").len(), 1);
        assert_eq!(
            store.backend().keys().unwrap(),
            vec!["budgets_alice".to_string()]
        );
    }
}
