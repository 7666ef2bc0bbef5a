//! v001 -- Initial schema creation.
//!
//! Creates the single `kv_entries` table holding every JSON blob.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv_entries (
    key        TEXT PRIMARY KEY NOT NULL,   -- e.g. `users`, `transactions_alice`
    value      TEXT NOT NULL,               -- JSON blob
    updated_at TEXT NOT NULL                -- RFC-3339
);
"#;

/// Apply the v001 migration.
pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(UP_SQL)
}
