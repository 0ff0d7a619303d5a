//! SQLite-backed record store.
//!
//! One [`Store`] is opened at startup and handed to every handler through
//! `web::Data`. The connection sits behind a mutex; each statement takes the
//! lock for its own duration, so a bulk upload interleaves with other
//! requests row by row.

mod records;
pub mod stats;

use crate::entities::{EntityDef, EXPORT, IMPORT};
use crate::error::StoreError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub use records::Record;

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Opens (or creates) the database file and makes sure both record
    /// tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::bootstrap(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.ensure_schema(&IMPORT)?;
        store.ensure_schema(&EXPORT)?;
        Ok(store)
    }

    /// Creates the destination table for `def` if it is missing.
    pub fn ensure_schema(&self, def: &EntityDef) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute_batch(&create_table_sql(def))?;
        Ok(())
    }

    /// Cheap round trip used by the health check.
    pub fn ping(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn create_table_sql(def: &EntityDef) -> String {
    let columns: Vec<String> = def
        .fields
        .iter()
        .map(|f| format!("    {} {}", f.name, f.kind.column_type()))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
{columns},
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table} (created_at);",
        table = def.table,
        columns = columns.join(",\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_creates_both_tables() {
        let store = Store::open_in_memory().unwrap();
        store.ping().unwrap();
        let conn = store.lock().unwrap();
        for def in [&IMPORT, &EXPORT] {
            let columns: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM pragma_table_info(?1)",
                    [def.table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(columns as usize, def.fields.len() + 3);
        }
    }

    #[test]
    fn schema_creation_is_repeatable() {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema(&IMPORT).unwrap();
    }

    #[test]
    fn opens_a_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freight.sqlite");
        Store::open(&path).unwrap();
        Store::open(&path).unwrap().ping().unwrap();
    }
}
