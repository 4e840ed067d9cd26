//! SQLite storage for departments, people, courses and enrollments.
//!
//! [`Database`] owns a single connection behind a mutex, applies the schema
//! migrations in [`schema`], and exposes typed helpers from [`queries`]. It
//! also implements [`SchoolStore`](crate::store::SchoolStore), which is what
//! the services are written against.

pub mod queries;
pub mod schema;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::errors::DatabaseError;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Handle to the school database.
///
/// File databases use WAL journaling. Foreign keys are enforced everywhere,
/// since course links, office assignments and enrollments rely on cascades.
/// The mutex makes the handle `Send + Sync`, so it can sit in an `Arc`.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        Self::open_file(path.as_ref(), DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open the database named by the `[database]` config section.
    pub fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Self::open_file(&config.path, config.busy_timeout_ms)
    }

    /// A private in-memory database. Each call gets a fresh one.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self::wrap(conn))
    }

    fn open_file(path: &Path, busy_timeout_ms: u64) -> Result<Self, DatabaseError> {
        info!(path = %path.display(), busy_timeout_ms, "opening school database");

        let conn = Connection::open(path)?;
        let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.pragma_update(None, "busy_timeout", busy_timeout_ms)?;

        debug!(journal_mode = %mode, "database ready");
        Ok(Self::wrap(conn))
    }

    fn wrap(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Bring the schema up to the latest migration.
    pub fn initialize(&self) -> Result<(), DatabaseError> {
        let conn = self.conn();
        schema::run_migrations(&conn)
    }

    /// Lock the connection for raw access.
    ///
    /// A mutex poisoned by a panicking holder is taken over rather than
    /// propagated; SQLite's own transaction state stays consistent.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("database mutex poisoned, taking it over");
            poisoned.into_inner()
        })
    }

    /// Run `f` in a transaction, committing on `Ok` and rolling back on
    /// `Err`.
    ///
    /// The lock is held for the whole closure, so `f` must use the
    /// connection it is given and never call back into `self`.
    pub fn transaction<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
