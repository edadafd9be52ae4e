use std::path::Path;
use std::sync::{Mutex, PoisonError};

use rusqlite::Connection;
use tracing::{error, info};

mod bootstrap;
pub mod error;
pub mod models;
mod queries;

pub use error::StoreError;
pub use models::{ChannelRow, MessageRow};

/// Process-wide handle to the relational store.
///
/// One connection guarded by a mutex; WAL mode keeps concurrent readers
/// cheap. Constructed once at startup and shared behind an `Arc`.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database at `path` and run the bootstrap.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Init { source })?;
        let store = Self::from_connection(conn)?;
        info!("Store opened at {}", path.display());
        Ok(store)
    }

    /// In-memory store with the same schema and seed, for tests and
    /// throwaway setups.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|source| StoreError::Init { source })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        // WAL mode for concurrent reads; a no-op for in-memory databases
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|source| StoreError::Init { source })?;
        // The bundled SQLite build enables foreign-key enforcement by default;
        // the schema's REFERENCES clause is declarative only, so keep the pragma
        // off to preserve the documented dangling-reference behavior.
        conn.pragma_update(None, "foreign_keys", false)
            .map_err(|source| StoreError::Init { source })?;
        bootstrap::run(&conn).map_err(|source| StoreError::Init { source })?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Release the connection. Close failures are logged, never propagated;
    /// the store is unusable afterwards either way.
    pub fn close(self) {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err((_conn, err)) = conn.close() {
            error!("Failed to close store: {err}");
        }
    }

    pub(crate) fn with_conn<T, F>(&self, operation: &'static str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Poisoned { operation })?;
        f(&conn).map_err(|source| StoreError::Query { operation, source })
    }
}
