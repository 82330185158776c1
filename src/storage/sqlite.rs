//! SQLite slot storage.
//!
//! Slots are rows of a `slots` table. Connections come from an r2d2 pool and
//! every read-modify-write runs in an `IMMEDIATE` transaction, so concurrent
//! writers queue on the database lock instead of overwriting each other.

use super::{SlotUpdate, StorageBackend};
use crate::constants::{SQLITE_BUSY_TIMEOUT_MS, SQLITE_POOL_SIZE};
use crate::errors::{AppResult, StoreError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Slots stored in a SQLite database.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteBackend {
    /// Opens or creates the database at `db_path` and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The connection pool cannot be initialized
    /// - Schema creation fails
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening slot database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_millis(SQLITE_BUSY_TIMEOUT_MS))
        });
        let pool = Pool::builder()
            .max_size(SQLITE_POOL_SIZE)
            .build(manager)
            .map_err(StoreError::Pool)?;

        let backend = SqliteBackend { pool };
        backend.initialize_schema()?;
        info!("Slot database opened successfully");
        Ok(backend)
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds a single connection for its whole lifetime, because each
    /// in-memory connection is a separate database.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool or schema cannot be initialized.
    pub fn open_in_memory() -> AppResult<Self> {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(SqliteConnectionManager::memory())
            .map_err(StoreError::Pool)?;

        let backend = SqliteBackend { pool };
        backend.initialize_schema()?;
        Ok(backend)
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool.get().map_err(|e| StoreError::Pool(e).into())
    }

    /// Creates the `slots` table if it doesn't exist. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .map_err(StoreError::Sqlite)?;
        Ok(())
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::Sqlite)?;
        Ok(value)
    }

    fn update(&self, key: &str, apply: &mut SlotUpdate<'_>) -> AppResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::Sqlite)?;

        let current: Option<String> = tx
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::Sqlite)?;

        // An error here drops `tx`, which rolls the transaction back.
        let next = apply(current.as_deref())?;

        tx.execute(
            r#"
            INSERT INTO slots (key, value, updated_at)
            VALUES (?1, ?2, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![key, next],
        )
        .map_err(StoreError::Sqlite)?;
        tx.commit().map_err(StoreError::Sqlite)?;

        debug!("Committed {} bytes to slot {}", next.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.get_conn()?;
        conn.execute("DELETE FROM slots WHERE key = ?1", params![key])
            .map_err(StoreError::Sqlite)?;
        Ok(())
    }
}
