//! Persistence backends for named storage slots.
//!
//! A slot is a key holding one UTF-8 string. The entry store keeps its whole
//! collection in a single slot, so every backend must make a read-modify-write
//! of one slot atomic: readers see either the old or the new value, never a
//! partial one.
//!
//! # Module Structure
//!
//! - `memory`: in-process map, for tests and throwaway sessions
//! - `file`: one JSON file per slot, atomic rename plus advisory lock
//! - `sqlite`: key/value table behind an r2d2 connection pool
//!
//! # Example
//!
//! ```
//! use mood_diary::storage::{MemoryBackend, StorageBackend};
//!
//! let backend = MemoryBackend::new();
//! backend.update("greeting", &mut |current| {
//!     assert!(current.is_none());
//!     Ok("hello".to_string())
//! })?;
//! assert_eq!(backend.read("greeting")?.as_deref(), Some("hello"));
//! # Ok::<(), mood_diary::AppError>(())
//! ```

pub mod file;
pub mod memory;
pub mod sqlite;

use crate::config::{BackendKind, Config};
use crate::constants::SQLITE_FILE_NAME;
use crate::errors::AppResult;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Callback computing a slot's next value from its current one.
pub type SlotUpdate<'a> = dyn FnMut(Option<&str>) -> AppResult<String> + 'a;

/// Storage for named string slots.
pub trait StorageBackend: Send + Sync {
    /// Returns the slot's value, or `None` if it was never written.
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Atomically replaces the slot with `apply(current)`.
    ///
    /// No other `update` or `remove` of the same slot interleaves with this
    /// call. If `apply` fails, the slot is left unchanged and the error is
    /// returned.
    fn update(&self, key: &str, apply: &mut SlotUpdate<'_>) -> AppResult<()>;

    /// Deletes the slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        (**self).read(key)
    }

    fn update(&self, key: &str, apply: &mut SlotUpdate<'_>) -> AppResult<()> {
        (**self).update(key, apply)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        (**self).remove(key)
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for Box<T> {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        (**self).read(key)
    }

    fn update(&self, key: &str, apply: &mut SlotUpdate<'_>) -> AppResult<()> {
        (**self).update(key, apply)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        (**self).remove(key)
    }
}

/// Opens the backend selected by the configuration.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the SQLite
/// database cannot be opened.
pub fn open_backend(config: &Config) -> AppResult<Box<dyn StorageBackend>> {
    match config.backend {
        BackendKind::File => Ok(Box::new(FileBackend::open(&config.data_dir)?)),
        BackendKind::Sqlite => {
            file::ensure_data_directory_exists(&config.data_dir)?;
            Ok(Box::new(SqliteBackend::open(
                &config.data_dir.join(SQLITE_FILE_NAME),
            )?))
        }
    }
}
