//! File-per-slot storage.
//!
//! Each slot lives in `<data_dir>/<slot>.json`. Writes go to a temporary file
//! in the same directory that is then renamed over the slot, so a reader only
//! ever sees a complete payload. Read-modify-write cycles hold an exclusive
//! advisory lock on `<slot>.lock`, which also serializes separate processes
//! sharing the directory.

use super::{SlotUpdate, StorageBackend};
use crate::constants::{SLOT_FILE_EXTENSION, SLOT_LOCK_EXTENSION};
use crate::errors::{AppError, AppResult, StoreError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
#[cfg(unix)]
use std::fs::Permissions;
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Ensures the data directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}

/// Slots stored as files in one directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Opens (and if needed creates) the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is relative or cannot be created.
    pub fn open(dir: &Path) -> AppResult<Self> {
        ensure_data_directory_exists(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Path of the file holding `key`.
    pub fn slot_path(&self, key: &str) -> AppResult<PathBuf> {
        Ok(self
            .dir
            .join(format!("{}.{}", slot_file_stem(key)?, SLOT_FILE_EXTENSION)))
    }

    fn lock_path(&self, key: &str) -> AppResult<PathBuf> {
        Ok(self
            .dir
            .join(format!("{}.{}", slot_file_stem(key)?, SLOT_LOCK_EXTENSION)))
    }

    /// Opens the slot's lock file and blocks until the exclusive lock is held.
    /// The lock is released when the returned file is dropped.
    fn lock_slot(&self, key: &str) -> AppResult<File> {
        let path = self.lock_path(key)?;
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StoreError::Lock {
                path: path.clone(),
                source,
            })?;

        lock_file
            .lock_exclusive()
            .map_err(|source| StoreError::Lock { path, source })?;
        Ok(lock_file)
    }

    fn write_atomically(&self, path: &Path, contents: &str) -> AppResult<()> {
        let mut temp = NamedTempFile::new_in(&self.dir)?;

        #[cfg(unix)]
        {
            let permissions = Permissions::from_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
            temp.as_file().set_permissions(permissions)?;
        }

        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, key: &str, apply: &mut SlotUpdate<'_>) -> AppResult<()> {
        let lock = self.lock_slot(key)?;

        let current = self.read(key)?;
        let next = apply(current.as_deref())?;
        self.write_atomically(&self.slot_path(key)?, &next)?;
        debug!("Wrote {} bytes to slot {}", next.len(), key);

        // Dropping the handle releases the lock; unlock explicitly to surface errors.
        FileExt::unlock(&lock)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let lock = self.lock_slot(key)?;

        match fs::remove_file(self.slot_path(key)?) {
            Ok(()) => debug!("Removed slot {}", key),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        FileExt::unlock(&lock)?;
        Ok(())
    }
}

/// Checks that a slot key such as `@diary_entries` can be used verbatim as a
/// file stem, so distinct keys always live in distinct files.
fn slot_file_stem(key: &str) -> AppResult<&str> {
    let usable = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '@');

    if key.is_empty() || !key.chars().all(usable) {
        return Err(AppError::Config(format!(
            "Storage key '{}' must be non-empty and use only letters, digits, '-', '_' or '@'",
            key
        )));
    }
    Ok(key)
}
