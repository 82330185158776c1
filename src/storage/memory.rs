//! In-memory slot storage.

use super::{SlotUpdate, StorageBackend};
use crate::errors::AppResult;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Slots held in a process-local map. Nothing survives the value being dropped.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with `key` already holding `value`.
    ///
    /// Handy for seeding tests with legacy or corrupted payloads.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend.slots().insert(key.to_string(), value.to_string());
        backend
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    fn update(&self, key: &str, apply: &mut SlotUpdate<'_>) -> AppResult<()> {
        let mut slots = self.slots();
        let next = apply(slots.get(key).map(String::as_str))?;
        slots.insert(key.to_string(), next);
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.slots().remove(key);
        Ok(())
    }
}
