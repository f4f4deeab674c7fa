//! In-process and capability-less slot implementations.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{BypassStore, StoreError};

/// Process-local slot. Used by tests and short-lived embedding hosts; the
/// record does not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value, for assertions.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.guard().clone()
    }

    fn guard(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BypassStore for MemoryStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.guard().clone())
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        *self.guard() = Some(value.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), StoreError> {
        *self.guard() = None;
        Ok(())
    }
}

/// Slot for execution contexts with no persistence capability.
///
/// `is_available` reports false, so the evaluator skips the read and fails
/// closed; direct operations surface [`StoreError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl BypassStore for UnavailableStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&self, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn delete(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.get().unwrap().is_none());

        store.set("value").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("value"));
        assert_eq!(store.snapshot().as_deref(), Some("value"));

        store.delete().unwrap();
        assert!(store.get().unwrap().is_none());

        // Deleting an absent slot succeeds.
        store.delete().unwrap();
    }

    #[test]
    fn unavailable_store_reports_capability() {
        let store = UnavailableStore;
        assert!(!store.is_available());
        assert!(matches!(store.get(), Err(StoreError::Unavailable)));
        assert!(matches!(store.set("x"), Err(StoreError::Unavailable)));
        assert!(matches!(store.delete(), Err(StoreError::Unavailable)));
    }
}
