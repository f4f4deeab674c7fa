//! Persistent storage port for the bypass record.
//!
//! The gate persists exactly one value: the serialized bypass record, in a
//! single device-scoped key-value slot that survives process restarts. This
//! crate defines the capability-checked port the evaluator and workflow
//! depend on, plus its three backends: a JSON file ([`FileStore`]), an
//! in-process slot ([`MemoryStore`]) and an explicitly unavailable store for
//! non-interactive execution contexts ([`UnavailableStore`]).

mod file;
mod memory;

pub use file::FileStore;
pub use memory::{MemoryStore, UnavailableStore};

use thiserror::Error;

/// Errors from the bypass storage port.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be used at all in this execution context.
    #[error("bypass store is unavailable in this context")]
    Unavailable,

    #[error("failed to read bypass slot: {reason}")]
    ReadFailed { reason: String },

    #[error("failed to write bypass slot: {reason}")]
    WriteFailed { reason: String },

    #[error("failed to delete bypass slot: {reason}")]
    DeleteFailed { reason: String },
}

/// Device-scoped persistence for the serialized bypass record.
///
/// One slot, last-writer-wins. Implementations must tolerate concurrent
/// render passes without coordination: `get` performs a single read, and
/// `delete` is idempotent (removing an absent slot succeeds).
pub trait BypassStore: Send + Sync {
    /// Read the raw slot value; `None` when nothing was ever stored.
    fn get(&self) -> Result<Option<String>, StoreError>;

    /// Replace the slot value.
    fn set(&self, value: &str) -> Result<(), StoreError>;

    /// Remove the slot value. Removing an absent slot is not an error.
    fn delete(&self) -> Result<(), StoreError>;

    /// Whether this store can be used in the current context.
    ///
    /// Non-interactive contexts report `false`; callers then skip the read
    /// entirely and fail closed.
    fn is_available(&self) -> bool {
        true
    }
}
