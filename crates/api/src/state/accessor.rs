// Path: crates/api/src/state/accessor.rs
//! The `StateAccess` handle shared by services, keepers and backends.

use crate::state::{StateScanIter, WriteBatch};
use vestal_types::error::StateError;

/// A dyn-safe key/value handle.
///
/// The vesting service and every keeper write through this trait only. In
/// production it is usually a `StateOverlay`, which is why no implementation
/// may assume its writes are durable.
pub trait StateAccess: Send + Sync {
    /// The value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Applies a committed overlay: deletes first, then inserts.
    fn apply_batch(&mut self, batch: &WriteBatch) -> Result<(), StateError>;

    /// Every entry whose key starts with `prefix`, ascending by key.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError>;

    /// True when `key` holds a value.
    fn contains(&self, key: &[u8]) -> Result<bool, StateError> {
        Ok(self.get(key)?.is_some())
    }
}
