// Path: crates/api/src/state/memory.rs
//! An ordered, in-memory state backend.

use super::overlay::prefix_bounds;
use crate::state::{StateAccess, StateScanIter, WriteBatch};
use std::collections::BTreeMap;
use std::sync::Arc;
use vestal_types::error::StateError;

/// A `BTreeMap`-backed state. Iteration order is key order, so scans are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StateAccess for MemoryState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.data.remove(key);
        Ok(())
    }

    fn apply_batch(&mut self, batch: &WriteBatch) -> Result<(), StateError> {
        for key in &batch.deletes {
            self.data.remove(key);
        }
        self.data.extend(batch.inserts.iter().cloned());
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let iter = self
            .data
            .range(prefix_bounds(prefix))
            .map(|(k, v)| Ok((Arc::from(k.as_slice()), Arc::from(v.as_slice()))));
        Ok(Box::new(iter))
    }
}
