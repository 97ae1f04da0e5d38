// Path: crates/api/src/state/overlay.rs

//! The copy-on-write handle `execute_atomic` runs every vesting operation in.

use crate::state::{StateAccess, StateKVPair, StateScanIter};
use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap};
use std::iter::{Fuse, Peekable};
use std::ops::Bound::{self, Excluded, Included, Unbounded};
use std::sync::Arc;
use vestal_types::error::StateError;

/// The smallest key greater than every key starting with `prefix`, or `None`
/// when no such key exists (empty or all-`0xFF` prefix).
pub(crate) fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let last = prefix.iter().rposition(|b| *b != 0xFF)?;
    let mut successor = prefix.get(..=last)?.to_vec();
    if let Some(byte) = successor.last_mut() {
        *byte += 1;
    }
    Some(successor)
}

/// The `BTreeMap` range bounds covering every key under `prefix`.
pub(crate) fn prefix_bounds(prefix: &[u8]) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
    let upper = match prefix_successor(prefix) {
        Some(successor) => Excluded(successor),
        None => Unbounded,
    };
    (Included(prefix.to_vec()), upper)
}

/// The writes of a committed overlay, each list ascending by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    /// Keys written with a value.
    pub inserts: Vec<(Vec<u8>, Vec<u8>)>,
    /// Keys removed.
    pub deletes: Vec<Vec<u8>>,
}

impl WriteBatch {
    /// The number of keys the batch touches.
    pub fn len(&self) -> usize {
        self.inserts.len() + self.deletes.len()
    }

    /// True when applying the batch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.deletes.is_empty()
    }
}

/// A buffered write: `None` is a tombstone hiding the base value.
type Pending = Option<Vec<u8>>;

/// Merges a base scan with the overlay's pending writes for the same prefix.
/// A pending write wins over a base entry with the same key.
struct ShadowedScan<'a> {
    base: Peekable<Fuse<StateScanIter<'a>>>,
    pending: Peekable<btree_map::Range<'a, Vec<u8>, Pending>>,
}

impl ShadowedScan<'_> {
    /// Which side holds the next key in order: `Some(true)` for the pending
    /// writes, `Some(false)` for the base, `None` when both are drained.
    fn pending_is_next(&mut self) -> Option<bool> {
        let pending_key = self.pending.peek().map(|(k, _)| k.as_slice());
        let base_key = match self.base.peek() {
            Some(Ok((k, _))) => Some(k.as_ref()),
            Some(Err(_)) => return Some(false),
            None => None,
        };
        match (base_key, pending_key) {
            (None, None) => None,
            (Some(_), None) => Some(false),
            (None, Some(_)) => Some(true),
            (Some(b), Some(p)) => match b.cmp(p) {
                Ordering::Less => Some(false),
                Ordering::Greater => Some(true),
                Ordering::Equal => {
                    self.base.next();
                    Some(true)
                }
            },
        }
    }
}

impl Iterator for ShadowedScan<'_> {
    type Item = Result<StateKVPair, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending_is_next()? {
            match self.pending.next() {
                Some((key, Some(value))) => {
                    return Some(Ok((Arc::from(key.as_slice()), Arc::from(value.as_slice()))))
                }
                // Tombstone.
                _ => continue,
            }
        }
        self.base.next()
    }
}

/// A transactional view over another `StateAccess`.
///
/// Reads fall through to the base unless the key has a pending write.
/// Writes stay in the overlay until `into_ordered_batch` hands them to the
/// caller for commit; dropping the overlay discards them.
#[derive(Clone)]
pub struct StateOverlay<'a> {
    base: &'a dyn StateAccess,
    pending: BTreeMap<Vec<u8>, Pending>,
}

impl<'a> StateOverlay<'a> {
    /// An overlay with no pending writes.
    pub fn new(base: &'a dyn StateAccess) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// True when nothing has been written.
    pub fn is_clean(&self) -> bool {
        self.pending.is_empty()
    }

    /// Consumes the overlay, splitting its writes into a key-ordered batch.
    pub fn into_ordered_batch(self) -> WriteBatch {
        let mut batch = WriteBatch::default();
        for (key, write) in self.pending {
            match write {
                Some(value) => batch.inserts.push((key, value)),
                None => batch.deletes.push(key),
            }
        }
        batch
    }
}

impl StateAccess for StateOverlay<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.pending.get(key) {
            Some(write) => Ok(write.clone()),
            None => self.base.get(key),
        }
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.pending.insert(key.to_vec(), None);
        Ok(())
    }

    fn apply_batch(&mut self, batch: &WriteBatch) -> Result<(), StateError> {
        for key in &batch.deletes {
            self.pending.insert(key.clone(), None);
        }
        for (key, value) in &batch.inserts {
            self.pending.insert(key.clone(), Some(value.clone()));
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        Ok(Box::new(ShadowedScan {
            base: self.base.prefix_scan(prefix)?.fuse().peekable(),
            pending: self.pending.range(prefix_bounds(prefix)).peekable(),
        }))
    }
}
