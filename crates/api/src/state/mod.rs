// Path: crates/api/src/state/mod.rs
//! Core traits for state management.
//!
//! - `StateAccess`: the dyn-safe key/value handle every service writes through.
//! - `StateOverlay`: a copy-on-write handle whose writes reach the base only on commit.
//! - `MemoryState`: an ordered in-memory backend for hosts and tests.

use parity_scale_codec::{Decode, Encode};
use std::sync::Arc;
use vestal_types::codec;
use vestal_types::error::StateError;

// --- Type Aliases for common state patterns ---
/// An atomically reference-counted, owned key slice.
pub type StateKey = Arc<[u8]>;
/// An atomically reference-counted, owned value slice.
pub type StateVal = Arc<[u8]>;
/// An owned key-value pair from the state, using cheap-to-clone Arcs.
pub type StateKVPair = (StateKey, StateVal);
/// A streaming iterator over key-value pairs from the state, in ascending key order.
pub type StateScanIter<'a> = Box<dyn Iterator<Item = Result<StateKVPair, StateError>> + Send + 'a>;

mod accessor;
mod memory;
mod overlay;

pub use accessor::*;
pub use memory::*;
pub use overlay::*;

/// Reads and decodes a SCALE record, returning `None` when the key is absent.
pub fn get_decoded<T: Decode>(
    state: &dyn StateAccess,
    key: &[u8],
) -> Result<Option<T>, StateError> {
    state
        .get(key)?
        .map(|bytes| codec::decode_state_value(&bytes))
        .transpose()
}

/// Encodes a record as SCALE and writes it under `key`.
pub fn put_encoded<T: Encode>(
    state: &mut dyn StateAccess,
    key: &[u8],
    value: &T,
) -> Result<(), StateError> {
    let bytes = codec::to_bytes_canonical(value).map_err(StateError::InvalidValue)?;
    state.insert(key, &bytes)
}

/// Decodes every record under `prefix`, in key order, stopping after `limit` entries.
pub fn scan_decoded<T: Decode>(
    state: &dyn StateAccess,
    prefix: &[u8],
    limit: usize,
) -> Result<Vec<T>, StateError> {
    let mut out = Vec::new();
    for item in state.prefix_scan(prefix)?.take(limit) {
        let (_, value) = item?;
        out.push(codec::decode_state_value(&value)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests;
