// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for all persisted records.
//!
//! Accounts, balances, staking records and dispatched messages are all stored
//! and transported as SCALE. Centralising the wrappers here keeps every crate
//! on the exact same byte representation.

use crate::error::StateError;
use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical SCALE byte representation.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from canonical SCALE bytes.
///
/// Trailing bytes are an error: a record must decode exactly.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}

/// Decodes a record read from state, mapping failures to `StateError::Decode`.
pub fn decode_state_value<T: Decode>(b: &[u8]) -> Result<T, StateError> {
    from_bytes_canonical(b).map_err(StateError::Decode)
}
