// Path: crates/types/src/prelude.rs

//! Re-exports most callers need, plus the `OptionExt` helper.

pub use crate::app::{AccountId, Coin, Coins, Timestamp, ValidatorId};
pub use crate::error::{ErrorCode, ErrorKind, StateError, TransactionError, VestingError};

/// Turns a missing lookup into a typed error.
pub trait OptionExt<T> {
    /// `Ok(value)` when present, otherwise `Err(missing)`.
    fn required<E>(self, missing: E) -> Result<T, E>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required<E>(self, missing: E) -> Result<T, E> {
        self.ok_or(missing)
    }
}
