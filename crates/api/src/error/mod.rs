// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use vestal_types::error::{
    ErrorCode, ErrorKind, StateError, TransactionError, VestingError,
};
pub use vestal_types::Result;
