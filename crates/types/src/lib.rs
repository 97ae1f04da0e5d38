// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Vestal Types
//!
//! The foundational library for the Vestal ledger modules: identifiers, coins,
//! accounts, the vesting schedule model, staking records, messages, events and
//! the unified error taxonomy.
//!
//! ## Architectural Role
//!
//! As the base crate, `vestal-types` has minimal dependencies and is a
//! dependency for every other crate in the workspace. Everything here is pure
//! data plus pure functions over it; nothing in this crate touches state.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::TransactionError> = std::result::Result<T, E>;

/// Application-level data structures: accounts, coins, vesting schedules, messages.
pub mod app;
/// The canonical, deterministic binary codec for consensus-critical state.
pub mod codec;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Constants for well-known state keys.
pub mod keys;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
/// Configuration structures for the vesting service.
pub mod service_configs;
