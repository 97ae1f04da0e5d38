// Path: crates/api/src/lib.rs

//! # Vestal API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Vestal API
//!
//! Stable contracts between the vesting service and its host: the state
//! handle, the transactional overlay, the execution context, the collaborator
//! ("keeper") interfaces and the service dispatch trait.

/// Re-exports all core error types from the central `vestal-types` crate.
pub mod error;
/// Contracts for the account, bank, staking and distribution collaborators.
pub mod keepers;
/// Traits for pluggable blockchain services.
pub mod services;
/// Core traits for state access, the copy-on-write overlay and an in-memory backend.
pub mod state;
/// The execution context and the all-or-nothing execution boundary.
pub mod transaction;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::error::{ErrorCode, StateError, TransactionError, VestingError};
    pub use crate::keepers::{AccountKeeper, BankKeeper, DistributionKeeper, StakingKeeper};
    pub use crate::services::BlockchainService;
    pub use crate::state::{MemoryState, StateAccess, StateOverlay};
    pub use crate::transaction::context::TxContext;
    pub use crate::transaction::execute_atomic;
}
