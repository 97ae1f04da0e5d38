// Path: crates/test_utils/src/lib.rs
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

//! # Vestal Test Utilities
//!
//! State-backed reference implementations of the collaborator contracts,
//! ledger fixtures and assertion macros for testing the Vestal modules.

pub mod assertions;
pub mod fixtures;
pub mod keepers;

#[doc(hidden)]
pub use vestal_types as __types;
