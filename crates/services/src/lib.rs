// Path: crates/services/src/lib.rs
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

//! # Vestal Services
//!
//! On-chain services built on the `vestal-api` contracts.

/// Vesting account creation and donation settlement.
pub mod vesting;
