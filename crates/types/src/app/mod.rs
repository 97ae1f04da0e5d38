// Path: crates/types/src/app/mod.rs
//! Core application-level data structures.

/// Account records: plain accounts and the four vesting variants.
pub mod account;
/// Denominated token amounts.
pub mod coin;
/// Module events emitted after successful state transitions.
pub mod events;
/// Account, validator and chain identifiers.
pub mod identity;
/// Messages accepted by the vesting service.
pub mod messages;
/// Staking records consumed by the donation flow.
pub mod staking;
/// The vesting schedule model.
pub mod vesting;

pub use account::*;
pub use coin::*;
pub use events::*;
pub use identity::*;
pub use messages::*;
pub use staking::*;
pub use vesting::*;

/// A deterministic ledger timestamp in Unix seconds, taken from the block header.
pub type Timestamp = i64;
