// Path: crates/types/src/keys/mod.rs
//! Defines constants for well-known state keys.
//!
//! Every store the vesting service touches (its own accounts as well as the
//! collaborator stores) lives under one of these prefixes, so a single state
//! overlay covers all of them.

use crate::app::{AccountId, ValidatorId};

/// The state key prefix for account records, keyed by `AccountId`.
pub const ACCOUNT_KEY_PREFIX: &[u8] = b"account::";
/// The state key holding the next account number to assign.
pub const ACCOUNT_NEXT_NUMBER_KEY: &[u8] = b"account::next_number";

/// The state key prefix for per-account balances.
pub const BANK_BALANCE_PREFIX: &[u8] = b"bank::balance::";
/// The state key prefix for denominations whose transfers are disabled.
pub const BANK_SEND_DISABLED_PREFIX: &[u8] = b"bank::send_disabled::";
/// The state key prefix for addresses that may not receive funds.
pub const BANK_BLOCKED_PREFIX: &[u8] = b"bank::blocked::";

/// The state key prefix for validators, keyed by `ValidatorId`.
pub const STAKING_VALIDATOR_PREFIX: &[u8] = b"staking::validator::";
/// The state key prefix for delegations, keyed by delegator then validator.
pub const STAKING_DELEGATION_PREFIX: &[u8] = b"staking::delegation::";
/// The state key prefix for unbonding delegations, keyed by delegator then validator.
pub const STAKING_UNBONDING_PREFIX: &[u8] = b"staking::unbonding::";
/// The state key prefix for redelegations, keyed by delegator then source/destination.
pub const STAKING_REDELEGATION_PREFIX: &[u8] = b"staking::redelegation::";

/// The state key holding the community pool balance.
pub const DISTRIBUTION_COMMUNITY_POOL_KEY: &[u8] = b"distribution::community_pool";

/// Key of the account record at `id`.
pub fn account_key(id: &AccountId) -> Vec<u8> {
    [ACCOUNT_KEY_PREFIX, b"id::", id.as_ref()].concat()
}

/// Key of the balance of `id`.
pub fn balance_key(id: &AccountId) -> Vec<u8> {
    [BANK_BALANCE_PREFIX, id.as_ref()].concat()
}

/// Key of the validator record at `id`.
pub fn validator_key(id: &ValidatorId) -> Vec<u8> {
    [STAKING_VALIDATOR_PREFIX, id.as_ref()].concat()
}

/// Prefix under which all delegations of `delegator` are stored.
pub fn delegations_prefix(delegator: &AccountId) -> Vec<u8> {
    [STAKING_DELEGATION_PREFIX, delegator.as_ref(), b"::"].concat()
}

/// Key of the delegation from `delegator` to `validator`.
pub fn delegation_key(delegator: &AccountId, validator: &ValidatorId) -> Vec<u8> {
    [delegations_prefix(delegator).as_slice(), validator.as_ref()].concat()
}

/// Prefix under which all unbonding delegations of `delegator` are stored.
pub fn unbonding_prefix(delegator: &AccountId) -> Vec<u8> {
    [STAKING_UNBONDING_PREFIX, delegator.as_ref(), b"::"].concat()
}

/// Prefix under which all redelegations of `delegator` are stored.
pub fn redelegations_prefix(delegator: &AccountId) -> Vec<u8> {
    [STAKING_REDELEGATION_PREFIX, delegator.as_ref(), b"::"].concat()
}
