// Path: crates/api/src/keepers/mod.rs
//! Contracts for the collaborators the vesting service consumes.
//!
//! Every method takes the state handle explicitly. Implementations must keep
//! all of their data in that handle so the caller's transactional overlay
//! covers their writes too.

use crate::state::StateAccess;
use vestal_types::app::{
    Account, AccountId, BaseAccount, Coins, Dec, Delegation, Redelegation, UnbondingDelegation,
    Validator, ValidatorId,
};
use vestal_types::error::TransactionError;

/// The account store.
pub trait AccountKeeper: Send + Sync {
    /// The account at `address`, if any.
    fn get_account(
        &self,
        state: &dyn StateAccess,
        address: &AccountId,
    ) -> Result<Option<Account>, TransactionError>;

    /// True when an account exists at `address`.
    fn has_account(
        &self,
        state: &dyn StateAccess,
        address: &AccountId,
    ) -> Result<bool, TransactionError> {
        Ok(self.get_account(state, address)?.is_some())
    }

    /// Allocates a plain account at `address`, assigning the next account number.
    /// The account is not stored until `set_account` is called.
    fn new_account_with_address(
        &self,
        state: &mut dyn StateAccess,
        address: &AccountId,
    ) -> Result<BaseAccount, TransactionError>;

    /// Stores `account`, replacing whatever was at its address.
    fn set_account(
        &self,
        state: &mut dyn StateAccess,
        account: &Account,
    ) -> Result<(), TransactionError>;
}

/// The balance ledger.
pub trait BankKeeper: Send + Sync {
    /// Fails with `SendDisabled` if any denomination in `coins` may not be transferred.
    fn is_send_enabled_coins(
        &self,
        state: &dyn StateAccess,
        coins: &Coins,
    ) -> Result<(), TransactionError>;

    /// True when `address` may not receive funds.
    fn blocked_addr(
        &self,
        state: &dyn StateAccess,
        address: &AccountId,
    ) -> Result<bool, TransactionError>;

    /// Moves `amount` from `from` to `to`.
    fn send_coins(
        &self,
        state: &mut dyn StateAccess,
        from: &AccountId,
        to: &AccountId,
        amount: &Coins,
    ) -> Result<(), TransactionError>;
}

/// The staking bookkeeping engine.
pub trait StakingKeeper: Send + Sync {
    /// Up to `max_retrieve` delegations made by `delegator`, in store order.
    fn get_delegator_delegations(
        &self,
        state: &dyn StateAccess,
        delegator: &AccountId,
        max_retrieve: u16,
    ) -> Result<Vec<Delegation>, TransactionError>;

    /// Up to `max_retrieve` unbonding delegations of `delegator`.
    fn get_unbonding_delegations(
        &self,
        state: &dyn StateAccess,
        delegator: &AccountId,
        max_retrieve: u16,
    ) -> Result<Vec<UnbondingDelegation>, TransactionError>;

    /// Up to `max_retrieve` redelegations of `delegator`.
    fn get_redelegations(
        &self,
        state: &dyn StateAccess,
        delegator: &AccountId,
        max_retrieve: u16,
    ) -> Result<Vec<Redelegation>, TransactionError>;

    /// The validator operated by `operator`, if registered.
    fn get_validator(
        &self,
        state: &dyn StateAccess,
        operator: &ValidatorId,
    ) -> Result<Option<Validator>, TransactionError>;

    /// Burns `shares` from `validator`, persists the result and returns it
    /// together with the number of tokens the shares were worth.
    fn remove_validator_tokens_and_shares(
        &self,
        state: &mut dyn StateAccess,
        validator: Validator,
        shares: Dec,
    ) -> Result<(Validator, u128), TransactionError>;

    /// Deletes the delegation record.
    fn remove_delegation(
        &self,
        state: &mut dyn StateAccess,
        delegation: &Delegation,
    ) -> Result<(), TransactionError>;
}

/// The community-fund accumulator.
pub trait DistributionKeeper: Send + Sync {
    /// Moves `amount` from `depositor` into the community pool.
    fn fund_community_pool(
        &self,
        state: &mut dyn StateAccess,
        amount: &Coins,
        depositor: &AccountId,
    ) -> Result<(), TransactionError>;

    /// The pool's current balance.
    fn community_pool(&self, state: &dyn StateAccess) -> Result<Coins, TransactionError>;
}
