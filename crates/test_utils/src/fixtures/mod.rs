//! Ledger fixtures for reproducible tests

use crate::keepers::{
    add_balance, balance_of, blocked_key, redelegation_key, send_disabled_key, unbonding_key,
    StateAccountKeeper, StateDistributionKeeper,
};
use vestal_api::keepers::{AccountKeeper, DistributionKeeper};
use vestal_api::state::{put_encoded, MemoryState, StateAccess};
use vestal_api::transaction::context::TxContext;
use vestal_types::app::{
    Account, AccountId, BaseAccount, ChainId, Coin, Coins, Dec, Delegation, Redelegation,
    RedelegationEntry, Timestamp, UnbondingDelegation, UnbondingEntry, Validator, ValidatorId,
};
use vestal_types::error::TransactionError;
use vestal_types::keys;

/// The denomination used throughout the fixtures.
pub const TEST_DENOM: &str = "test";

/// A deterministic account id whose bytes are all `b`.
pub fn account(b: u8) -> AccountId {
    AccountId([b; 32])
}

/// A deterministic validator id whose bytes are all `b`.
pub fn validator_id(b: u8) -> ValidatorId {
    ValidatorId([b; 32])
}

/// `amount` of the test denomination.
pub fn test_coins(amount: u128) -> Coins {
    Coins::from(vec![Coin::new(TEST_DENOM, amount)])
}

/// A context at `block_timestamp` signed by `signer`.
pub fn tx_context(signer: AccountId, block_timestamp: Timestamp) -> TxContext {
    TxContext::new(1, block_timestamp, ChainId(1), signer)
}

/// An in-memory ledger with helpers for seeding collaborator state.
#[derive(Debug, Default)]
pub struct Ledger {
    /// The canonical state all calls run against.
    pub state: MemoryState,
}

impl Ledger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plain account at `address` holding `balance`.
    pub fn fund_account(
        &mut self,
        address: AccountId,
        balance: &Coins,
    ) -> Result<BaseAccount, TransactionError> {
        let keeper = StateAccountKeeper;
        let base = keeper.new_account_with_address(&mut self.state, &address)?;
        keeper.set_account(&mut self.state, &Account::Base(base.clone()))?;
        add_balance(&mut self.state, &address, balance)?;
        Ok(base)
    }

    /// Stores `account` and credits `balance` to it.
    pub fn put_account(
        &mut self,
        account: &Account,
        balance: &Coins,
    ) -> Result<(), TransactionError> {
        StateAccountKeeper.set_account(&mut self.state, account)?;
        add_balance(&mut self.state, account.address(), balance)
    }

    /// Allocates a plain account record (with a fresh number) without storing it.
    pub fn allocate(&mut self, address: AccountId) -> Result<BaseAccount, TransactionError> {
        StateAccountKeeper.new_account_with_address(&mut self.state, &address)
    }

    /// The account at `address`, if any.
    pub fn account(&self, address: &AccountId) -> Result<Option<Account>, TransactionError> {
        StateAccountKeeper.get_account(&self.state, address)
    }

    /// The balance of `address`.
    pub fn balance(&self, address: &AccountId) -> Result<Coins, TransactionError> {
        Ok(balance_of(&self.state, address)?)
    }

    /// The community pool balance.
    pub fn community_pool(&self) -> Result<Coins, TransactionError> {
        StateDistributionKeeper.community_pool(&self.state)
    }

    /// Disables transfers of `denom`.
    pub fn disable_send(&mut self, denom: &str) -> Result<(), TransactionError> {
        Ok(self.state.insert(&send_disabled_key(denom), &[1])?)
    }

    /// Forbids `address` from receiving funds.
    pub fn block_address(&mut self, address: &AccountId) -> Result<(), TransactionError> {
        Ok(self.state.insert(&blocked_key(address), &[1])?)
    }

    /// Registers a validator with `tokens` bonded against `shares` delegator shares.
    pub fn put_validator(
        &mut self,
        operator: ValidatorId,
        tokens: u128,
        shares: Dec,
    ) -> Result<(), TransactionError> {
        let validator = Validator {
            operator,
            tokens,
            delegator_shares: shares,
        };
        Ok(put_encoded(
            &mut self.state,
            &keys::validator_key(&operator),
            &validator,
        )?)
    }

    /// Records a delegation of `shares` from `delegator` to `validator`.
    pub fn put_delegation(
        &mut self,
        delegator: AccountId,
        validator: ValidatorId,
        shares: Dec,
    ) -> Result<(), TransactionError> {
        let delegation = Delegation {
            delegator,
            validator,
            shares,
        };
        Ok(put_encoded(
            &mut self.state,
            &keys::delegation_key(&delegator, &validator),
            &delegation,
        )?)
    }

    /// The stored delegation from `delegator` to `validator`, if any.
    pub fn delegation(
        &self,
        delegator: &AccountId,
        validator: &ValidatorId,
    ) -> Result<Option<Delegation>, TransactionError> {
        Ok(vestal_api::state::get_decoded(
            &self.state,
            &keys::delegation_key(delegator, validator),
        )?)
    }

    /// Records an unbonding delegation with a single maturing entry.
    pub fn put_unbonding(
        &mut self,
        delegator: AccountId,
        validator: ValidatorId,
        balance: u128,
    ) -> Result<(), TransactionError> {
        let ubd = UnbondingDelegation {
            delegator,
            validator,
            entries: vec![UnbondingEntry {
                creation_height: 1,
                completion_time: 0,
                initial_balance: balance,
                balance,
            }],
        };
        Ok(put_encoded(
            &mut self.state,
            &unbonding_key(&delegator, &validator),
            &ubd,
        )?)
    }

    /// Records a redelegation with a single maturing entry.
    pub fn put_redelegation(
        &mut self,
        delegator: AccountId,
        src: ValidatorId,
        dst: ValidatorId,
        balance: u128,
    ) -> Result<(), TransactionError> {
        let red = Redelegation {
            delegator,
            validator_src: src,
            validator_dst: dst,
            entries: vec![RedelegationEntry {
                creation_height: 1,
                completion_time: 0,
                initial_balance: balance,
                shares_dst: Dec::from_integer(balance).unwrap_or(Dec::ZERO),
            }],
        };
        Ok(put_encoded(
            &mut self.state,
            &redelegation_key(&delegator, &src, &dst),
            &red,
        )?)
    }
}
