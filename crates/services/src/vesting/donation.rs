// Path: crates/services/src/vesting/donation.rs

//! Donation settlement: forfeits an account's locked balance to the
//! community pool and downgrades it to a plain account.

use super::{parse_address, VestingModule};
use vestal_api::state::StateAccess;
use vestal_api::transaction::context::TxContext;
use vestal_api::transaction::execute_atomic;
use vestal_telemetry::vesting_metrics;
use vestal_types::app::{
    Account, AccountId, Coins, ModuleEvent, MsgDonateAllVestingTokens, ATTRIBUTE_KEY_AMOUNT,
};
use vestal_types::error::{TransactionError, VestingError};
use vestal_types::prelude::OptionExt;

impl VestingModule {
    /// Donates everything still locked in `msg.from_address` to the community
    /// pool and turns the account into a plain account.
    ///
    /// Every delegation of the account must be dust: removing its shares must
    /// free zero tokens. Dust delegations are deleted on the way. Any unbonding
    /// delegation or redelegation blocks the donation. Deletions made before a
    /// later failure are rolled back with the rest of the overlay.
    pub fn donate_all_vesting_tokens(
        &self,
        state: &mut dyn StateAccess,
        ctx: &mut TxContext,
        msg: &MsgDonateAllVestingTokens,
    ) -> Result<(), TransactionError> {
        let donated = execute_atomic(state, ctx, |state, ctx| {
            msg.validate_basic(&self.params)?;
            let from = parse_address(&msg.from_address)?;

            let account = self.accounts.get_account(state, &from)?.required(
                VestingError::AccountNotFound {
                    address: from.to_string(),
                },
            )?;

            self.remove_dust_delegations(state, &from)?;
            self.ensure_no_pending_staking_entries(state, &from)?;

            let vesting = account
                .as_vesting()
                .ok_or_else(|| VestingError::NotVestingAccount {
                    address: from.to_string(),
                })?;
            let locked = vesting.locked_coins(ctx.block_timestamp);
            if locked.is_zero() {
                return Err(VestingError::NoVestingTokens {
                    address: from.to_string(),
                }
                .into());
            }

            let base = account.into_base_account();
            self.accounts.set_account(state, &Account::Base(base))?;
            self.distribution.fund_community_pool(state, &locked, &from)?;

            ctx.emit_event(
                ModuleEvent::message(&self.params.module_name)
                    .with_attribute(ATTRIBUTE_KEY_AMOUNT, &locked),
            );
            tracing::info!(
                target: "vesting",
                account = %from,
                amount = %locked,
                "donated vesting tokens to the community pool"
            );
            Ok(locked)
        })?;
        record_donation(&donated);
        Ok(())
    }

    fn remove_dust_delegations(
        &self,
        state: &mut dyn StateAccess,
        delegator: &AccountId,
    ) -> Result<(), TransactionError> {
        let delegations = self.staking.get_delegator_delegations(
            state,
            delegator,
            self.params.max_entries_retrieve,
        )?;
        for delegation in delegations {
            let validator = self
                .staking
                .get_validator(state, &delegation.validator)?
                .required(VestingError::ValidatorNotFound {
                    validator: delegation.validator.to_string(),
                })?;
            let (_, freed) = self.staking.remove_validator_tokens_and_shares(
                state,
                validator,
                delegation.shares,
            )?;
            if freed != 0 {
                return Err(VestingError::NonZeroStakingEntry {
                    address: delegator.to_string(),
                    validator: delegation.validator.to_string(),
                    tokens: freed,
                }
                .into());
            }
            self.staking.remove_delegation(state, &delegation)?;
            tracing::debug!(
                target: "vesting",
                delegator = %delegator,
                validator = %delegation.validator,
                shares = %delegation.shares,
                "removed dust delegation"
            );
        }
        Ok(())
    }

    fn ensure_no_pending_staking_entries(
        &self,
        state: &dyn StateAccess,
        delegator: &AccountId,
    ) -> Result<(), TransactionError> {
        let unbonding = self.staking.get_unbonding_delegations(state, delegator, 1)?;
        let redelegations = self.staking.get_redelegations(state, delegator, 1)?;
        if !unbonding.is_empty() || !redelegations.is_empty() {
            return Err(VestingError::HasStakingEntry {
                address: delegator.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn record_donation(amount: &Coins) {
    let sink = vesting_metrics();
    for coin in amount.iter() {
        if let Ok(value) = u64::try_from(coin.amount) {
            sink.inc_donation(&coin.denom, value);
        }
    }
}
