//! State-backed reference collaborators.
//!
//! Each keeper stores everything under the well-known prefixes in
//! `vestal_types::keys`, so one `StateOverlay` rolls all of them back together.

use vestal_api::keepers::{AccountKeeper, BankKeeper, DistributionKeeper, StakingKeeper};
use vestal_api::state::{get_decoded, put_encoded, scan_decoded, StateAccess};
use vestal_types::app::{
    Account, AccountId, BaseAccount, Coins, Dec, Delegation, Redelegation, UnbondingDelegation,
    Validator, ValidatorId,
};
use vestal_types::error::{StateError, TransactionError, VestingError};
use vestal_types::keys;

/// Key marking `denom` as non-transferable.
pub fn send_disabled_key(denom: &str) -> Vec<u8> {
    [keys::BANK_SEND_DISABLED_PREFIX, denom.as_bytes()].concat()
}

/// Key marking `address` as unable to receive funds.
pub fn blocked_key(address: &AccountId) -> Vec<u8> {
    [keys::BANK_BLOCKED_PREFIX, address.as_ref()].concat()
}

/// Reads the balance of `address`, empty when unset.
pub fn balance_of(state: &dyn StateAccess, address: &AccountId) -> Result<Coins, StateError> {
    Ok(get_decoded(state, &keys::balance_key(address))?.unwrap_or_default())
}

fn write_balance(
    state: &mut dyn StateAccess,
    address: &AccountId,
    balance: &Coins,
) -> Result<(), StateError> {
    let key = keys::balance_key(address);
    if balance.is_zero() {
        state.delete(&key)
    } else {
        put_encoded(state, &key, balance)
    }
}

/// Credits `amount` to `address`.
pub fn add_balance(
    state: &mut dyn StateAccess,
    address: &AccountId,
    amount: &Coins,
) -> Result<(), TransactionError> {
    let updated = balance_of(state, address)?
        .checked_add(amount)
        .ok_or(TransactionError::BalanceOverflow)?;
    write_balance(state, address, &updated)?;
    Ok(())
}

/// Debits `amount` from `address`, failing if any denomination is short.
pub fn sub_balance(
    state: &mut dyn StateAccess,
    address: &AccountId,
    amount: &Coins,
) -> Result<(), TransactionError> {
    let balance = balance_of(state, address)?;
    let updated = balance
        .checked_sub(amount)
        .ok_or_else(|| TransactionError::InsufficientFunds {
            address: address.to_string(),
            needed: amount.saturating_sub(&balance).to_string(),
        })?;
    write_balance(state, address, &updated)?;
    Ok(())
}

/// The account store, with account numbers drawn from a counter in state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateAccountKeeper;

impl AccountKeeper for StateAccountKeeper {
    fn get_account(
        &self,
        state: &dyn StateAccess,
        address: &AccountId,
    ) -> Result<Option<Account>, TransactionError> {
        Ok(get_decoded(state, &keys::account_key(address))?)
    }

    fn new_account_with_address(
        &self,
        state: &mut dyn StateAccess,
        address: &AccountId,
    ) -> Result<BaseAccount, TransactionError> {
        let number: u64 = get_decoded(state, keys::ACCOUNT_NEXT_NUMBER_KEY)?.unwrap_or(0);
        let next = number
            .checked_add(1)
            .ok_or_else(|| StateError::InvalidValue("account numbers exhausted".into()))?;
        put_encoded(state, keys::ACCOUNT_NEXT_NUMBER_KEY, &next)?;
        Ok(BaseAccount {
            account_number: number,
            ..BaseAccount::with_address(*address)
        })
    }

    fn set_account(
        &self,
        state: &mut dyn StateAccess,
        account: &Account,
    ) -> Result<(), TransactionError> {
        put_encoded(state, &keys::account_key(account.address()), account)?;
        Ok(())
    }
}

/// The balance ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateBankKeeper;

impl BankKeeper for StateBankKeeper {
    fn is_send_enabled_coins(
        &self,
        state: &dyn StateAccess,
        coins: &Coins,
    ) -> Result<(), TransactionError> {
        for coin in coins.iter() {
            if state.contains(&send_disabled_key(&coin.denom))? {
                return Err(VestingError::SendDisabled {
                    denom: coin.denom.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn blocked_addr(
        &self,
        state: &dyn StateAccess,
        address: &AccountId,
    ) -> Result<bool, TransactionError> {
        Ok(state.contains(&blocked_key(address))?)
    }

    fn send_coins(
        &self,
        state: &mut dyn StateAccess,
        from: &AccountId,
        to: &AccountId,
        amount: &Coins,
    ) -> Result<(), TransactionError> {
        sub_balance(state, from, amount)?;
        add_balance(state, to, amount)
    }
}

/// Key of the unbonding delegation from `delegator` at `validator`.
pub fn unbonding_key(delegator: &AccountId, validator: &ValidatorId) -> Vec<u8> {
    [keys::unbonding_prefix(delegator).as_slice(), validator.as_ref()].concat()
}

/// Key of the redelegation from `src` to `dst` by `delegator`.
pub fn redelegation_key(delegator: &AccountId, src: &ValidatorId, dst: &ValidatorId) -> Vec<u8> {
    [
        keys::redelegations_prefix(delegator).as_slice(),
        src.as_ref(),
        dst.as_ref(),
    ]
    .concat()
}

/// The staking bookkeeping engine, reduced to the records donation inspects.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateStakingKeeper;

impl StakingKeeper for StateStakingKeeper {
    fn get_delegator_delegations(
        &self,
        state: &dyn StateAccess,
        delegator: &AccountId,
        max_retrieve: u16,
    ) -> Result<Vec<Delegation>, TransactionError> {
        Ok(scan_decoded(
            state,
            &keys::delegations_prefix(delegator),
            usize::from(max_retrieve),
        )?)
    }

    fn get_unbonding_delegations(
        &self,
        state: &dyn StateAccess,
        delegator: &AccountId,
        max_retrieve: u16,
    ) -> Result<Vec<UnbondingDelegation>, TransactionError> {
        Ok(scan_decoded(
            state,
            &keys::unbonding_prefix(delegator),
            usize::from(max_retrieve),
        )?)
    }

    fn get_redelegations(
        &self,
        state: &dyn StateAccess,
        delegator: &AccountId,
        max_retrieve: u16,
    ) -> Result<Vec<Redelegation>, TransactionError> {
        Ok(scan_decoded(
            state,
            &keys::redelegations_prefix(delegator),
            usize::from(max_retrieve),
        )?)
    }

    fn get_validator(
        &self,
        state: &dyn StateAccess,
        operator: &ValidatorId,
    ) -> Result<Option<Validator>, TransactionError> {
        Ok(get_decoded(state, &keys::validator_key(operator))?)
    }

    fn remove_validator_tokens_and_shares(
        &self,
        state: &mut dyn StateAccess,
        mut validator: Validator,
        shares: Dec,
    ) -> Result<(Validator, u128), TransactionError> {
        let freed = validator.remove_del_shares(shares).ok_or_else(|| {
            StateError::InvalidValue(format!(
                "cannot remove {} shares from validator {} holding {}",
                shares, validator.operator, validator.delegator_shares
            ))
        })?;
        put_encoded(state, &keys::validator_key(&validator.operator), &validator)?;
        Ok((validator, freed))
    }

    fn remove_delegation(
        &self,
        state: &mut dyn StateAccess,
        delegation: &Delegation,
    ) -> Result<(), TransactionError> {
        let key = keys::delegation_key(&delegation.delegator, &delegation.validator);
        if !state.contains(&key)? {
            return Err(StateError::KeyNotFound.into());
        }
        state.delete(&key)?;
        Ok(())
    }
}

/// The community-fund accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateDistributionKeeper;

impl DistributionKeeper for StateDistributionKeeper {
    fn fund_community_pool(
        &self,
        state: &mut dyn StateAccess,
        amount: &Coins,
        depositor: &AccountId,
    ) -> Result<(), TransactionError> {
        sub_balance(state, depositor, amount)?;
        let pool = self
            .community_pool(state)?
            .checked_add(amount)
            .ok_or(TransactionError::BalanceOverflow)?;
        put_encoded(state, keys::DISTRIBUTION_COMMUNITY_POOL_KEY, &pool)?;
        Ok(())
    }

    fn community_pool(&self, state: &dyn StateAccess) -> Result<Coins, TransactionError> {
        Ok(get_decoded(state, keys::DISTRIBUTION_COMMUNITY_POOL_KEY)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestal_api::state::MemoryState;
    use vestal_types::app::Coin;

    fn test_coins(amount: u128) -> Coins {
        Coins::from(vec![Coin::new("test", amount)])
    }

    #[test]
    fn test_account_numbers_are_sequential() {
        let mut state = MemoryState::new();
        let keeper = StateAccountKeeper;
        let a = keeper
            .new_account_with_address(&mut state, &AccountId([1u8; 32]))
            .unwrap();
        let b = keeper
            .new_account_with_address(&mut state, &AccountId([2u8; 32]))
            .unwrap();
        assert_eq!((a.account_number, b.account_number), (0, 1));
        // Allocation alone does not store the account.
        assert!(!keeper.has_account(&state, &a.address).unwrap());
    }

    #[test]
    fn test_send_coins_moves_funds_or_fails_whole() {
        let mut state = MemoryState::new();
        let bank = StateBankKeeper;
        let (from, to) = (AccountId([1u8; 32]), AccountId([2u8; 32]));
        add_balance(&mut state, &from, &test_coins(100)).unwrap();

        bank.send_coins(&mut state, &from, &to, &test_coins(60)).unwrap();
        assert_eq!(balance_of(&state, &from).unwrap(), test_coins(40));
        assert_eq!(balance_of(&state, &to).unwrap(), test_coins(60));

        let err = bank
            .send_coins(&mut state, &from, &to, &test_coins(41))
            .unwrap_err();
        assert!(matches!(err, TransactionError::InsufficientFunds { .. }));
        assert_eq!(balance_of(&state, &from).unwrap(), test_coins(40));
    }

    #[test]
    fn test_send_disabled_and_blocked_flags() {
        let mut state = MemoryState::new();
        let bank = StateBankKeeper;
        state.insert(&send_disabled_key("test"), &[1]).unwrap();
        state.insert(&blocked_key(&AccountId([9u8; 32])), &[1]).unwrap();

        let err = bank.is_send_enabled_coins(&state, &test_coins(1)).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Vesting(VestingError::SendDisabled { .. })
        ));
        assert!(bank.blocked_addr(&state, &AccountId([9u8; 32])).unwrap());
        assert!(!bank.blocked_addr(&state, &AccountId([8u8; 32])).unwrap());
    }

    #[test]
    fn test_fund_community_pool_debits_depositor() {
        let mut state = MemoryState::new();
        let distribution = StateDistributionKeeper;
        let depositor = AccountId([1u8; 32]);
        add_balance(&mut state, &depositor, &test_coins(10)).unwrap();

        distribution
            .fund_community_pool(&mut state, &test_coins(10), &depositor)
            .unwrap();
        assert!(balance_of(&state, &depositor).unwrap().is_zero());
        assert_eq!(distribution.community_pool(&state).unwrap(), test_coins(10));
    }
}
