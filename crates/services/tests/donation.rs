// Path: crates/services/tests/donation.rs
//! End-to-end tests for donating locked balances to the community pool.

mod common;

use anyhow::Result;
use proptest::prelude::*;
use common::{seed_permanent_locked, stored_account, vesting_module};
use vestal_test_utils::assert_vesting_err;
use vestal_test_utils::fixtures::{account, test_coins, tx_context, validator_id, Ledger};
use vestal_types::app::{Account, Dec, MsgDonateAllVestingTokens, VestingAccount};
use vestal_types::error::{ErrorKind, VestingError};

const NOW: i64 = 1_700_000_000;

fn donate(owner: u8) -> MsgDonateAllVestingTokens {
    MsgDonateAllVestingTokens {
        from_address: account(owner).to_string(),
    }
}

fn dec(s: &str) -> Dec {
    s.parse().expect("decimal literal")
}

/// A permanently locked account at `account(1)` holding 1000 test, with a
/// validator bonding 2 tokens against 1.1 shares.
fn locked_ledger() -> Result<Ledger> {
    let mut ledger = Ledger::new();
    seed_permanent_locked(&mut ledger, account(1), &test_coins(1_000))?;
    ledger.put_validator(validator_id(7), 2, dec("1.1"))?;
    Ok(ledger)
}

#[test]
fn test_dust_delegation_is_removed_and_locked_balance_donated() -> Result<()> {
    let module = vesting_module();
    let mut ledger = locked_ledger()?;
    ledger.put_delegation(account(1), validator_id(7), dec("0.1"))?;
    let mut ctx = tx_context(account(1), NOW);

    module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1))?;

    let settled = stored_account(&ledger, &account(1))?;
    assert!(matches!(settled, Account::Base(_)));
    assert_eq!(settled.base().account_number, 0);
    assert!(ledger.balance(&account(1))?.is_zero());
    assert_eq!(ledger.community_pool()?, test_coins(1_000));
    assert!(ledger.delegation(&account(1), &validator_id(7))?.is_none());

    let event = &ctx.events()[0];
    assert_eq!(event.attribute("module"), Some("vesting"));
    assert_eq!(event.attribute("amount"), Some("1000test"));
    Ok(())
}

#[test]
fn test_non_dust_delegation_aborts_without_side_effects() -> Result<()> {
    let module = vesting_module();
    let mut ledger = locked_ledger()?;
    ledger.put_delegation(account(1), validator_id(7), dec("1"))?;
    let before = ledger.state.clone();
    let mut ctx = tx_context(account(1), NOW);

    let err = assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::NonZeroStakingEntry { tokens: 1, .. }
    );
    assert_eq!(err.kind(), ErrorKind::StateInvariant);

    // Validator shares, the delegation, the account and the pool are untouched.
    assert_eq!(ledger.state, before);
    assert!(stored_account(&ledger, &account(1))?.as_vesting().is_some());
    assert!(ledger.community_pool()?.is_zero());
    assert!(ctx.events().is_empty());
    Ok(())
}

#[test]
fn test_non_dust_delegation_after_dust_rolls_back_dust_removal() -> Result<()> {
    let module = vesting_module();
    let mut ledger = locked_ledger()?;
    let stake = |n: u128| Dec::from_integer(n).expect("whole shares");
    // validator_id(7) sorts first, so its dust delegation is deleted before
    // the large pool at validator_id(8) is reached.
    ledger.put_delegation(account(1), validator_id(7), dec("0.1"))?;
    ledger.put_validator(validator_id(8), 1_000_000_000_000, stake(1_000_000_000_000))?;
    ledger.put_delegation(account(1), validator_id(8), stake(100_000_000_000))?;
    let before = ledger.state.clone();
    let mut ctx = tx_context(account(1), NOW);

    let err = assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::NonZeroStakingEntry {
            tokens: 100_000_000_000,
            ..
        }
    );
    assert_eq!(err.kind(), ErrorKind::StateInvariant);

    assert_eq!(ledger.state, before);
    assert!(ledger.delegation(&account(1), &validator_id(7))?.is_some());
    assert!(ledger.delegation(&account(1), &validator_id(8))?.is_some());
    assert!(ledger.community_pool()?.is_zero());
    assert!(ctx.events().is_empty());
    Ok(())
}

#[test]
fn test_plain_account_cannot_donate() -> Result<()> {
    let module = vesting_module();
    let mut ledger = Ledger::new();
    ledger.fund_account(account(1), &test_coins(1_000))?;
    let mut ctx = tx_context(account(1), NOW);

    assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::NotVestingAccount { .. }
    );
    assert_eq!(ledger.balance(&account(1))?, test_coins(1_000));
    Ok(())
}

#[test]
fn test_plain_account_dust_removal_is_rolled_back() -> Result<()> {
    let module = vesting_module();
    let mut ledger = Ledger::new();
    ledger.fund_account(account(1), &test_coins(1_000))?;
    ledger.put_validator(validator_id(7), 2, dec("1.1"))?;
    ledger.put_delegation(account(1), validator_id(7), dec("0.1"))?;
    let before = ledger.state.clone();
    let mut ctx = tx_context(account(1), NOW);

    assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::NotVestingAccount { .. }
    );
    assert_eq!(ledger.state, before);
    assert!(ledger.delegation(&account(1), &validator_id(7))?.is_some());
    Ok(())
}

#[test]
fn test_unbonding_entry_blocks_donation() -> Result<()> {
    let module = vesting_module();
    let mut ledger = locked_ledger()?;
    ledger.put_delegation(account(1), validator_id(7), dec("0.1"))?;
    ledger.put_unbonding(account(1), validator_id(7), 5)?;
    let before = ledger.state.clone();
    let mut ctx = tx_context(account(1), NOW);

    let err = assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::HasStakingEntry { .. }
    );
    assert_eq!(err.kind(), ErrorKind::StateInvariant);
    assert_eq!(ledger.state, before);
    Ok(())
}

#[test]
fn test_redelegation_entry_blocks_donation() -> Result<()> {
    let module = vesting_module();
    let mut ledger = locked_ledger()?;
    ledger.put_redelegation(account(1), validator_id(7), validator_id(8), 5)?;
    let before = ledger.state.clone();
    let mut ctx = tx_context(account(1), NOW);

    assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::HasStakingEntry { .. }
    );
    assert_eq!(ledger.state, before);
    Ok(())
}

#[test]
fn test_delegation_to_unknown_validator_fails() -> Result<()> {
    let module = vesting_module();
    let mut ledger = locked_ledger()?;
    ledger.put_delegation(account(1), validator_id(9), dec("0.1"))?;
    let mut ctx = tx_context(account(1), NOW);

    let err = assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::ValidatorNotFound { .. }
    );
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[test]
fn test_missing_account_fails() -> Result<()> {
    let module = vesting_module();
    let mut ledger = Ledger::new();
    let mut ctx = tx_context(account(5), NOW);

    let err = assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(5)),
        VestingError::AccountNotFound { .. }
    );
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(ledger.state.is_empty());
    Ok(())
}

#[test]
fn test_fully_vested_account_has_nothing_to_donate() -> Result<()> {
    let module = vesting_module();
    let mut ledger = Ledger::new();
    let base = ledger.allocate(account(1))?;
    let vested = VestingAccount::delayed(base, test_coins(300), NOW - 1);
    ledger.put_account(&Account::Vesting(vested), &test_coins(300))?;
    let mut ctx = tx_context(account(1), NOW);

    assert_vesting_err!(
        module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1)),
        VestingError::NoVestingTokens { .. }
    );
    assert!(stored_account(&ledger, &account(1))?.as_vesting().is_some());
    assert!(ledger.community_pool()?.is_zero());
    Ok(())
}

#[test]
fn test_partially_vested_account_donates_only_the_locked_part() -> Result<()> {
    let module = vesting_module();
    let mut ledger = Ledger::new();
    let base = ledger.allocate(account(1))?;
    let continuous = VestingAccount::continuous(base, test_coins(1_000), NOW - 250, NOW + 750)?;
    ledger.put_account(&Account::Vesting(continuous), &test_coins(1_000))?;
    let mut ctx = tx_context(account(1), NOW);

    module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1))?;

    assert_eq!(ledger.community_pool()?, test_coins(750));
    assert_eq!(ledger.balance(&account(1))?, test_coins(250));
    assert!(stored_account(&ledger, &account(1))?.as_vesting().is_none());
    Ok(())
}

proptest! {
    #[test]
    fn prop_donation_conserves_the_balance(elapsed in 0i64..1_000, original in 1u128..1_000_000) {
        let module = vesting_module();
        let mut ledger = Ledger::new();
        let base = ledger.allocate(account(1)).unwrap();
        let continuous =
            VestingAccount::continuous(base, test_coins(original), NOW - elapsed, NOW - elapsed + 1_000)
                .unwrap();
        let locked = continuous.locked_coins(NOW);
        ledger.put_account(&Account::Vesting(continuous), &test_coins(original)).unwrap();
        let mut ctx = tx_context(account(1), NOW);

        let result = module.donate_all_vesting_tokens(&mut ledger.state, &mut ctx, &donate(1));
        if locked.is_zero() {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
            let pool = ledger.community_pool().unwrap();
            let kept = ledger.balance(&account(1)).unwrap();
            prop_assert_eq!(&pool, &locked);
            prop_assert_eq!(pool.amount_of("test") + kept.amount_of("test"), original);
        }
    }
}
