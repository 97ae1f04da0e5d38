// Path: crates/services/tests/lifecycle.rs
//! End-to-end tests for vesting account creation.

mod common;

use anyhow::Result;
use common::{stored_account, vesting_module};
use vestal_test_utils::assert_vesting_err;
use vestal_test_utils::fixtures::{account, test_coins, tx_context, Ledger};
use vestal_types::app::{
    Coin, Coins, MsgCreatePeriodicVestingAccount, MsgCreatePermanentLockedAccount,
    MsgCreateVestingAccount, Period, VestingSchedule,
};
use vestal_types::error::{ErrorKind, TransactionError, VestingError};

const NOW: i64 = 1_700_000_000;

fn create_msg(to: u8, amount: u128, end_time: i64, delayed: bool) -> MsgCreateVestingAccount {
    MsgCreateVestingAccount {
        from_address: account(1).to_string(),
        to_address: account(to).to_string(),
        amount: test_coins(amount),
        end_time,
        delayed,
    }
}

fn funded_ledger() -> Result<Ledger> {
    let mut ledger = Ledger::new();
    ledger.fund_account(account(1), &test_coins(1_000))?;
    Ok(ledger)
}

#[test]
fn test_delayed_account_locks_until_end_time_and_cannot_be_recreated() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    let mut ctx = tx_context(account(1), NOW);

    let msg = create_msg(2, 100, NOW + 10_000, true);
    module.create_vesting_account(&mut ledger.state, &mut ctx, &msg)?;

    let created = stored_account(&ledger, &account(2))?;
    let vesting = created.as_vesting().expect("vesting account");
    assert_eq!(vesting.schedule(), &VestingSchedule::Delayed);
    assert_eq!(vesting.locked_coins(NOW), test_coins(100));
    assert!(vesting.locked_coins(NOW + 10_000).is_zero());
    assert_eq!(ledger.balance(&account(1))?, test_coins(900));
    assert_eq!(ledger.balance(&account(2))?, test_coins(100));

    let event = &ctx.events()[0];
    assert_eq!(event.kind, "message");
    assert_eq!(event.attribute("module"), Some("vesting"));
    assert_eq!(event.attribute("recipient"), Some(account(2).to_string().as_str()));

    // A second creation at the same address is a conflict, whatever the variant.
    for delayed in [true, false] {
        let again = create_msg(2, 100, NOW + 10_000, delayed);
        let err = assert_vesting_err!(
            module.create_vesting_account(&mut ledger.state, &mut ctx, &again),
            VestingError::AccountExists { .. }
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
    assert_eq!(ledger.balance(&account(1))?, test_coins(900));
    assert_eq!(ctx.events().len(), 1);
    Ok(())
}

#[test]
fn test_continuous_account_starts_at_block_time() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    let mut ctx = tx_context(account(1), NOW);

    module.create_vesting_account(&mut ledger.state, &mut ctx, &create_msg(2, 100, NOW + 100, false))?;

    let created = stored_account(&ledger, &account(2))?;
    let vesting = created.as_vesting().expect("vesting account");
    assert_eq!(vesting.start_time(), NOW);
    assert_eq!(vesting.end_time(), NOW + 100);
    assert_eq!(vesting.vested_coins(NOW + 25), test_coins(25));
    assert_eq!(created.base().account_number, 1);
    Ok(())
}

#[test]
fn test_continuous_end_time_in_the_past_is_rejected() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    let mut ctx = tx_context(account(1), NOW);

    assert_vesting_err!(
        module.create_vesting_account(&mut ledger.state, &mut ctx, &create_msg(2, 100, NOW - 1, false)),
        VestingError::InvalidEndTime { .. }
    );
    assert!(ledger.account(&account(2))?.is_none());
    Ok(())
}

#[test]
fn test_blocked_recipient_and_disabled_denom_are_rejected() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    let mut ctx = tx_context(account(1), NOW);

    ledger.block_address(&account(2))?;
    let err = assert_vesting_err!(
        module.create_vesting_account(&mut ledger.state, &mut ctx, &create_msg(2, 100, NOW + 1, true)),
        VestingError::BlockedRecipient { .. }
    );
    assert_eq!(err.kind(), ErrorKind::Authorization);

    ledger.disable_send("test")?;
    let msg = MsgCreatePermanentLockedAccount {
        from_address: account(1).to_string(),
        to_address: account(3).to_string(),
        amount: test_coins(10),
    };
    let err = assert_vesting_err!(
        module.create_permanent_locked_account(&mut ledger.state, &mut ctx, &msg),
        VestingError::SendDisabled { .. }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(ctx.events().is_empty());
    Ok(())
}

#[test]
fn test_malformed_recipient_is_a_validation_error() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    let mut ctx = tx_context(account(1), NOW);

    let mut msg = create_msg(2, 100, NOW + 1, true);
    msg.to_address = "zz".into();
    let err = assert_vesting_err!(
        module.create_vesting_account(&mut ledger.state, &mut ctx, &msg),
        VestingError::InvalidAddress { .. }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    Ok(())
}

#[test]
fn test_failed_transfer_leaves_no_account_behind() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    let mut ctx = tx_context(account(1), NOW);
    let before = ledger.state.clone();

    // The account is stored before the transfer, which then fails.
    let err = module
        .create_vesting_account(&mut ledger.state, &mut ctx, &create_msg(2, 5_000, NOW + 1, true))
        .unwrap_err();
    assert!(matches!(err, TransactionError::InsufficientFunds { .. }));

    assert!(ledger.account(&account(2))?.is_none());
    assert_eq!(ledger.state, before);
    assert!(ctx.events().is_empty());

    // The account number counter was not consumed either.
    module.create_vesting_account(&mut ledger.state, &mut ctx, &create_msg(2, 10, NOW + 1, true))?;
    assert_eq!(stored_account(&ledger, &account(2))?.base().account_number, 1);
    Ok(())
}

#[test]
fn test_periodic_account_locks_the_sum_of_its_periods() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    let mut ctx = tx_context(account(1), NOW);

    // Starts in the past: the first period has already completed.
    let msg = MsgCreatePeriodicVestingAccount {
        from_address: account(1).to_string(),
        to_address: account(2).to_string(),
        start_time: NOW - 100,
        vesting_periods: vec![
            Period::new(50, test_coins(10)),
            Period::new(100, test_coins(20)),
            Period::new(100, test_coins(30)),
        ],
    };
    module.create_periodic_vesting_account(&mut ledger.state, &mut ctx, &msg)?;

    let created = stored_account(&ledger, &account(2))?;
    let vesting = created.as_vesting().expect("vesting account");
    assert_eq!(vesting.original_vesting(), &test_coins(60));
    assert_eq!(vesting.end_time(), NOW + 150);
    assert_eq!(vesting.locked_coins(NOW), test_coins(50));
    assert_eq!(vesting.locked_coins(NOW + 50), test_coins(30));
    assert!(vesting.locked_coins(NOW + 150).is_zero());
    assert_eq!(ledger.balance(&account(2))?, test_coins(60));
    Ok(())
}

#[test]
fn test_periodic_transferability_is_checked_on_the_computed_total() -> Result<()> {
    let module = vesting_module();
    let mut ledger = Ledger::new();
    let mixed = Coins::from(vec![Coin::new("test", 100), Coin::new("uusd", 100)]);
    ledger.fund_account(account(1), &mixed)?;
    ledger.disable_send("uusd")?;
    let mut ctx = tx_context(account(1), NOW);

    let msg = MsgCreatePeriodicVestingAccount {
        from_address: account(1).to_string(),
        to_address: account(2).to_string(),
        start_time: NOW,
        vesting_periods: vec![
            Period::new(10, test_coins(5)),
            Period::new(10, Coins::from(vec![Coin::new("uusd", 5)])),
        ],
    };
    assert_vesting_err!(
        module.create_periodic_vesting_account(&mut ledger.state, &mut ctx, &msg),
        VestingError::SendDisabled { .. }
    );
    assert!(ledger.account(&account(2))?.is_none());
    Ok(())
}

#[test]
fn test_periodic_existing_account_is_a_conflict() -> Result<()> {
    let module = vesting_module();
    let mut ledger = funded_ledger()?;
    ledger.fund_account(account(2), &Coins::empty())?;
    let mut ctx = tx_context(account(1), NOW);

    let msg = MsgCreatePeriodicVestingAccount {
        from_address: account(1).to_string(),
        to_address: account(2).to_string(),
        start_time: NOW,
        vesting_periods: vec![Period::new(10, test_coins(5))],
    };
    assert_vesting_err!(
        module.create_periodic_vesting_account(&mut ledger.state, &mut ctx, &msg),
        VestingError::AccountExists { .. }
    );
    assert_eq!(ledger.balance(&account(1))?, test_coins(1_000));
    assert!(ctx.events().is_empty());
    Ok(())
}
