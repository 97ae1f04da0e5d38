// Path: crates/services/src/vesting/lifecycle.rs

//! Creation of the four vesting account variants.
//!
//! Each operation validates the message, resolves both addresses, refuses a
//! blocked or occupied recipient, allocates and stores the vesting account,
//! and only then transfers the funds. The store-then-transfer order is kept;
//! a failed transfer is undone by the overlay `execute_atomic` wraps around
//! the whole operation.

use super::{parse_address, VestingModule};
use vestal_api::state::StateAccess;
use vestal_api::transaction::context::TxContext;
use vestal_api::transaction::execute_atomic;
use vestal_telemetry::vesting_metrics;
use vestal_types::app::{
    Account, AccountId, Coins, ModuleEvent, MsgCreatePeriodicVestingAccount,
    MsgCreatePermanentLockedAccount, MsgCreateVestingAccount, Period, VestingAccount,
    ATTRIBUTE_KEY_RECIPIENT, ATTRIBUTE_KEY_SENDER,
};
use vestal_types::error::{TransactionError, VestingError};

const TELEMETRY_CREATE_VESTING: &str = "create_vesting_account";
const TELEMETRY_CREATE_PERMANENT_LOCKED: &str = "create_permanent_locked_account";
const TELEMETRY_CREATE_PERIODIC: &str = "create_periodic_vesting_account";

fn periods_total(periods: &[Period]) -> Result<Coins, VestingError> {
    periods.iter().try_fold(Coins::empty(), |acc, p| {
        acc.checked_add(&p.amount)
            .ok_or_else(|| VestingError::InvalidPeriods("period amounts overflow".into()))
    })
}

impl VestingModule {
    /// Creates a delayed (`msg.delayed`) or continuous vesting account at
    /// `msg.to_address`, funded by `msg.from_address`. A continuous schedule
    /// starts at the current block time.
    pub fn create_vesting_account(
        &self,
        state: &mut dyn StateAccess,
        ctx: &mut TxContext,
        msg: &MsgCreateVestingAccount,
    ) -> Result<(), TransactionError> {
        let kind = execute_atomic(state, ctx, |state, ctx| {
            msg.validate_basic(&self.params)?;
            self.bank.is_send_enabled_coins(state, &msg.amount)?;

            let from = parse_address(&msg.from_address)?;
            let to = parse_address(&msg.to_address)?;
            self.ensure_recipient_available(state, &to)?;

            let base = self.accounts.new_account_with_address(state, &to)?;
            let account = if msg.delayed {
                VestingAccount::delayed(base, msg.amount.clone(), msg.end_time)
            } else {
                let start_time = ctx.block_timestamp;
                VestingAccount::continuous(base, msg.amount.clone(), start_time, msg.end_time)?
            };
            let kind = account.schedule().kind();
            self.store_and_fund(state, ctx, account, &from, &msg.amount)?;
            Ok(kind)
        })?;
        record_creation(TELEMETRY_CREATE_VESTING, kind, &msg.amount);
        Ok(())
    }

    /// Creates a permanently locked account at `msg.to_address`.
    pub fn create_permanent_locked_account(
        &self,
        state: &mut dyn StateAccess,
        ctx: &mut TxContext,
        msg: &MsgCreatePermanentLockedAccount,
    ) -> Result<(), TransactionError> {
        let kind = execute_atomic(state, ctx, |state, ctx| {
            msg.validate_basic(&self.params)?;
            self.bank.is_send_enabled_coins(state, &msg.amount)?;

            let from = parse_address(&msg.from_address)?;
            let to = parse_address(&msg.to_address)?;
            self.ensure_recipient_available(state, &to)?;

            let base = self.accounts.new_account_with_address(state, &to)?;
            let account = VestingAccount::permanent_locked(base, msg.amount.clone());
            let kind = account.schedule().kind();
            self.store_and_fund(state, ctx, account, &from, &msg.amount)?;
            Ok(kind)
        })?;
        record_creation(TELEMETRY_CREATE_PERMANENT_LOCKED, kind, &msg.amount);
        Ok(())
    }

    /// Creates a periodic vesting account at `msg.to_address`. The locked
    /// total is the sum of the period amounts, and it is that computed total
    /// whose transferability is checked.
    pub fn create_periodic_vesting_account(
        &self,
        state: &mut dyn StateAccess,
        ctx: &mut TxContext,
        msg: &MsgCreatePeriodicVestingAccount,
    ) -> Result<(), TransactionError> {
        let (kind, total) = execute_atomic(state, ctx, |state, ctx| {
            msg.validate_basic(&self.params)?;

            let from = parse_address(&msg.from_address)?;
            let to = parse_address(&msg.to_address)?;
            self.ensure_recipient_available(state, &to)?;

            let total = periods_total(&msg.vesting_periods)?;
            self.bank.is_send_enabled_coins(state, &total)?;

            let base = self.accounts.new_account_with_address(state, &to)?;
            let account =
                VestingAccount::periodic(base, msg.start_time, msg.vesting_periods.clone())?;
            let kind = account.schedule().kind();
            self.store_and_fund(state, ctx, account, &from, &total)?;
            Ok((kind, total))
        })?;
        record_creation(TELEMETRY_CREATE_PERIODIC, kind, &total);
        Ok(())
    }

    fn ensure_recipient_available(
        &self,
        state: &dyn StateAccess,
        to: &AccountId,
    ) -> Result<(), TransactionError> {
        if self.bank.blocked_addr(state, to)? {
            return Err(VestingError::BlockedRecipient {
                address: to.to_string(),
            }
            .into());
        }
        if self.accounts.has_account(state, to)? {
            return Err(VestingError::AccountExists {
                address: to.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn store_and_fund(
        &self,
        state: &mut dyn StateAccess,
        ctx: &mut TxContext,
        account: VestingAccount,
        from: &AccountId,
        amount: &Coins,
    ) -> Result<(), TransactionError> {
        let to = *account.address();
        let kind = account.schedule().kind();
        let account_number = account.base_account().account_number;
        self.accounts.set_account(state, &Account::Vesting(account))?;
        self.bank.send_coins(state, from, &to, amount)?;

        ctx.emit_event(
            ModuleEvent::message(&self.params.module_name)
                .with_attribute(ATTRIBUTE_KEY_SENDER, from)
                .with_attribute(ATTRIBUTE_KEY_RECIPIENT, to),
        );
        tracing::info!(
            target: "vesting",
            sender = %from,
            recipient = %to,
            kind,
            account_number,
            amount = %amount,
            "created vesting account"
        );
        Ok(())
    }
}

fn record_creation(msg: &str, kind: &str, amount: &Coins) {
    let sink = vesting_metrics();
    sink.inc_new_account(kind);
    for coin in amount.iter() {
        if let Ok(value) = i64::try_from(coin.amount) {
            sink.set_msg_amount(msg, &coin.denom, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestal_types::app::Coin;

    #[test]
    fn test_periods_total_sums_every_denomination() {
        let periods = vec![
            Period::new(1, Coins::from(vec![Coin::new("test", 10)])),
            Period::new(1, Coins::from(vec![Coin::new("test", 5), Coin::new("uusd", 2)])),
        ];
        let total = periods_total(&periods).unwrap();
        assert_eq!(total.amount_of("test"), 15);
        assert_eq!(total.amount_of("uusd"), 2);
    }

    #[test]
    fn test_periods_total_reports_overflow() {
        let periods = vec![
            Period::new(1, Coins::from(vec![Coin::new("test", u128::MAX)])),
            Period::new(1, Coins::from(vec![Coin::new("test", 1)])),
        ];
        assert!(matches!(
            periods_total(&periods),
            Err(VestingError::InvalidPeriods(_))
        ));
    }
}
