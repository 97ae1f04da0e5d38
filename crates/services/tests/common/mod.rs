// Path: crates/services/tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;
use vestal_services::vesting::VestingModule;
use vestal_test_utils::keepers::{
    StateAccountKeeper, StateBankKeeper, StateDistributionKeeper, StateStakingKeeper,
};
use vestal_types::app::{Account, AccountId, Coins, VestingAccount};
use vestal_test_utils::fixtures::Ledger;

/// The vesting service wired to the state-backed reference collaborators.
pub fn vesting_module() -> VestingModule {
    VestingModule::new(
        Arc::new(StateAccountKeeper),
        Arc::new(StateBankKeeper),
        Arc::new(StateStakingKeeper),
        Arc::new(StateDistributionKeeper),
    )
}

/// Stores a permanently locked account at `owner` holding (and locking) `amount`.
pub fn seed_permanent_locked(
    ledger: &mut Ledger,
    owner: AccountId,
    amount: &Coins,
) -> anyhow::Result<()> {
    let base = ledger.allocate(owner)?;
    let account = VestingAccount::permanent_locked(base, amount.clone());
    ledger.put_account(&Account::Vesting(account), amount)?;
    Ok(())
}

/// The stored account at `address`, failing the test when absent.
pub fn stored_account(ledger: &Ledger, address: &AccountId) -> anyhow::Result<Account> {
    ledger
        .account(address)?
        .ok_or_else(|| anyhow::anyhow!("no account at {address}"))
}
