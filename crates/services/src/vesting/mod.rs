// Path: crates/services/src/vesting/mod.rs

//! The vesting service.
//!
//! Creates the four vesting account variants and settles donations of the
//! still-locked balance to the community pool. Every operation runs inside
//! its own `StateOverlay` through `execute_atomic`, so a failure at any step
//! leaves the account, bank, staking and distribution stores untouched and
//! drops the events the operation emitted. Metrics are recorded only after
//! the overlay has been committed.

use parity_scale_codec::Decode;
use std::any::Any;
use std::sync::Arc;
use vestal_api::prelude::{
    AccountKeeper, BankKeeper, BlockchainService, DistributionKeeper, StakingKeeper, StateAccess,
    TxContext,
};
use vestal_telemetry::time::DispatchTimer;
use vestal_telemetry::{error_metrics, service_metrics};
use vestal_types::app::{
    AccountId, MsgCreatePeriodicVestingAccount, MsgCreatePermanentLockedAccount,
    MsgCreateVestingAccount, MsgDonateAllVestingTokens,
};
use vestal_types::codec;
use vestal_types::error::{ErrorCode, TransactionError, VestingError};
use vestal_types::service_configs::VestingParams;

mod donation;
mod lifecycle;

/// Method name for [`MsgCreateVestingAccount`].
pub const CREATE_VESTING_ACCOUNT: &str = "create_vesting_account@v1";
/// Method name for [`MsgCreatePermanentLockedAccount`].
pub const CREATE_PERMANENT_LOCKED_ACCOUNT: &str = "create_permanent_locked_account@v1";
/// Method name for [`MsgCreatePeriodicVestingAccount`].
pub const CREATE_PERIODIC_VESTING_ACCOUNT: &str = "create_periodic_vesting_account@v1";
/// Method name for [`MsgDonateAllVestingTokens`].
pub const DONATE_ALL_VESTING_TOKENS: &str = "donate_all_vesting_tokens@v1";

/// The vesting service and its injected collaborators.
pub struct VestingModule {
    accounts: Arc<dyn AccountKeeper>,
    bank: Arc<dyn BankKeeper>,
    staking: Arc<dyn StakingKeeper>,
    distribution: Arc<dyn DistributionKeeper>,
    params: VestingParams,
}

impl std::fmt::Debug for VestingModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VestingModule")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl VestingModule {
    /// Creates the service with default parameters.
    pub fn new(
        accounts: Arc<dyn AccountKeeper>,
        bank: Arc<dyn BankKeeper>,
        staking: Arc<dyn StakingKeeper>,
        distribution: Arc<dyn DistributionKeeper>,
    ) -> Self {
        Self {
            accounts,
            bank,
            staking,
            distribution,
            params: VestingParams::default(),
        }
    }

    /// Replaces the service parameters.
    pub fn with_params(mut self, params: VestingParams) -> Self {
        self.params = params;
        self
    }

    /// The active parameters.
    pub fn params(&self) -> &VestingParams {
        &self.params
    }

    fn dispatch(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        match method {
            CREATE_VESTING_ACCOUNT => {
                let msg: MsgCreateVestingAccount = decode_params(params)?;
                check_signer(ctx, msg.signer())?;
                self.create_vesting_account(state, ctx, &msg)
            }
            CREATE_PERMANENT_LOCKED_ACCOUNT => {
                let msg: MsgCreatePermanentLockedAccount = decode_params(params)?;
                check_signer(ctx, msg.signer())?;
                self.create_permanent_locked_account(state, ctx, &msg)
            }
            CREATE_PERIODIC_VESTING_ACCOUNT => {
                let msg: MsgCreatePeriodicVestingAccount = decode_params(params)?;
                check_signer(ctx, msg.signer())?;
                self.create_periodic_vesting_account(state, ctx, &msg)
            }
            DONATE_ALL_VESTING_TOKENS => {
                let msg: MsgDonateAllVestingTokens = decode_params(params)?;
                check_signer(ctx, msg.signer())?;
                self.donate_all_vesting_tokens(state, ctx, &msg)
            }
            _ => Err(TransactionError::Unsupported(format!(
                "Vesting does not support method '{}'",
                method
            ))),
        }
    }
}

fn decode_params<T: Decode>(params: &[u8]) -> Result<T, TransactionError> {
    codec::from_bytes_canonical(params).map_err(TransactionError::Deserialization)
}

/// Parses a message address field.
pub(crate) fn parse_address(address: &str) -> Result<AccountId, VestingError> {
    address.parse()
}

fn check_signer(ctx: &TxContext, sender: &str) -> Result<(), TransactionError> {
    let parsed = parse_address(sender)?;
    if parsed != ctx.signer_account_id {
        return Err(VestingError::SignerMismatch {
            signer: ctx.signer_account_id.to_string(),
            sender: sender.to_string(),
        }
        .into());
    }
    Ok(())
}

impl BlockchainService for VestingModule {
    fn id(&self) -> &str {
        "vesting"
    }

    fn abi_version(&self) -> u32 {
        1
    }

    fn state_schema(&self) -> &str {
        "v1"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        let _timer = DispatchTimer::new(service_metrics(), self.id(), method);
        let result = self.dispatch(state, method, params, ctx);
        if let Err(e) = &result {
            let kind = e.kind().as_str();
            error_metrics().inc_error(kind, e.code());
            service_metrics().inc_dispatch_error(self.id(), method, kind);
            tracing::warn!(
                target: "vesting",
                method,
                code = e.code(),
                error = %e,
                "vesting call rejected"
            );
        }
        result
    }
}
