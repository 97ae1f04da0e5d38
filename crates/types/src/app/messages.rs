// Path: crates/types/src/app/messages.rs

//! Messages accepted by the vesting service.
//!
//! Addresses travel as strings so a malformed encoding is reported by the
//! service as a validation error instead of failing the message decode.

use crate::app::{AccountId, Coins, Period, Timestamp};
use crate::error::VestingError;
use crate::service_configs::VestingParams;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

fn check_address(address: &str) -> Result<AccountId, VestingError> {
    address.parse()
}

fn check_amount(amount: &Coins) -> Result<(), VestingError> {
    amount.validate()?;
    if amount.is_zero() {
        return Err(VestingError::InvalidCoins("amount must be positive".into()));
    }
    Ok(())
}

/// Creates a delayed or continuous vesting account funded by `from_address`.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MsgCreateVestingAccount {
    /// The funding account.
    pub from_address: String,
    /// The account to create.
    pub to_address: String,
    /// The coins to lock.
    pub amount: Coins,
    /// The instant the schedule completes.
    pub end_time: Timestamp,
    /// `true` for an all-or-nothing schedule, `false` for a linear one.
    pub delayed: bool,
}

impl MsgCreateVestingAccount {
    /// Stateless checks run before any state is read.
    pub fn validate_basic(&self, _params: &VestingParams) -> Result<(), VestingError> {
        check_address(&self.from_address)?;
        check_address(&self.to_address)?;
        check_amount(&self.amount)?;
        if self.end_time <= 0 {
            return Err(VestingError::InvalidEndTime {
                end_time: self.end_time,
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// The account that must sign the message.
    pub fn signer(&self) -> &str {
        &self.from_address
    }
}

/// Creates a permanently locked account funded by `from_address`.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MsgCreatePermanentLockedAccount {
    /// The funding account.
    pub from_address: String,
    /// The account to create.
    pub to_address: String,
    /// The coins to lock.
    pub amount: Coins,
}

impl MsgCreatePermanentLockedAccount {
    /// Stateless checks run before any state is read.
    pub fn validate_basic(&self, _params: &VestingParams) -> Result<(), VestingError> {
        check_address(&self.from_address)?;
        check_address(&self.to_address)?;
        check_amount(&self.amount)
    }

    /// The account that must sign the message.
    pub fn signer(&self) -> &str {
        &self.from_address
    }
}

/// Creates a periodic vesting account funded by `from_address`.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MsgCreatePeriodicVestingAccount {
    /// The funding account.
    pub from_address: String,
    /// The account to create.
    pub to_address: String,
    /// The instant the first period begins. May lie in the past.
    pub start_time: Timestamp,
    /// The unlock steps; the locked total is their sum.
    pub vesting_periods: Vec<Period>,
}

impl MsgCreatePeriodicVestingAccount {
    /// Stateless checks run before any state is read.
    pub fn validate_basic(&self, params: &VestingParams) -> Result<(), VestingError> {
        check_address(&self.from_address)?;
        check_address(&self.to_address)?;
        if self.start_time < 0 {
            return Err(VestingError::InvalidPeriods(format!(
                "start time {} must not be negative",
                self.start_time
            )));
        }
        if self.vesting_periods.is_empty() {
            return Err(VestingError::InvalidPeriods("no periods given".into()));
        }
        if self.vesting_periods.len() > params.max_periods as usize {
            return Err(VestingError::InvalidPeriods(format!(
                "{} periods exceed the limit of {}",
                self.vesting_periods.len(),
                params.max_periods
            )));
        }
        for (i, period) in self.vesting_periods.iter().enumerate() {
            if period.length < 1 {
                return Err(VestingError::InvalidPeriods(format!(
                    "period {i} has length {}, must be positive",
                    period.length
                )));
            }
            check_amount(&period.amount)
                .map_err(|e| VestingError::InvalidPeriods(format!("period {i}: {e}")))?;
        }
        Ok(())
    }

    /// The account that must sign the message.
    pub fn signer(&self) -> &str {
        &self.from_address
    }
}

/// Forfeits everything still locked in `from_address` to the community pool.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MsgDonateAllVestingTokens {
    /// The vesting account to settle.
    pub from_address: String,
}

impl MsgDonateAllVestingTokens {
    /// Stateless checks run before any state is read.
    pub fn validate_basic(&self, _params: &VestingParams) -> Result<(), VestingError> {
        check_address(&self.from_address).map(|_| ())
    }

    /// The account that must sign the message.
    pub fn signer(&self) -> &str {
        &self.from_address
    }
}
