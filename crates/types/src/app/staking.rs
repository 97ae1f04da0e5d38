// Path: crates/types/src/app/staking.rs

//! Staking records consumed by the donation flow.
//!
//! Only the shape the vesting service needs is modelled here: delegations and
//! their validator-side share accounting, plus the in-flight unbonding and
//! redelegation entries whose mere presence blocks a donation.

use alloy_primitives::U256;
use crate::app::{AccountId, Timestamp, ValidatorId};
use crate::error::VestingError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The number of fractional digits carried by a [`Dec`].
pub const DEC_PRECISION: u32 = 18;
const DEC_ONE: u128 = 10u128.pow(DEC_PRECISION);

/// A non-negative fixed-point decimal with 18 fractional digits.
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash,
)]
#[serde(transparent)]
pub struct Dec(u128);

impl Dec {
    /// Zero.
    pub const ZERO: Dec = Dec(0);

    /// Wraps a raw value already scaled by `10^18`.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// The raw value scaled by `10^18`.
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// The decimal equal to the integer `n`, or `None` if it does not fit.
    pub fn from_integer(n: u128) -> Option<Self> {
        n.checked_mul(DEC_ONE).map(Self)
    }

    /// True when the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtraction that fails instead of going negative.
    pub fn checked_sub(self, other: Dec) -> Option<Dec> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Addition that fails on overflow.
    pub fn checked_add(self, other: Dec) -> Option<Dec> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl FromStr for Dec {
    type Err = VestingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VestingError::InvalidCoins(format!("invalid decimal '{s}'"));
        let (int_part, frac_part) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty()
            || frac_part.len() > DEC_PRECISION as usize
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let int: u128 = int_part.parse().map_err(|_| invalid())?;
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            let padded = format!("{frac_part:0<width$}", width = DEC_PRECISION as usize);
            padded.parse().map_err(|_| invalid())?
        };
        int.checked_mul(DEC_ONE)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:018}", self.0 / DEC_ONE, self.0 % DEC_ONE)
    }
}

/// A stake delegation from an account to a validator.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Delegation {
    /// The delegating account.
    pub delegator: AccountId,
    /// The validator receiving the stake.
    pub validator: ValidatorId,
    /// The delegator's shares of the validator's pool.
    pub shares: Dec,
}

/// A validator's token pool and the shares issued against it.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Validator {
    /// The operator identifier.
    pub operator: ValidatorId,
    /// Bonded tokens held by the validator.
    pub tokens: u128,
    /// Total shares issued to delegators.
    pub delegator_shares: Dec,
}

impl Validator {
    /// The whole tokens `shares` are worth: `floor(shares * tokens / delegator_shares)`.
    ///
    /// Returns `None` only if `shares` exceeds the issued total.
    pub fn tokens_from_shares(&self, shares: Dec) -> Option<u128> {
        if shares > self.delegator_shares {
            return None;
        }
        if shares == self.delegator_shares {
            return Some(self.tokens);
        }
        // shares < delegator_shares, so the divisor is non-zero and the
        // quotient is below `tokens`.
        let product = U256::from(self.tokens) * U256::from(shares.raw());
        let freed = product / U256::from(self.delegator_shares.raw());
        u128::try_from(freed).ok()
    }

    /// Burns `shares` and removes the tokens they are worth from the pool.
    /// Returns the number of tokens freed.
    pub fn remove_del_shares(&mut self, shares: Dec) -> Option<u128> {
        let freed = self.tokens_from_shares(shares)?;
        let remaining_shares = self.delegator_shares.checked_sub(shares)?;
        self.tokens = self.tokens.checked_sub(freed)?;
        self.delegator_shares = remaining_shares;
        Some(freed)
    }
}

/// One maturing entry of an unbonding delegation.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct UnbondingEntry {
    /// The height at which unbonding began.
    pub creation_height: u64,
    /// The instant the tokens become liquid.
    pub completion_time: Timestamp,
    /// Tokens at the start of unbonding.
    pub initial_balance: u128,
    /// Tokens remaining after any slashing.
    pub balance: u128,
}

/// Tokens being unbonded from one validator.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct UnbondingDelegation {
    /// The unbonding account.
    pub delegator: AccountId,
    /// The validator being left.
    pub validator: ValidatorId,
    /// The maturing entries.
    pub entries: Vec<UnbondingEntry>,
}

/// One maturing entry of a redelegation.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct RedelegationEntry {
    /// The height at which the redelegation began.
    pub creation_height: u64,
    /// The instant the redelegation matures.
    pub completion_time: Timestamp,
    /// Tokens moved.
    pub initial_balance: u128,
    /// Shares issued by the destination validator.
    pub shares_dst: Dec,
}

/// Stake being moved from one validator to another.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Redelegation {
    /// The redelegating account.
    pub delegator: AccountId,
    /// The validator the stake leaves.
    pub validator_src: ValidatorId,
    /// The validator the stake joins.
    pub validator_dst: ValidatorId,
    /// The maturing entries.
    pub entries: Vec<RedelegationEntry>,
}
