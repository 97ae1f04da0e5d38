// Path: crates/types/src/app/vesting.rs

//! The vesting schedule model.
//!
//! A `VestingAccount` wraps a `BaseAccount` with the coins locked at creation
//! (`original_vesting`), the delegation tracking maintained by the staking
//! collaborator, and one of four closed schedule variants. Every query here is
//! a pure function of the account and a ledger timestamp:
//!
//! * `vested_coins(t)` is non-decreasing in `t` and never exceeds `original_vesting`.
//! * `locked_coins(t)` is `original_vesting - vested_coins(t)` per denomination.
//!
//! All boundary comparisons are inclusive, so an account is fully vested the
//! instant `t` reaches its end time. Arithmetic is exact integer arithmetic;
//! a continuous schedule floors each denomination and leaves the remainder locked.

use crate::app::{AccountId, BaseAccount, Coins, Timestamp};
use crate::error::VestingError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// One step of a periodic schedule.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Period {
    /// Seconds after the previous period's unlock (or the start time, for the first).
    pub length: i64,
    /// Coins unlocked when this period completes.
    pub amount: Coins,
}

impl Period {
    /// Creates a new period.
    pub fn new(length: i64, amount: Coins) -> Self {
        Self { length, amount }
    }
}

/// The fields shared by every vesting variant.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct BaseVestingAccount {
    /// The wrapped plain account.
    pub base: BaseAccount,
    /// Coins locked at creation. Fixed after construction.
    pub original_vesting: Coins,
    /// Vested coins currently delegated.
    pub delegated_free: Coins,
    /// Still-locked coins currently delegated.
    pub delegated_vesting: Coins,
    /// The instant the schedule completes (zero for permanently locked accounts).
    pub end_time: Timestamp,
}

/// The unlock rule of a vesting account.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum VestingSchedule {
    /// Everything unlocks at `end_time`.
    Delayed,
    /// Linear unlock between `start_time` and `end_time`.
    Continuous {
        /// The instant unlocking begins.
        start_time: Timestamp,
    },
    /// Cumulative step unlock.
    Periodic {
        /// The instant the first period begins.
        start_time: Timestamp,
        /// The periods, consumed strictly in order.
        periods: Vec<Period>,
    },
    /// Never unlocks by time; only a donation releases the account.
    PermanentLocked,
}

impl VestingSchedule {
    /// A short, stable name for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Delayed => "delayed",
            Self::Continuous { .. } => "continuous",
            Self::Periodic { .. } => "periodic",
            Self::PermanentLocked => "permanent_locked",
        }
    }
}

/// A time-locked account.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct VestingAccount {
    base_vesting: BaseVestingAccount,
    schedule: VestingSchedule,
}

/// `floor(amount * num / den)` for `num < den`, without intermediate overflow.
fn mul_div_floor(amount: u128, num: u64, den: u64) -> u128 {
    let den = u128::from(den);
    let num = u128::from(num);
    let (q, r) = (amount / den, amount % den);
    // r < den and num < den, both below 2^64, so r * num fits in u128.
    q * num + (r * num) / den
}

impl VestingAccount {
    fn new(base: BaseAccount, original_vesting: Coins, end_time: Timestamp, schedule: VestingSchedule) -> Self {
        Self {
            base_vesting: BaseVestingAccount {
                base,
                original_vesting,
                delegated_free: Coins::empty(),
                delegated_vesting: Coins::empty(),
                end_time,
            },
            schedule,
        }
    }

    /// An all-or-nothing schedule unlocking at `end_time`.
    pub fn delayed(base: BaseAccount, original_vesting: Coins, end_time: Timestamp) -> Self {
        Self::new(base, original_vesting, end_time, VestingSchedule::Delayed)
    }

    /// A linear schedule. Fails if `end_time` precedes `start_time`.
    pub fn continuous(
        base: BaseAccount,
        original_vesting: Coins,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<Self, VestingError> {
        if end_time < start_time {
            return Err(VestingError::InvalidEndTime {
                end_time,
                reason: format!("precedes start time {start_time}"),
            });
        }
        Ok(Self::new(
            base,
            original_vesting,
            end_time,
            VestingSchedule::Continuous { start_time },
        ))
    }

    /// A step schedule. The locked total is the sum of the period amounts and
    /// the end time is `start_time` plus the sum of the period lengths.
    pub fn periodic(
        base: BaseAccount,
        start_time: Timestamp,
        periods: Vec<Period>,
    ) -> Result<Self, VestingError> {
        let mut total = Coins::empty();
        let mut end_time = start_time;
        for (i, period) in periods.iter().enumerate() {
            if period.length < 0 {
                return Err(VestingError::InvalidPeriods(format!(
                    "period {i} has negative length {}",
                    period.length
                )));
            }
            total = total.checked_add(&period.amount).ok_or_else(|| {
                VestingError::InvalidPeriods("period amounts overflow".into())
            })?;
            end_time = end_time.checked_add(period.length).ok_or_else(|| {
                VestingError::InvalidPeriods("period lengths overflow the end time".into())
            })?;
        }
        Ok(Self::new(
            base,
            total,
            end_time,
            VestingSchedule::Periodic {
                start_time,
                periods,
            },
        ))
    }

    /// A schedule that never unlocks by time.
    pub fn permanent_locked(base: BaseAccount, original_vesting: Coins) -> Self {
        Self::new(base, original_vesting, 0, VestingSchedule::PermanentLocked)
    }

    /// The wrapped plain account.
    pub fn base_account(&self) -> &BaseAccount {
        &self.base_vesting.base
    }

    /// The account's address.
    pub fn address(&self) -> &AccountId {
        &self.base_vesting.base.address
    }

    /// The shared vesting fields.
    pub fn base_vesting(&self) -> &BaseVestingAccount {
        &self.base_vesting
    }

    /// The unlock rule.
    pub fn schedule(&self) -> &VestingSchedule {
        &self.schedule
    }

    /// Coins locked at creation.
    pub fn original_vesting(&self) -> &Coins {
        &self.base_vesting.original_vesting
    }

    /// Vested coins currently delegated.
    pub fn delegated_free(&self) -> &Coins {
        &self.base_vesting.delegated_free
    }

    /// Still-locked coins currently delegated.
    pub fn delegated_vesting(&self) -> &Coins {
        &self.base_vesting.delegated_vesting
    }

    /// The instant unlocking begins.
    pub fn start_time(&self) -> Timestamp {
        match &self.schedule {
            VestingSchedule::Continuous { start_time }
            | VestingSchedule::Periodic { start_time, .. } => *start_time,
            VestingSchedule::Delayed | VestingSchedule::PermanentLocked => 0,
        }
    }

    /// The instant the schedule completes.
    pub fn end_time(&self) -> Timestamp {
        self.base_vesting.end_time
    }

    /// Coins unlocked by the schedule as of `t`.
    pub fn vested_coins(&self, t: Timestamp) -> Coins {
        let original = &self.base_vesting.original_vesting;
        let end_time = self.base_vesting.end_time;
        match &self.schedule {
            VestingSchedule::Delayed => {
                if t >= end_time {
                    original.clone()
                } else {
                    Coins::empty()
                }
            }
            VestingSchedule::Continuous { start_time } => {
                if t >= end_time {
                    return original.clone();
                }
                if t <= *start_time {
                    return Coins::empty();
                }
                // start < t < end, so both spans are positive and below 2^64.
                let elapsed = i128::from(t) - i128::from(*start_time);
                let duration = i128::from(end_time) - i128::from(*start_time);
                let elapsed = u64::try_from(elapsed).unwrap_or(u64::MAX);
                let duration = u64::try_from(duration).unwrap_or(u64::MAX);
                original.map_amounts(|amount| mul_div_floor(amount, elapsed, duration))
            }
            VestingSchedule::Periodic {
                start_time,
                periods,
            } => {
                let elapsed = i128::from(t) - i128::from(*start_time);
                let mut offset: i128 = 0;
                let mut vested = Coins::empty();
                for period in periods {
                    offset += i128::from(period.length);
                    if offset > elapsed {
                        break;
                    }
                    vested = match vested.checked_add(&period.amount) {
                        Some(sum) => sum,
                        None => return original.clone(),
                    };
                }
                vested.min(original)
            }
            VestingSchedule::PermanentLocked => Coins::empty(),
        }
    }

    /// Coins still locked by the schedule as of `t`.
    pub fn locked_coins(&self, t: Timestamp) -> Coins {
        self.base_vesting
            .original_vesting
            .saturating_sub(&self.vested_coins(t))
    }

    /// The part of the locked balance the bank must refuse to spend: locked
    /// coins not already accounted for by a delegation of locked coins.
    pub fn unspendable_coins(&self, t: Timestamp) -> Coins {
        self.locked_coins(t)
            .saturating_sub(&self.base_vesting.delegated_vesting)
    }

    /// Records a delegation of `amount` out of an account holding `balance`.
    ///
    /// Locked coins are attributed first; anything beyond the undelegated
    /// locked amount counts as free.
    pub fn track_delegation(
        &mut self,
        balance: &Coins,
        t: Timestamp,
        amount: &Coins,
    ) -> Result<(), VestingError> {
        amount.validate()?;
        if amount.is_zero() {
            return Err(VestingError::InvalidCoins("delegation amount is empty".into()));
        }
        if !balance.is_all_gte(amount) {
            return Err(VestingError::InvalidCoins(format!(
                "delegation {amount} exceeds balance {balance}"
            )));
        }
        let locked = self.locked_coins(t);
        let mut to_vesting = Vec::new();
        let mut to_free = Vec::new();
        for coin in amount.iter() {
            let undelegated_locked = locked
                .amount_of(&coin.denom)
                .saturating_sub(self.base_vesting.delegated_vesting.amount_of(&coin.denom));
            let x = undelegated_locked.min(coin.amount);
            to_vesting.push(crate::app::Coin::new(coin.denom.clone(), x));
            to_free.push(crate::app::Coin::new(coin.denom.clone(), coin.amount - x));
        }
        let overflow = || VestingError::InvalidCoins("delegation tracking overflow".into());
        let delegated_vesting = self
            .base_vesting
            .delegated_vesting
            .checked_add(&Coins::from(to_vesting))
            .ok_or_else(overflow)?;
        let delegated_free = self
            .base_vesting
            .delegated_free
            .checked_add(&Coins::from(to_free))
            .ok_or_else(overflow)?;
        self.base_vesting.delegated_vesting = delegated_vesting;
        self.base_vesting.delegated_free = delegated_free;
        Ok(())
    }

    /// Records an undelegation of `amount`. Free delegations are released
    /// first, then locked ones; any excess is ignored (it was slashed).
    pub fn track_undelegation(&mut self, amount: &Coins) -> Result<(), VestingError> {
        amount.validate()?;
        if amount.is_zero() {
            return Err(VestingError::InvalidCoins("undelegation amount is empty".into()));
        }
        let mut from_free = Vec::new();
        let mut from_vesting = Vec::new();
        for coin in amount.iter() {
            let x = self
                .base_vesting
                .delegated_free
                .amount_of(&coin.denom)
                .min(coin.amount);
            let y = self
                .base_vesting
                .delegated_vesting
                .amount_of(&coin.denom)
                .min(coin.amount - x);
            from_free.push(crate::app::Coin::new(coin.denom.clone(), x));
            from_vesting.push(crate::app::Coin::new(coin.denom.clone(), y));
        }
        self.base_vesting.delegated_free = self
            .base_vesting
            .delegated_free
            .saturating_sub(&Coins::from(from_free));
        self.base_vesting.delegated_vesting = self
            .base_vesting
            .delegated_vesting
            .saturating_sub(&Coins::from(from_vesting));
        Ok(())
    }

    /// Discards the vesting data, keeping address, key, number and sequence.
    pub fn into_base_account(self) -> BaseAccount {
        self.base_vesting.base
    }
}
