// Path: crates/types/src/app/coin.rs

//! Denominated token amounts.
//!
//! `Coins` is kept in canonical form at all times: sorted by denomination, at
//! most one entry per denomination, and no zero amounts. Equality of two coin
//! sets is therefore plain structural equality.

use crate::error::VestingError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MIN_DENOM_LEN: usize = 3;
const MAX_DENOM_LEN: usize = 128;

/// Checks a denomination against the ledger's naming rules.
pub fn validate_denom(denom: &str) -> Result<(), VestingError> {
    let len = denom.len();
    if !(MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&len) {
        return Err(VestingError::InvalidCoins(format!(
            "denom '{denom}' must be {MIN_DENOM_LEN}-{MAX_DENOM_LEN} characters"
        )));
    }
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !starts_with_letter || !rest_ok {
        return Err(VestingError::InvalidCoins(format!(
            "denom '{denom}' contains invalid characters"
        )));
    }
    Ok(())
}

/// A single amount of one denomination.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Coin {
    /// The denomination, e.g. `"uluna"`.
    pub denom: String,
    /// The integer amount in base units.
    pub amount: u128,
}

impl Coin {
    /// Creates a new coin.
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A canonical multi-denomination amount.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default, Hash)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// The empty coin set.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Builds a coin set from user input, validating denominations and
    /// rejecting duplicates. Zero amounts are dropped.
    pub fn new(coins: Vec<Coin>) -> Result<Self, VestingError> {
        let mut by_denom = BTreeMap::new();
        for coin in coins {
            validate_denom(&coin.denom)?;
            if by_denom.contains_key(&coin.denom) {
                return Err(VestingError::InvalidCoins(format!(
                    "duplicate denomination {}",
                    coin.denom
                )));
            }
            by_denom.insert(coin.denom, coin.amount);
        }
        Ok(Self::from_map(by_denom))
    }

    fn from_map(map: BTreeMap<String, u128>) -> Self {
        Self(
            map.into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    fn to_map(&self) -> BTreeMap<String, u128> {
        self.0
            .iter()
            .map(|c| (c.denom.clone(), c.amount))
            .collect()
    }

    /// Re-checks the canonical-form invariants. Used on decoded or
    /// caller-supplied sets that did not pass through a constructor.
    pub fn validate(&self) -> Result<(), VestingError> {
        let mut prev: Option<&str> = None;
        for coin in &self.0 {
            validate_denom(&coin.denom)?;
            if coin.amount == 0 {
                return Err(VestingError::InvalidCoins(format!(
                    "zero amount for {}",
                    coin.denom
                )));
            }
            if let Some(p) = prev {
                if p >= coin.denom.as_str() {
                    return Err(VestingError::InvalidCoins(
                        "denominations must be sorted and unique".into(),
                    ));
                }
            }
            prev = Some(&coin.denom);
        }
        Ok(())
    }

    /// True when no denomination has a positive amount.
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the coins in denomination order.
    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// The amount held of `denom`, zero when absent.
    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    /// Adds two coin sets, returning `None` on overflow.
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        let mut map = self.to_map();
        for coin in &other.0 {
            let entry = map.entry(coin.denom.clone()).or_insert(0);
            *entry = entry.checked_add(coin.amount)?;
        }
        Some(Self::from_map(map))
    }

    /// Subtracts `other`, returning `None` if any denomination would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut map = self.to_map();
        for coin in &other.0 {
            let entry = map.entry(coin.denom.clone()).or_insert(0);
            *entry = entry.checked_sub(coin.amount)?;
        }
        Some(Self::from_map(map))
    }

    /// Subtracts `other` per denomination, flooring each result at zero.
    pub fn saturating_sub(&self, other: &Coins) -> Coins {
        let map = self
            .0
            .iter()
            .map(|c| {
                (
                    c.denom.clone(),
                    c.amount.saturating_sub(other.amount_of(&c.denom)),
                )
            })
            .collect();
        Self::from_map(map)
    }

    /// The per-denomination minimum of the two sets.
    pub fn min(&self, other: &Coins) -> Coins {
        let map = self
            .0
            .iter()
            .map(|c| (c.denom.clone(), c.amount.min(other.amount_of(&c.denom))))
            .collect();
        Self::from_map(map)
    }

    /// True when every denomination in `other` is covered by `self`.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other.0.iter().all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// Applies `f` to every amount, keeping the denomination. Results of zero are dropped.
    pub fn map_amounts(&self, mut f: impl FnMut(u128) -> u128) -> Coins {
        let map = self
            .0
            .iter()
            .map(|c| (c.denom.clone(), f(c.amount)))
            .collect();
        Self::from_map(map)
    }
}

impl From<Vec<Coin>> for Coins {
    /// Normalises an arbitrary list: merges duplicates, drops zeros, sorts.
    /// Denominations are not validated; use `Coins::new` for user input.
    fn from(coins: Vec<Coin>) -> Self {
        let mut map: BTreeMap<String, u128> = BTreeMap::new();
        for coin in coins {
            let entry = map.entry(coin.denom).or_insert(0);
            *entry = entry.saturating_add(coin.amount);
        }
        Self::from_map(map)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(pairs: &[(&str, u128)]) -> Coins {
        Coins::from(
            pairs
                .iter()
                .map(|(d, a)| Coin::new(*d, *a))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_constructor_sorts_and_drops_zero_amounts() {
        let set = Coins::new(vec![
            Coin::new("uusd", 5),
            Coin::new("test", 100),
            Coin::new("ukrw", 0),
        ])
        .unwrap();
        assert_eq!(set.to_string(), "100test,5uusd");
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_constructor_rejects_duplicates_and_bad_denoms() {
        assert!(Coins::new(vec![Coin::new("test", 1), Coin::new("test", 2)]).is_err());
        assert!(Coins::new(vec![Coin::new("1abc", 1)]).is_err());
        assert!(Coins::new(vec![Coin::new("ab", 1)]).is_err());
    }

    #[test]
    fn test_checked_sub_refuses_to_go_negative() {
        let a = coins(&[("test", 100), ("uusd", 5)]);
        let b = coins(&[("test", 40)]);
        assert_eq!(a.checked_sub(&b), Some(coins(&[("test", 60), ("uusd", 5)])));
        assert_eq!(b.checked_sub(&a), None);
        assert!(a.checked_sub(&a).unwrap().is_zero());
    }

    #[test]
    fn test_saturating_sub_and_min_are_per_denomination() {
        let a = coins(&[("test", 100), ("uusd", 5)]);
        let b = coins(&[("test", 140), ("uusd", 2)]);
        assert_eq!(a.saturating_sub(&b), coins(&[("uusd", 3)]));
        assert_eq!(a.min(&b), coins(&[("test", 100), ("uusd", 2)]));
        assert!(b.is_all_gte(&coins(&[("test", 140)])));
        assert!(!a.is_all_gte(&b));
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        let a = coins(&[("test", u128::MAX)]);
        assert!(a.checked_add(&coins(&[("test", 1)])).is_none());
        assert_eq!(
            a.checked_add(&coins(&[("uusd", 1)])).unwrap().amount_of("uusd"),
            1
        );
    }
}
