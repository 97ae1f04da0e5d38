// Path: crates/types/src/app/identity.rs

//! Defines the canonical account and validator identifiers and their textual form.
//!
//! Both identifiers are 32-byte arrays rendered as 64 lowercase hex characters.
//! Parsing is strict: anything that is not exactly 32 bytes of hex is rejected
//! with `VestingError::InvalidAddress` carrying the offending input.

use crate::error::VestingError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a blockchain, used for replay protection.
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash,
)]
#[serde(transparent)]
pub struct ChainId(pub u32);

impl From<u32> for ChainId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_id_bytes(s: &str) -> Result<[u8; 32], VestingError> {
    let invalid = |reason: &str| VestingError::InvalidAddress {
        address: s.to_string(),
        reason: reason.to_string(),
    };
    if s.is_empty() {
        return Err(invalid("empty address"));
    }
    let bytes = hex::decode(s).map_err(|e| invalid(&e.to_string()))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| invalid(&format!("expected 32 bytes, got {}", b.len())))
}

/// A unique, stable identifier for an on-chain account.
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash,
)]
pub struct AccountId(pub [u8; 32]);

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for AccountId {
    type Err = VestingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id_bytes(s).map(Self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// The operator identifier of a validator.
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash,
)]
pub struct ValidatorId(pub [u8; 32]);

impl AsRef<[u8]> for ValidatorId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for ValidatorId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for ValidatorId {
    type Err = VestingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id_bytes(s).map(Self)
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_text_form_is_lowercase_hex() {
        let id = AccountId([0xAB; 32]);
        let text = id.to_string();
        assert_eq!(text, "ab".repeat(32));
        assert_eq!(text.parse::<AccountId>().unwrap(), id);
    }

    #[test]
    fn test_malformed_addresses_are_rejected_with_the_input() {
        let short = "ab".repeat(31);
        let long = "ab".repeat(33);
        let cases: [&str; 4] = ["", "zz", short.as_str(), long.as_str()];
        for bad in cases {
            match bad.parse::<AccountId>() {
                Err(VestingError::InvalidAddress { address, .. }) => assert_eq!(address, bad),
                other => panic!("expected InvalidAddress for {bad:?}, got {other:?}"),
            }
        }
    }
}
