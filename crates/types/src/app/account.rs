// Path: crates/types/src/app/account.rs

//! Ledger account records.

use crate::app::{AccountId, VestingAccount};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The common account shape owned by the account store.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct BaseAccount {
    /// The account's address.
    pub address: AccountId,
    /// The account's public key, unknown until its first signed transaction.
    pub pub_key: Option<Vec<u8>>,
    /// The globally unique number assigned by the account store.
    pub account_number: u64,
    /// The replay-protection sequence.
    pub sequence: u64,
}

impl BaseAccount {
    /// A fresh account at `address` with no key and zero sequence.
    /// The account number is assigned by the account store.
    pub fn with_address(address: AccountId) -> Self {
        Self {
            address,
            pub_key: None,
            account_number: 0,
            sequence: 0,
        }
    }
}

/// Any account stored in the ledger.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum Account {
    /// A plain account with no restrictions.
    Base(BaseAccount),
    /// An account whose funds unlock on a schedule.
    Vesting(VestingAccount),
}

impl Account {
    /// The account's address.
    pub fn address(&self) -> &AccountId {
        &self.base().address
    }

    /// The common account fields.
    pub fn base(&self) -> &BaseAccount {
        match self {
            Self::Base(base) => base,
            Self::Vesting(vesting) => vesting.base_account(),
        }
    }

    /// The vesting capability, if this account has one.
    pub fn as_vesting(&self) -> Option<&VestingAccount> {
        match self {
            Self::Base(_) => None,
            Self::Vesting(vesting) => Some(vesting),
        }
    }

    /// Strips any vesting data, keeping address, key, number and sequence.
    pub fn into_base_account(self) -> BaseAccount {
        match self {
            Self::Base(base) => base,
            Self::Vesting(vesting) => vesting.into_base_account(),
        }
    }
}

impl From<BaseAccount> for Account {
    fn from(base: BaseAccount) -> Self {
        Self::Base(base)
    }
}

impl From<VestingAccount> for Account {
    fn from(vesting: VestingAccount) -> Self {
        Self::Vesting(vesting)
    }
}
