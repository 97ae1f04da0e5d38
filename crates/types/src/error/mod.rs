// Path: crates/types/src/error/mod.rs
//! Core error types for the Vestal ledger modules.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// The coarse classification every error belongs to.
///
/// Callers branch on this instead of matching individual variants, e.g. to map
/// an error to a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: bad addresses, invalid coins, transfer-disabled denominations.
    Validation,
    /// The request is well-formed but not permitted.
    Authorization,
    /// The target of a creation already exists.
    Conflict,
    /// A referenced account or validator does not exist.
    NotFound,
    /// The current state does not allow the operation.
    StateInvariant,
    /// A backend, codec or collaborator failure unrelated to the request itself.
    Internal,
}

impl ErrorKind {
    /// A lowercase label suitable for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::StateInvariant => "state_invariant",
            Self::Internal => "internal",
        }
    }
}

/// Errors related to the state handle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The requested key was not found in the state.
    #[error("Key not found in state")]
    KeyNotFound,
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
    /// The provided value was invalid.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// A stored record failed to decode.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound => "STATE_KEY_NOT_FOUND",
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::WriteError(_) => "STATE_WRITE_ERROR",
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
            Self::Decode(_) => "STATE_DECODE_ERROR",
        }
    }
}

/// Errors raised by the vesting service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestingError {
    /// An address string could not be parsed.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The offending input.
        address: String,
        /// Why parsing failed.
        reason: String,
    },
    /// A coin set failed validation.
    #[error("Invalid coins: {0}")]
    InvalidCoins(String),
    /// The vesting end time is unusable.
    #[error("Invalid end time {end_time}: {reason}")]
    InvalidEndTime {
        /// The requested end time.
        end_time: i64,
        /// Why it was rejected.
        reason: String,
    },
    /// The vesting periods of a periodic schedule are unusable.
    #[error("Invalid vesting periods: {0}")]
    InvalidPeriods(String),
    /// Transfers of a denomination are globally disabled.
    #[error("{denom} transfers are currently disabled")]
    SendDisabled {
        /// The disabled denomination.
        denom: String,
    },
    /// The recipient is on the blocked-address list.
    #[error("{address} is not allowed to receive funds")]
    BlockedRecipient {
        /// The blocked recipient.
        address: String,
    },
    /// The transaction signer is not the message sender.
    #[error("Signer {signer} does not match message sender {sender}")]
    SignerMismatch {
        /// The account that signed the transaction.
        signer: String,
        /// The sender named in the message.
        sender: String,
    },
    /// An account already exists at the destination.
    #[error("Account {address} already exists")]
    AccountExists {
        /// The occupied address.
        address: String,
    },
    /// No account exists at the given address.
    #[error("Account {address} does not exist")]
    AccountNotFound {
        /// The missing address.
        address: String,
    },
    /// A delegation references a validator that is not registered.
    #[error("Validator {validator} not found")]
    ValidatorNotFound {
        /// The missing validator.
        validator: String,
    },
    /// Removing a delegation would free a non-zero amount of tokens.
    #[error("Account {address} has a non-zero staking entry with validator {validator} ({tokens} tokens)")]
    NonZeroStakingEntry {
        /// The donating account.
        address: String,
        /// The validator holding the delegation.
        validator: String,
        /// The number of tokens the removal would have freed.
        tokens: u128,
    },
    /// The account has unbonding delegations or redelegations in flight.
    #[error("Account {address} has staking entry")]
    HasStakingEntry {
        /// The donating account.
        address: String,
    },
    /// The account does not carry a vesting schedule.
    #[error("Account {address} is not a vesting account")]
    NotVestingAccount {
        /// The plain account.
        address: String,
    },
    /// Nothing remains locked at the current block time.
    #[error("Account {address} has no vesting tokens")]
    NoVestingTokens {
        /// The fully vested account.
        address: String,
    },
}

impl VestingError {
    /// Returns the taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress { .. }
            | Self::InvalidCoins(_)
            | Self::InvalidEndTime { .. }
            | Self::InvalidPeriods(_)
            | Self::SendDisabled { .. } => ErrorKind::Validation,
            Self::BlockedRecipient { .. } | Self::SignerMismatch { .. } => {
                ErrorKind::Authorization
            }
            Self::AccountExists { .. } => ErrorKind::Conflict,
            Self::AccountNotFound { .. } | Self::ValidatorNotFound { .. } => ErrorKind::NotFound,
            Self::NonZeroStakingEntry { .. }
            | Self::HasStakingEntry { .. }
            | Self::NotVestingAccount { .. }
            | Self::NoVestingTokens { .. } => ErrorKind::StateInvariant,
        }
    }
}

impl ErrorCode for VestingError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "VESTING_INVALID_ADDRESS",
            Self::InvalidCoins(_) => "VESTING_INVALID_COINS",
            Self::InvalidEndTime { .. } => "VESTING_INVALID_END_TIME",
            Self::InvalidPeriods(_) => "VESTING_INVALID_PERIODS",
            Self::SendDisabled { .. } => "VESTING_SEND_DISABLED",
            Self::BlockedRecipient { .. } => "VESTING_BLOCKED_RECIPIENT",
            Self::SignerMismatch { .. } => "VESTING_SIGNER_MISMATCH",
            Self::AccountExists { .. } => "VESTING_ACCOUNT_EXISTS",
            Self::AccountNotFound { .. } => "VESTING_ACCOUNT_NOT_FOUND",
            Self::ValidatorNotFound { .. } => "VESTING_VALIDATOR_NOT_FOUND",
            Self::NonZeroStakingEntry { .. } => "VESTING_NON_ZERO_STAKING_ENTRY",
            Self::HasStakingEntry { .. } => "VESTING_HAS_STAKING_ENTRY",
            Self::NotVestingAccount { .. } => "VESTING_NOT_VESTING_ACCOUNT",
            Self::NoVestingTokens { .. } => "VESTING_NO_VESTING_TOKENS",
        }
    }
}

/// Errors related to transaction processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// An error occurred during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error occurred during deserialization.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// An error originating from the vesting service.
    #[error("Vesting error: {0}")]
    Vesting(#[from] VestingError),
    /// An error originating from the state handle.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// The account has insufficient funds to cover the transfer.
    #[error("Insufficient funds: {address} needs {needed}")]
    InsufficientFunds {
        /// The account being debited.
        address: String,
        /// The amount that could not be covered.
        needed: String,
    },
    /// A balance would exceed the representable range.
    #[error("Balance overflow")]
    BalanceOverflow,
    /// The requested method or payload is not supported.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl TransactionError {
    /// Returns the taxonomy class, delegating to the wrapped error when there is one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Vesting(e) => e.kind(),
            Self::InsufficientFunds { .. } => ErrorKind::Validation,
            Self::Deserialization(_) | Self::Unsupported(_) => ErrorKind::Validation,
            Self::Serialization(_) | Self::State(_) | Self::BalanceOverflow => ErrorKind::Internal,
        }
    }
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "TX_SERIALIZATION_ERROR",
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
            Self::Vesting(e) => e.code(),
            Self::State(e) => e.code(),
            Self::InsufficientFunds { .. } => "TX_INSUFFICIENT_FUNDS",
            Self::BalanceOverflow => "TX_BALANCE_OVERFLOW",
            Self::Unsupported(_) => "TX_UNSUPPORTED",
        }
    }
}

impl From<parity_scale_codec::Error> for TransactionError {
    fn from(e: parity_scale_codec::Error) -> Self {
        TransactionError::Deserialization(e.to_string())
    }
}
