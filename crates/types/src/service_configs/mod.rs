// Path: crates/types/src/service_configs/mod.rs
//! Configuration parameters for the vesting service.

use crate::error::StateError;
use serde::{Deserialize, Serialize};

/// Configuration parameters for the vesting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VestingParams {
    /// The maximum number of delegations fetched when settling a donation.
    pub max_entries_retrieve: u16,
    /// The module identity stamped on every emitted event.
    pub module_name: String,
    /// The maximum number of periods accepted in a single periodic schedule.
    pub max_periods: u32,
}

impl Default for VestingParams {
    fn default() -> Self {
        Self {
            max_entries_retrieve: u16::MAX,
            module_name: "vesting".to_string(),
            max_periods: 1024,
        }
    }
}

impl VestingParams {
    /// Parses parameters from a TOML fragment. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, StateError> {
        toml::from_str(s).map_err(|e| StateError::InvalidValue(e.to_string()))
    }
}
