// Path: crates/types/src/app/events.rs

//! Events emitted after successful state transitions.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The event kind every vesting message emits.
pub const EVENT_KIND_MESSAGE: &str = "message";
/// Attribute naming the emitting module.
pub const ATTRIBUTE_KEY_MODULE: &str = "module";
/// Attribute carrying a donated amount.
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";
/// Attribute carrying the funding account.
pub const ATTRIBUTE_KEY_SENDER: &str = "sender";
/// Attribute carrying the created account.
pub const ATTRIBUTE_KEY_RECIPIENT: &str = "recipient";

/// A generic, module-tagged state transition event.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ModuleEvent {
    /// The event kind, e.g. `"message"`.
    pub kind: String,
    /// Ordered key/value attributes.
    pub attributes: Vec<(String, String)>,
}

impl ModuleEvent {
    /// A `message` event tagged with `module`.
    pub fn message(module: &str) -> Self {
        Self {
            kind: EVENT_KIND_MESSAGE.to_string(),
            attributes: vec![(ATTRIBUTE_KEY_MODULE.to_string(), module.to_string())],
        }
    }

    /// Appends an attribute.
    pub fn with_attribute(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// The first value recorded under `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
