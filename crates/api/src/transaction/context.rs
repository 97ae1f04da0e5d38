// Path: crates/api/src/transaction/context.rs
//! Defines the stable context for transaction execution.

use vestal_types::app::{AccountId, ChainId, ModuleEvent, Timestamp};

/// Provides the execution context services see during a call: block data,
/// the authenticated signer, and the buffer events are emitted into.
#[derive(Debug, Clone)]
pub struct TxContext {
    /// The current block height being processed.
    pub block_height: u64,
    /// The deterministic timestamp of the current block, taken from its header.
    /// Services must never read a wall clock.
    pub block_timestamp: Timestamp,
    /// The unique identifier of the chain for replay protection.
    pub chain_id: ChainId,
    /// The `AccountId` of the entity that signed the current transaction.
    /// This is the authoritative source for permission checks within services.
    pub signer_account_id: AccountId,
    events: Vec<ModuleEvent>,
}

impl TxContext {
    /// Creates a context with an empty event buffer.
    pub fn new(
        block_height: u64,
        block_timestamp: Timestamp,
        chain_id: ChainId,
        signer_account_id: AccountId,
    ) -> Self {
        Self {
            block_height,
            block_timestamp,
            chain_id,
            signer_account_id,
            events: Vec::new(),
        }
    }

    /// Buffers an event. It is discarded if the enclosing atomic call fails.
    pub fn emit_event(&mut self, event: ModuleEvent) {
        self.events.push(event);
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[ModuleEvent] {
        &self.events
    }

    /// Drains the event buffer.
    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn event_checkpoint(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn rollback_events(&mut self, checkpoint: usize) {
        self.events.truncate(checkpoint);
    }
}
