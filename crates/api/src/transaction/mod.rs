// Path: crates/api/src/transaction/mod.rs
//! The execution context and the all-or-nothing execution boundary.

use crate::state::{StateAccess, StateOverlay};
use crate::transaction::context::TxContext;
use vestal_types::error::TransactionError;

pub mod context;

/// Runs `op` against a fresh `StateOverlay` on `state`.
///
/// On `Ok` the overlay's writes are applied to `state` in one batch. On `Err`
/// (including a failed commit) every write is dropped and the events `op`
/// emitted are removed from `ctx`, so no partial effect of the call survives.
pub fn execute_atomic<T, F>(
    state: &mut dyn StateAccess,
    ctx: &mut TxContext,
    op: F,
) -> Result<T, TransactionError>
where
    F: FnOnce(&mut dyn StateAccess, &mut TxContext) -> Result<T, TransactionError>,
{
    let checkpoint = ctx.event_checkpoint();
    let mut overlay = StateOverlay::new(&*state);
    let outcome = op(&mut overlay, ctx);
    let value = match outcome {
        Ok(value) => value,
        Err(e) => {
            log::debug!("discarding transactional writes: {}", e);
            ctx.rollback_events(checkpoint);
            return Err(e);
        }
    };
    if overlay.is_clean() {
        return Ok(value);
    }
    let batch = overlay.into_ordered_batch();
    if let Err(e) = state.apply_batch(&batch) {
        log::error!("failed to commit {} writes: {}", batch.len(), e);
        ctx.rollback_events(checkpoint);
        return Err(e.into());
    }
    Ok(value)
}
