// Path: crates/api/src/services/mod.rs
//! Traits for pluggable blockchain services.

use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use std::any::Any;
use vestal_types::error::TransactionError;

/// The base trait for any service managed by the chain.
///
/// The host routes each `CallService`-style payload to the service whose
/// `id()` it names, passing the SCALE-encoded parameters untouched.
pub trait BlockchainService: Any + Send + Sync {
    /// A unique, static, lowercase string identifier for the service.
    fn id(&self) -> &str;

    /// The version of the ABI the service expects from the host.
    fn abi_version(&self) -> u32;

    /// A string identifying the schema of the state this service reads/writes.
    fn state_schema(&self) -> &str;

    /// Provides access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Handles a dispatched call. This is the primary entry point for all
    /// on-chain service logic.
    ///
    /// # Default Implementation
    /// The default implementation returns an `Unsupported` error. Services must override
    /// this method to expose callable functions.
    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        let _ = (state, params, ctx);
        Err(TransactionError::Unsupported(format!(
            "Service '{}' does not implement the method '{}'",
            self.id(),
            method
        )))
    }
}
