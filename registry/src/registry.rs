//! The `ActionRegistry` trait — record/verify/complete/query operations.

use crate::error::RegistryError;
use async_trait::async_trait;
use attest_types::{AccountId, ActionHash, ActionId, ActionRecord, TxReceipt};
use tracing::warn;

/// Contract operations on the action registry.
///
/// Write operations always surface their failures; read operations degrade
/// in the implementations (logged, safe default) so display paths never
/// break on a flaky node.
#[async_trait]
pub trait ActionRegistry: Send + Sync {
    /// Whether an action with exactly this `(id, hash)` pair exists,
    /// regardless of its current status. Read-only; never mutates.
    async fn exists_with_hash(
        &self,
        id: &ActionId,
        hash: &ActionHash,
    ) -> Result<bool, RegistryError>;

    /// Record a new action with status `Pending`.
    ///
    /// The ledger reverts if `(id, hash)` already exists — this is the
    /// authoritative duplicate guard, not the client-side pre-check.
    async fn record_action(
        &self,
        id: &ActionId,
        action_type: &str,
        hash: &ActionHash,
        initiator: &AccountId,
    ) -> Result<TxReceipt, RegistryError>;

    /// Append a verifier attestation to an existing action. Every call is
    /// binding; the contract does not de-duplicate repeated verifiers.
    /// Fails if the action does not exist.
    async fn verify_action(
        &self,
        id: &ActionId,
        verifier: &AccountId,
    ) -> Result<TxReceipt, RegistryError>;

    /// Transition an action to `Completed`.
    ///
    /// The contract does not require a minimum verifier count here — the
    /// coordinator is the trust boundary that sequences this call only
    /// after every intended verifier has attested.
    async fn complete_action(&self, id: &ActionId) -> Result<TxReceipt, RegistryError>;

    /// Fetch one action. Returns `None` both for "not found" and for a
    /// failed query (logged by the implementation).
    async fn get_action(&self, id: &ActionId) -> Option<ActionRecord>;

    /// Fetch every action. Unbounded — administrative use only. Returns an
    /// empty vec on query failure.
    async fn get_all_actions(&self) -> Vec<ActionRecord>;
}

/// Whether an action record exists for `(id, hash)`, swallowing failures.
///
/// Convenience wrapper over [`ActionRegistry::exists_with_hash`] for callers
/// that want graceful degradation: a failed query logs a warning and reports
/// `false` instead of propagating.
pub async fn verify_action_record(
    registry: &dyn ActionRegistry,
    id: &ActionId,
    hash: &ActionHash,
) -> bool {
    match registry.exists_with_hash(id, hash).await {
        Ok(exists) => exists,
        Err(e) => {
            warn!(action_id = %id, "action record check failed: {e}");
            false
        }
    }
}
