use attest_registry::RegistryError;
use attest_types::{AccountId, ActionHash, ActionId};
use thiserror::Error;

/// Failures of `submit_action`, tagged with the step that failed.
///
/// Partial progress is never rolled back: on `Verify` or `Complete` the
/// action is still on the ledger in whatever state it reached. Treat a
/// failed submission as possibly partially applied and query `get_action`
/// before retrying.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The `(id, hash)` pair already exists. Retrying with the same pair
    /// will never succeed.
    #[error("action ({id}, {hash}) already exists on the ledger")]
    DuplicateAction { id: ActionId, hash: ActionHash },

    /// The duplicate pre-check query itself failed; nothing was written.
    #[error("duplicate pre-check failed: {0}")]
    Precheck(#[source] RegistryError),

    /// The record step failed; nothing was written. A concurrent duplicate
    /// that slipped past the pre-check surfaces here as a ledger revert.
    #[error("record step failed: {0}")]
    Record(#[source] RegistryError),

    /// A verifier attestation failed. Earlier verifiers in the list were
    /// already recorded.
    #[error("verify step failed for {verifier}: {source}")]
    Verify {
        verifier: AccountId,
        #[source]
        source: RegistryError,
    },

    /// Completion failed. The action remains with all attestations recorded
    /// but not sealed.
    #[error("complete step failed: {0}")]
    Complete(#[source] RegistryError),
}
