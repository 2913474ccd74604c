//! The action lifecycle state machine.

use crate::error::CoordinatorError;
use attest_registry::ActionRegistry;
use attest_types::{AccountId, ActionHash, ActionId, ActionRecord, Timestamp, TxHash};
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrates the full action lifecycle against an injected registry.
///
/// All writes flow through one signing identity (the registry's ledger
/// client), so the verifier loop is strictly sequential — each attestation
/// is confirmed before the next is submitted. Concurrent `submit_action`
/// calls for *different* actions are fine; the client serializes their
/// transactions underneath.
pub struct VerificationCoordinator {
    registry: Arc<dyn ActionRegistry>,
}

impl VerificationCoordinator {
    pub fn new(registry: Arc<dyn ActionRegistry>) -> Self {
        Self { registry }
    }

    /// Record an action, collect every verifier's attestation in list order,
    /// and seal it as complete.
    ///
    /// Returns the transaction hash of the *record* step — the canonical
    /// proof-of-submission handle — not the completion transaction.
    ///
    /// The duplicate pre-check is a fast path only; two concurrent
    /// submissions for the same `(id, hash)` can both pass it, and the
    /// loser then fails at the record step with a ledger revert. The
    /// ledger's uniqueness enforcement is the authoritative guard.
    pub async fn submit_action(
        &self,
        id: &ActionId,
        hash: &ActionHash,
        initiator: &AccountId,
        verifiers: &[AccountId],
    ) -> Result<TxHash, CoordinatorError> {
        let exists = self
            .registry
            .exists_with_hash(id, hash)
            .await
            .map_err(CoordinatorError::Precheck)?;
        if exists {
            return Err(CoordinatorError::DuplicateAction {
                id: id.clone(),
                hash: hash.clone(),
            });
        }

        let action_type = action_type_tag(id);
        let record_receipt = self
            .registry
            .record_action(id, &action_type, hash, initiator)
            .await
            .map_err(CoordinatorError::Record)?;
        debug!(action_id = %id, tx = %record_receipt.transaction_hash, "action recorded");

        for verifier in verifiers {
            self.registry
                .verify_action(id, verifier)
                .await
                .map_err(|source| CoordinatorError::Verify {
                    verifier: verifier.clone(),
                    source,
                })?;
            debug!(action_id = %id, verifier = %verifier, "attestation recorded");
        }

        self.registry
            .complete_action(id)
            .await
            .map_err(CoordinatorError::Complete)?;
        info!(action_id = %id, verifiers = verifiers.len(), "action completed");

        Ok(record_receipt.transaction_hash)
    }

    /// Whether an action record exists for `(id, hash)`; query failures are
    /// swallowed and reported as `false`.
    pub async fn verify_action_record(&self, id: &ActionId, hash: &ActionHash) -> bool {
        attest_registry::verify_action_record(self.registry.as_ref(), id, hash).await
    }

    /// Fetch one action; `None` for not-found and for failed queries.
    pub async fn get_action(&self, id: &ActionId) -> Option<ActionRecord> {
        self.registry.get_action(id).await
    }

    /// Fetch every action; empty on failed queries.
    pub async fn get_all_actions(&self) -> Vec<ActionRecord> {
        self.registry.get_all_actions().await
    }
}

/// Descriptive type tag for a new action, embedding the creation time.
/// Uniqueness still rests on the content hash, never on this tag.
fn action_type_tag(id: &ActionId) -> String {
    format!("attest:{id}:{}", Timestamp::now().as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_client::ClientError;
    use attest_nullables::{NullActionRegistry, RegistryCall};
    use attest_registry::RegistryError;
    use attest_types::ActionStatus;

    fn coordinator() -> (Arc<NullActionRegistry>, VerificationCoordinator) {
        let registry = Arc::new(NullActionRegistry::new());
        let coordinator = VerificationCoordinator::new(registry.clone());
        (registry, coordinator)
    }

    fn ids() -> (ActionId, ActionHash, AccountId) {
        (
            ActionId::from("test-action-id"),
            ActionHash::from("test-hash"),
            AccountId::from("initiator-address"),
        )
    }

    #[tokio::test]
    async fn submit_runs_record_verify_complete_in_order() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();
        let verifiers = [AccountId::from("verifier1"), AccountId::from("verifier2")];

        let tx = coordinator
            .submit_action(&id, &hash, &initiator, &verifiers)
            .await
            .unwrap();

        // The returned hash is the record step's, not the completion's.
        assert_eq!(tx, TxHash::new("null-tx-1"));

        assert_eq!(
            registry.calls(),
            vec![
                RegistryCall::ExistsWithHash {
                    id: id.clone(),
                    hash: hash.clone()
                },
                RegistryCall::RecordAction {
                    id: id.clone(),
                    hash: hash.clone()
                },
                RegistryCall::VerifyAction {
                    id: id.clone(),
                    verifier: verifiers[0].clone()
                },
                RegistryCall::VerifyAction {
                    id: id.clone(),
                    verifier: verifiers[1].clone()
                },
                RegistryCall::CompleteAction { id: id.clone() },
            ]
        );

        let action = registry.get_action(&id).await.unwrap();
        assert_eq!(action.status, ActionStatus::Completed);
        assert_eq!(action.verifiers, verifiers);
        assert_eq!(action.initiator, initiator);
        assert!(action.action_type.starts_with("attest:test-action-id:"));
    }

    #[tokio::test]
    async fn second_submit_is_rejected_without_ledger_writes() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();
        let verifiers = [AccountId::from("verifier1"), AccountId::from("verifier2")];

        coordinator
            .submit_action(&id, &hash, &initiator, &verifiers)
            .await
            .unwrap();
        let calls_after_first = registry.calls().len();

        let err = coordinator
            .submit_action(&id, &hash, &initiator, &verifiers)
            .await
            .unwrap_err();
        assert!(matches!(err, CoordinatorError::DuplicateAction { .. }));

        // Exactly one additional call: the pre-check. No writes.
        let calls = registry.calls();
        assert_eq!(calls.len(), calls_after_first + 1);
        assert!(matches!(
            calls.last().unwrap(),
            RegistryCall::ExistsWithHash { .. }
        ));
        assert_eq!(registry.actions().len(), 1);
    }

    #[tokio::test]
    async fn empty_verifier_list_records_and_completes() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();

        coordinator
            .submit_action(&id, &hash, &initiator, &[])
            .await
            .unwrap();

        let action = registry.get_action(&id).await.unwrap();
        assert_eq!(action.status, ActionStatus::Completed);
        assert!(action.verifiers.is_empty());
    }

    #[tokio::test]
    async fn verify_failure_names_the_verifier_and_keeps_partial_state() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();
        let verifiers = [AccountId::from("verifier1"), AccountId::from("verifier2")];

        // record + first attestation succeed, second attestation fails.
        registry.fail_after_writes(2);

        let err = coordinator
            .submit_action(&id, &hash, &initiator, &verifiers)
            .await
            .unwrap_err();
        match err {
            CoordinatorError::Verify { verifier, .. } => {
                assert_eq!(verifier, verifiers[1]);
            }
            other => panic!("expected Verify error, got {other}"),
        }

        // No rollback: the action sits mid-flight for the caller to inspect.
        let action = registry.get_action(&id).await.unwrap();
        assert_eq!(action.status, ActionStatus::InProgress);
        assert_eq!(action.verifiers, vec![verifiers[0].clone()]);
    }

    #[tokio::test]
    async fn complete_failure_is_step_tagged() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();
        let verifiers = [AccountId::from("verifier1")];

        // record + attestation succeed, completion fails.
        registry.fail_after_writes(2);

        let err = coordinator
            .submit_action(&id, &hash, &initiator, &verifiers)
            .await
            .unwrap_err();
        assert!(matches!(err, CoordinatorError::Complete(_)));

        let action = registry.get_action(&id).await.unwrap();
        assert_eq!(action.status, ActionStatus::InProgress);
    }

    #[tokio::test]
    async fn concurrent_duplicate_surfaces_as_record_failure() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();

        // Simulate the TOCTOU window: the pre-check passes but the ledger
        // rejects the record because a concurrent submission won the race.
        registry.fail_next_write("action already exists");

        let err = coordinator
            .submit_action(&id, &hash, &initiator, &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoordinatorError::Record(RegistryError::Transaction(ClientError::Node(_)))
        ));
    }

    #[tokio::test]
    async fn verify_action_record_swallows_read_failures() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();
        coordinator
            .submit_action(&id, &hash, &initiator, &[])
            .await
            .unwrap();

        assert!(coordinator.verify_action_record(&id, &hash).await);
        assert!(
            !coordinator
                .verify_action_record(&id, &ActionHash::from("other-hash"))
                .await
        );

        registry.set_fail_reads(true);
        assert!(!coordinator.verify_action_record(&id, &hash).await);
    }

    #[tokio::test]
    async fn reads_degrade_to_safe_defaults() {
        let (registry, coordinator) = coordinator();
        let (id, hash, initiator) = ids();
        coordinator
            .submit_action(&id, &hash, &initiator, &[])
            .await
            .unwrap();

        assert_eq!(coordinator.get_all_actions().await.len(), 1);

        registry.set_fail_reads(true);
        assert!(coordinator.get_action(&id).await.is_none());
        assert!(coordinator.get_all_actions().await.is_empty());
    }
}
