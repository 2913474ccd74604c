//! Nullable action registry — an in-memory ledger contract.
//!
//! Behaves like the on-ledger registry for everything the coordinator can
//! observe: `(id, hash)` uniqueness is enforced inside `record_action` (the
//! authoritative guard the TOCTOU mitigation relies on), statuses advance
//! monotonically, and terminal actions reject further writes.

use async_trait::async_trait;
use attest_client::ClientError;
use attest_registry::{ActionRegistry, RegistryError};
use attest_types::{
    AccountId, ActionHash, ActionId, ActionRecord, ActionStatus, LedgerEvent, Timestamp, TxHash,
    TxReceipt,
};
use std::sync::Mutex;

/// One observed call, recorded in invocation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryCall {
    ExistsWithHash { id: ActionId, hash: ActionHash },
    RecordAction { id: ActionId, hash: ActionHash },
    VerifyAction { id: ActionId, verifier: AccountId },
    CompleteAction { id: ActionId },
    GetAction { id: ActionId },
    GetAllActions,
}

#[derive(Default)]
struct Inner {
    actions: Vec<ActionRecord>,
    calls: Vec<RegistryCall>,
    tx_counter: u64,
    write_count: u64,
    fail_reads: bool,
    fail_next_write: Option<String>,
    fail_after_writes: Option<u64>,
}

/// A test registry that runs the contract's rules in memory.
#[derive(Default)]
pub struct NullActionRegistry {
    inner: Mutex<Inner>,
}

impl NullActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an action, bypassing the call log.
    pub fn seed_action(&self, record: ActionRecord) {
        self.inner.lock().unwrap().actions.push(record);
    }

    /// Make every read operation behave as if the node were unreachable.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_reads = fail;
    }

    /// Make the next write fail with the given ledger error detail.
    pub fn fail_next_write(&self, detail: impl Into<String>) {
        self.inner.lock().unwrap().fail_next_write = Some(detail.into());
    }

    /// Let the first `n` writes succeed, then fail every one after them.
    pub fn fail_after_writes(&self, n: u64) {
        self.inner.lock().unwrap().fail_after_writes = Some(n);
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Snapshot of the stored actions (for assertions).
    pub fn actions(&self) -> Vec<ActionRecord> {
        self.inner.lock().unwrap().actions.clone()
    }
}

impl Inner {
    fn next_receipt(&mut self, events: Vec<LedgerEvent>) -> TxReceipt {
        self.tx_counter += 1;
        TxReceipt {
            transaction_hash: TxHash::new(format!("null-tx-{}", self.tx_counter)),
            events,
        }
    }

    fn take_injected_failure(&mut self) -> Option<RegistryError> {
        self.write_count += 1;
        if let Some(detail) = self.fail_next_write.take() {
            return Some(RegistryError::Transaction(ClientError::Node(detail)));
        }
        match self.fail_after_writes {
            Some(n) if self.write_count > n => Some(RegistryError::Transaction(
                ClientError::Node("null registry: writes disabled".into()),
            )),
            _ => None,
        }
    }

    fn revert(&mut self, detail: impl Into<String>) -> RegistryError {
        self.tx_counter += 1;
        RegistryError::Transaction(ClientError::Rejected {
            hash: format!("null-tx-{}", self.tx_counter),
            detail: detail.into(),
        })
    }
}

#[async_trait]
impl ActionRegistry for NullActionRegistry {
    async fn exists_with_hash(
        &self,
        id: &ActionId,
        hash: &ActionHash,
    ) -> Result<bool, RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RegistryCall::ExistsWithHash {
            id: id.clone(),
            hash: hash.clone(),
        });
        if inner.fail_reads {
            return Err(RegistryError::Transaction(ClientError::Transport(
                "null registry: reads disabled".into(),
            )));
        }
        Ok(inner
            .actions
            .iter()
            .any(|a| &a.id == id && &a.hash == hash))
    }

    async fn record_action(
        &self,
        id: &ActionId,
        action_type: &str,
        hash: &ActionHash,
        initiator: &AccountId,
    ) -> Result<TxReceipt, RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RegistryCall::RecordAction {
            id: id.clone(),
            hash: hash.clone(),
        });
        if let Some(err) = inner.take_injected_failure() {
            return Err(err);
        }
        if inner
            .actions
            .iter()
            .any(|a| &a.id == id && &a.hash == hash)
        {
            return Err(inner.revert(format!("action ({id}, {hash}) already exists")));
        }
        inner.actions.push(ActionRecord {
            id: id.clone(),
            action_type: action_type.to_string(),
            hash: hash.clone(),
            initiator: initiator.clone(),
            status: ActionStatus::Pending,
            verifiers: Vec::new(),
            timestamp: Timestamp::now(),
        });
        Ok(inner.next_receipt(Vec::new()))
    }

    async fn verify_action(
        &self,
        id: &ActionId,
        verifier: &AccountId,
    ) -> Result<TxReceipt, RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RegistryCall::VerifyAction {
            id: id.clone(),
            verifier: verifier.clone(),
        });
        if let Some(err) = inner.take_injected_failure() {
            return Err(err);
        }
        let Some(index) = inner.actions.iter().position(|a| &a.id == id) else {
            return Err(inner.revert(format!("unknown action {id}")));
        };
        if inner.actions[index].status.is_terminal() {
            return Err(inner.revert(format!("action {id} is terminal")));
        }
        let action = &mut inner.actions[index];
        // Every attestation is binding; repeated verifiers append again.
        action.verifiers.push(verifier.clone());
        if action.status == ActionStatus::Pending {
            action.status = ActionStatus::InProgress;
        }
        let event = LedgerEvent::ActionVerified {
            action_id: id.clone(),
            verifier: verifier.clone(),
        };
        Ok(inner.next_receipt(vec![event]))
    }

    async fn complete_action(&self, id: &ActionId) -> Result<TxReceipt, RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .calls
            .push(RegistryCall::CompleteAction { id: id.clone() });
        if let Some(err) = inner.take_injected_failure() {
            return Err(err);
        }
        let Some(index) = inner.actions.iter().position(|a| &a.id == id) else {
            return Err(inner.revert(format!("unknown action {id}")));
        };
        if inner.actions[index].status.is_terminal() {
            return Err(inner.revert(format!("action {id} is terminal")));
        }
        // The contract allows completion regardless of verifier count; the
        // coordinator owns that sequencing.
        inner.actions[index].status = ActionStatus::Completed;
        let event = LedgerEvent::ActionCompleted {
            action_id: id.clone(),
        };
        Ok(inner.next_receipt(vec![event]))
    }

    async fn get_action(&self, id: &ActionId) -> Option<ActionRecord> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RegistryCall::GetAction { id: id.clone() });
        if inner.fail_reads {
            return None;
        }
        inner.actions.iter().find(|a| &a.id == id).cloned()
    }

    async fn get_all_actions(&self) -> Vec<ActionRecord> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RegistryCall::GetAllActions);
        if inner.fail_reads {
            return Vec::new();
        }
        inner.actions.clone()
    }
}
