//! Ledger-contract-backed implementation of `ActionRegistry`.

use crate::error::RegistryError;
use crate::registry::ActionRegistry;
use async_trait::async_trait;
use attest_client::LedgerClient;
use attest_types::{
    AccountId, ActionHash, ActionId, ActionRecord, ActionStatus, Timestamp, TxReceipt,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

/// The default ledger account the action registry contract lives at.
pub const DEFAULT_CONTRACT: &str = "action_registry";

/// Production `ActionRegistry` backed by a contract on the ledger.
pub struct ContractActionRegistry {
    client: Arc<LedgerClient>,
    contract: String,
}

impl ContractActionRegistry {
    pub fn new(client: Arc<LedgerClient>) -> Self {
        Self::at(client, DEFAULT_CONTRACT)
    }

    /// Target a registry contract deployed at a non-default account.
    pub fn at(client: Arc<LedgerClient>, contract: impl Into<String>) -> Self {
        Self {
            client,
            contract: contract.into(),
        }
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }
}

#[async_trait]
impl ActionRegistry for ContractActionRegistry {
    async fn exists_with_hash(
        &self,
        id: &ActionId,
        hash: &ActionHash,
    ) -> Result<bool, RegistryError> {
        let result = self
            .client
            .query(
                &self.contract,
                "exists_with_hash",
                serde_json::json!({ "id": id, "hash": hash }),
            )
            .await?;
        result
            .get("exists")
            .and_then(|v| v.as_bool())
            .ok_or_else(|| RegistryError::Decode("missing exists flag".into()))
    }

    async fn record_action(
        &self,
        id: &ActionId,
        action_type: &str,
        hash: &ActionHash,
        initiator: &AccountId,
    ) -> Result<TxReceipt, RegistryError> {
        let receipt = self
            .client
            .submit(
                &self.contract,
                "record_action",
                serde_json::json!({
                    "id": id,
                    "action_type": action_type,
                    "hash": hash,
                    "initiator": initiator,
                }),
            )
            .await?;
        Ok(receipt)
    }

    async fn verify_action(
        &self,
        id: &ActionId,
        verifier: &AccountId,
    ) -> Result<TxReceipt, RegistryError> {
        let receipt = self
            .client
            .submit(
                &self.contract,
                "verify_action",
                serde_json::json!({ "id": id, "verifier": verifier }),
            )
            .await?;
        Ok(receipt)
    }

    async fn complete_action(&self, id: &ActionId) -> Result<TxReceipt, RegistryError> {
        let receipt = self
            .client
            .submit(
                &self.contract,
                "complete_action",
                serde_json::json!({ "id": id }),
            )
            .await?;
        Ok(receipt)
    }

    async fn get_action(&self, id: &ActionId) -> Option<ActionRecord> {
        let result = match self
            .client
            .query(&self.contract, "get_action", serde_json::json!({ "id": id }))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(action_id = %id, "get_action query failed: {e}");
                return None;
            }
        };

        if result.is_null() {
            return None;
        }

        match decode_action(&result) {
            Ok(action) => Some(action),
            Err(e) => {
                warn!(action_id = %id, "get_action returned malformed record: {e}");
                None
            }
        }
    }

    async fn get_all_actions(&self) -> Vec<ActionRecord> {
        let result = match self
            .client
            .query(&self.contract, "get_all_actions", serde_json::json!({}))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!("get_all_actions query failed: {e}");
                return Vec::new();
            }
        };

        let Some(entries) = result.get("actions").and_then(|v| v.as_array()) else {
            warn!("get_all_actions returned no actions array");
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| match decode_action(entry) {
                Ok(action) => Some(action),
                Err(e) => {
                    warn!("skipping malformed action record: {e}");
                    None
                }
            })
            .collect()
    }
}

/// Wire shape of an action record as the contract returns it. The status is
/// a numeric code; everything else maps directly.
#[derive(Deserialize)]
struct WireAction {
    id: String,
    action_type: String,
    hash: String,
    initiator: String,
    status: u8,
    #[serde(default)]
    verifiers: Vec<String>,
    timestamp: u64,
}

fn decode_action(value: &serde_json::Value) -> Result<ActionRecord, RegistryError> {
    let wire: WireAction = serde_json::from_value(value.clone())
        .map_err(|e| RegistryError::Decode(format!("invalid action record: {e}")))?;
    let status = ActionStatus::from_code(wire.status)
        .ok_or_else(|| RegistryError::Decode(format!("unknown status code {}", wire.status)))?;
    Ok(ActionRecord {
        id: ActionId::new(wire.id),
        action_type: wire.action_type,
        hash: ActionHash::new(wire.hash),
        initiator: AccountId::new(wire.initiator),
        status,
        verifiers: wire.verifiers.into_iter().map(AccountId::new).collect(),
        timestamp: Timestamp::new(wire.timestamp),
    })
}
