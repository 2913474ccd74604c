//! JSON-RPC ledger client: signed contract calls, confirmation polling,
//! read-only queries.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::signer::SigningIdentity;
use attest_types::{AccountId, LedgerEvent, TxHash, TxReceipt};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// A submitted-but-unconfirmed transaction.
#[derive(Clone, Debug)]
pub struct PendingTx {
    pub hash: TxHash,
}

/// Client for a ledger node's JSON-RPC endpoint.
///
/// Holds one signing identity; every write goes out under it. The sequence
/// counter is held across submission so two concurrent `call`s from the same
/// client cannot reach the node out of order — the ledger's own sequence
/// check would fail one of them otherwise.
pub struct LedgerClient {
    http: reqwest::Client,
    config: ClientConfig,
    identity: SigningIdentity,
    sequence: Mutex<u64>,
}

impl LedgerClient {
    /// Create a new client from a config and signing identity.
    pub fn new(config: ClientConfig, identity: SigningIdentity) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            config,
            identity,
            sequence: Mutex::new(0),
        })
    }

    /// The account this client signs as.
    pub fn account(&self) -> &AccountId {
        self.identity.account()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| ClientError::InvalidResponse("rpc params were not a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        let response = self
            .http
            .post(&self.config.node_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("node request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ClientError::Transport(format!(
                "ledger node answered HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("undecodable node response: {e}")))?;

        if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
            return Err(ClientError::Node(err.to_string()));
        }

        Ok(json.get("result").cloned().unwrap_or(json))
    }

    /// Sign and submit a contract call, returning the pending transaction.
    ///
    /// The signature covers the canonical JSON encoding of the payload
    /// (caller, contract, method, params, sequence). `serde_json` maps are
    /// key-ordered, so the encoding is stable.
    pub async fn call(
        &self,
        contract: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<PendingTx, ClientError> {
        // Hold the sequence lock across the whole submission.
        let mut sequence = self.sequence.lock().await;

        let payload = serde_json::json!({
            "caller": self.identity.account(),
            "contract": contract,
            "method": method,
            "params": params,
            "sequence": *sequence,
        });
        let canonical = serde_json::to_string(&payload)
            .map_err(|e| ClientError::Signing(format!("payload encoding failed: {e}")))?;
        let signature = self.identity.sign(canonical.as_bytes());

        let result = self
            .rpc_call(
                "contract_call",
                serde_json::json!({
                    "payload": payload,
                    "public_key": self.identity.public_key_hex(),
                    "signature": signature,
                }),
            )
            .await?;

        let hash = result
            .get("hash")
            .and_then(|h| h.as_str())
            .ok_or_else(|| ClientError::InvalidResponse("missing transaction hash".into()))?;

        *sequence += 1;
        debug!(contract, method, hash, "transaction submitted");

        Ok(PendingTx {
            hash: TxHash::new(hash),
        })
    }

    /// Wait for a pending transaction to confirm, returning its receipt.
    ///
    /// Polls `transaction_info` until the node reports the transaction
    /// confirmed or rejected, bounded by the configured confirmation
    /// timeout. A rejected transaction was included and reverted — the
    /// caller decides whether the operation can be retried.
    pub async fn confirm(&self, pending: &PendingTx) -> Result<TxReceipt, ClientError> {
        let deadline = Instant::now() + self.config.confirmation_timeout();

        loop {
            let info = self
                .rpc_call(
                    "transaction_info",
                    serde_json::json!({ "hash": pending.hash }),
                )
                .await?;

            if let Some(detail) = info.get("rejected").and_then(|r| r.as_str()) {
                return Err(ClientError::Rejected {
                    hash: pending.hash.to_string(),
                    detail: detail.to_string(),
                });
            }

            if info.get("confirmed").and_then(|c| c.as_bool()) == Some(true) {
                let events = decode_events(info.get("events"));
                debug!(hash = %pending.hash, events = events.len(), "transaction confirmed");
                return Ok(TxReceipt {
                    transaction_hash: pending.hash.clone(),
                    events,
                });
            }

            if Instant::now() >= deadline {
                return Err(ClientError::ConfirmationTimeout {
                    hash: pending.hash.to_string(),
                    waited_secs: self.config.confirmation_timeout_secs,
                });
            }

            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Submit a contract call and wait for its confirmation.
    pub async fn submit(
        &self,
        contract: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<TxReceipt, ClientError> {
        let pending = self.call(contract, method, params).await?;
        self.confirm(&pending).await
    }

    /// Read-only contract query. Unsigned; a single round trip.
    pub async fn query(
        &self,
        contract: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        self.rpc_call(
            "contract_query",
            serde_json::json!({
                "contract": contract,
                "method": method,
                "params": params,
            }),
        )
        .await
    }
}

/// Decode the `events` array of a receipt. Unknown event shapes are skipped:
/// the ledger may emit events this client has no interest in.
fn decode_events(raw: Option<&serde_json::Value>) -> Vec<LedgerEvent> {
    let Some(entries) = raw.and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("skipping undecodable ledger event: {e}");
                None
            }
        })
        .collect()
}
