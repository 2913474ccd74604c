//! The `AchievementMinter` trait and its contract-backed implementation.

use crate::error::MintError;
use crate::metadata::encode_metadata_uri;
use async_trait::async_trait;
use attest_client::LedgerClient;
use attest_types::{AccountId, TokenId, TokenMetadata, TxHash, TxReceipt};
use std::sync::Arc;
use tracing::debug;

/// The default ledger account the achievement token contract lives at.
pub const DEFAULT_CONTRACT: &str = "achievement_token";

/// Result of a successful mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    /// Ledger-assigned token id, recovered from the mint's `Transfer` event.
    pub token_id: TokenId,
    pub transaction_hash: TxHash,
}

/// Mints achievement tokens for completed, verified actions.
///
/// Minting is not idempotent: nothing here prevents a second token for the
/// same action. Callers own that guard.
#[async_trait]
pub trait AchievementMinter: Send + Sync {
    async fn mint(
        &self,
        metadata: &TokenMetadata,
        owner: &AccountId,
        contributors: &[AccountId],
    ) -> Result<MintReceipt, MintError>;
}

/// Production `AchievementMinter` backed by a contract on the ledger.
pub struct ContractAchievementMinter {
    client: Arc<LedgerClient>,
    contract: String,
}

impl ContractAchievementMinter {
    pub fn new(client: Arc<LedgerClient>) -> Self {
        Self::at(client, DEFAULT_CONTRACT)
    }

    /// Target a token contract deployed at a non-default account.
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
impl AchievementMinter for ContractAchievementMinter {
    async fn mint(
        &self,
        metadata: &TokenMetadata,
        owner: &AccountId,
        contributors: &[AccountId],
    ) -> Result<MintReceipt, MintError> {
        let metadata_uri = encode_metadata_uri(metadata)?;

        let receipt = self
            .client
            .submit(
                &self.contract,
                "mint_achievement",
                serde_json::json!({
                    "owner": owner,
                    "metadata_uri": metadata_uri,
                    "contributors": contributors,
                }),
            )
            .await?;

        let minted = mint_receipt_from(receipt)?;
        debug!(token_id = %minted.token_id, owner = %owner, "achievement token minted");
        Ok(minted)
    }
}

/// Extract the ledger-assigned token id from a confirmed mint receipt.
///
/// The token id only ever comes from the receipt's `Transfer` event. A
/// confirmed mint without one is a contract mismatch, surfaced as
/// `TransferEventMissing` rather than a synthesized id.
fn mint_receipt_from(receipt: TxReceipt) -> Result<MintReceipt, MintError> {
    match receipt.minted_token_id() {
        Some(token_id) => Ok(MintReceipt {
            token_id,
            transaction_hash: receipt.transaction_hash,
        }),
        None => Err(MintError::TransferEventMissing {
            hash: receipt.transaction_hash.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_types::LedgerEvent;

    #[test]
    fn token_id_recovered_from_transfer_event() {
        let receipt = TxReceipt {
            transaction_hash: TxHash::new("0xmint"),
            events: vec![LedgerEvent::Transfer {
                from: AccountId::from("0x0"),
                to: AccountId::from("owner"),
                token_id: TokenId::new(42),
            }],
        };
        let minted = mint_receipt_from(receipt).unwrap();
        assert_eq!(minted.token_id, TokenId::new(42));
        assert_eq!(minted.transaction_hash, TxHash::new("0xmint"));
    }

    #[test]
    fn missing_transfer_event_is_fatal() {
        let receipt = TxReceipt {
            transaction_hash: TxHash::new("0xmint"),
            events: vec![],
        };
        let err = mint_receipt_from(receipt).unwrap_err();
        assert!(matches!(
            err,
            MintError::TransferEventMissing { ref hash } if hash == "0xmint"
        ));
    }
}
