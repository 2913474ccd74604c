//! Nullable achievement minter — mints tokens into memory.

use async_trait::async_trait;
use attest_client::ClientError;
use attest_minter::{encode_metadata_uri, AchievementMinter, MintError, MintReceipt};
use attest_types::{AccountId, TokenId, TokenMetadata, TxHash};
use std::sync::Mutex;

/// One observed mint, recorded in invocation order.
#[derive(Clone, Debug, PartialEq)]
pub struct MintCall {
    pub metadata_uri: String,
    pub owner: AccountId,
    pub contributors: Vec<AccountId>,
}

#[derive(Default)]
struct Inner {
    mints: Vec<MintCall>,
    next_token_id: u64,
    omit_transfer_event: bool,
    fail_writes: bool,
}

/// A test minter that assigns sequential token ids without a ledger.
#[derive(Default)]
pub struct NullAchievementMinter {
    inner: Mutex<Inner>,
}

impl NullAchievementMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a token contract whose mint emits no `Transfer` event
    /// (the fatal contract-mismatch case).
    pub fn set_omit_transfer_event(&self, omit: bool) {
        self.inner.lock().unwrap().omit_transfer_event = omit;
    }

    /// Make every mint fail at the transaction layer.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    /// All mints observed so far, in order.
    pub fn mints(&self) -> Vec<MintCall> {
        self.inner.lock().unwrap().mints.clone()
    }
}

#[async_trait]
impl AchievementMinter for NullAchievementMinter {
    async fn mint(
        &self,
        metadata: &TokenMetadata,
        owner: &AccountId,
        contributors: &[AccountId],
    ) -> Result<MintReceipt, MintError> {
        let metadata_uri = encode_metadata_uri(metadata)?;

        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(MintError::Transaction(ClientError::Transport(
                "null minter: writes disabled".into(),
            )));
        }
        inner.mints.push(MintCall {
            metadata_uri,
            owner: owner.clone(),
            contributors: contributors.to_vec(),
        });

        inner.next_token_id += 1;
        let hash = format!("null-mint-{}", inner.next_token_id);

        if inner.omit_transfer_event {
            return Err(MintError::TransferEventMissing { hash });
        }
        Ok(MintReceipt {
            token_id: TokenId::new(inner.next_token_id),
            transaction_hash: TxHash::new(hash),
        })
    }
}
