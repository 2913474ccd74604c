use attest_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MintError {
    /// The mint transaction itself failed. Wraps the underlying cause; the
    /// caller decides whether to retry.
    #[error("ledger transaction failed: {0}")]
    Transaction(#[from] ClientError),

    /// The mint transaction confirmed but its receipt carried no `Transfer`
    /// event to recover the token id from. This indicates a contract
    /// mismatch and is fatal — never retried, never papered over with a
    /// placeholder id.
    #[error("mint transaction {hash} confirmed without a transfer event")]
    TransferEventMissing { hash: String },

    #[error("metadata error: {0}")]
    Metadata(String),
}
