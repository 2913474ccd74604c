use attest_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// A ledger write failed: revert, bad signature, network failure, or
    /// confirmation timeout. Wraps the underlying cause; the caller decides
    /// whether to retry.
    #[error("ledger transaction failed: {0}")]
    Transaction(#[from] ClientError),

    #[error("malformed contract response: {0}")]
    Decode(String),
}
