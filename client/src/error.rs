use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("node error: {0}")]
    Node(String),

    #[error("transaction {hash} rejected by ledger: {detail}")]
    Rejected { hash: String, detail: String },

    #[error("transaction {hash} unconfirmed after {waited_secs}s")]
    ConfirmationTimeout { hash: String, waited_secs: u64 },

    #[error("invalid node response: {0}")]
    InvalidResponse(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("config error: {0}")]
    Config(String),
}
