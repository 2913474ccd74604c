//! Ledger client for the attest protocol.
//!
//! Wraps a single signing identity and a JSON-RPC connection to a ledger
//! node. All write operations from one `LedgerClient` are serialized through
//! its sequence counter, so the ledger sees them in program order. The client
//! performs no retries — failures carry their cause and the caller decides.

pub mod client;
pub mod config;
pub mod error;
pub mod signer;

pub use client::{LedgerClient, PendingTx};
pub use config::ClientConfig;
pub use error::ClientError;
pub use signer::SigningIdentity;
