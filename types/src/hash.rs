//! Hash types for action payloads and ledger transactions.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

type Blake2b256 = Blake2b<U32>;

/// The content hash of an action's payload.
///
/// The ledger treats the `(id, hash)` pair as the unit of uniqueness, so the
/// hash — not the descriptive `action_type` tag — is the source of truth for
/// idempotency. Callers may supply any opaque string; `ActionHash::digest`
/// is a convenience for callers that want content addressing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionHash(String);

impl ActionHash {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Compute a Blake2b-256 content hash of a payload, hex-encoded.
    pub fn digest(payload: &[u8]) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(payload);
        Self(hex_encode(hasher.finalize().as_slice()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The hash of a confirmed ledger transaction.
///
/// Assigned by the ledger; this client never parses or synthesizes one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
