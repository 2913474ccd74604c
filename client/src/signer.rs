//! Ed25519 signing identity for transaction submission.

use attest_types::AccountId;
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

/// The signing identity a `LedgerClient` submits transactions as.
///
/// The account id is derived from the public key, so the ledger can verify
/// every submission against the identity that claims it. This is the single
/// mutable shared resource of the whole client (see the sequence counter in
/// `LedgerClient`) — one identity must never have two unserialized
/// submissions in flight.
pub struct SigningIdentity {
    account: AccountId,
    signing_key: SigningKey,
}

impl SigningIdentity {
    /// Generate a fresh identity from a secure random source.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Derive a deterministic identity from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let account = AccountId::new(hex::encode(signing_key.verifying_key().to_bytes()));
        Self {
            account,
            signing_key,
        }
    }

    /// The ledger account this identity submits as.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Hex encoding of the public half, included in submissions.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message, returning the hex-encoded signature.
    pub fn sign(&self, message: &[u8]) -> String {
        hex::encode(self.signing_key.sign(message).to_bytes())
    }
}
