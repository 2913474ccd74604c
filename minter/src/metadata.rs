//! Self-contained metadata URIs.
//!
//! The metadata document is serialized to JSON and embedded directly in the
//! token URI as `data:application/json;base64,<payload>`. Decoding needs no
//! network fetch, so a token remains self-describing for as long as the
//! ledger holds it.

use crate::error::MintError;
use attest_types::TokenMetadata;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Prefix of every metadata URI this crate produces.
pub const METADATA_URI_PREFIX: &str = "data:application/json;base64,";

/// Encode a metadata document into a self-contained data URI.
pub fn encode_metadata_uri(metadata: &TokenMetadata) -> Result<String, MintError> {
    let json = serde_json::to_string(metadata)
        .map_err(|e| MintError::Metadata(format!("metadata serialization failed: {e}")))?;
    Ok(format!("{METADATA_URI_PREFIX}{}", BASE64.encode(json)))
}

/// Decode a metadata URI produced by [`encode_metadata_uri`].
pub fn decode_metadata_uri(uri: &str) -> Result<TokenMetadata, MintError> {
    let payload = uri
        .strip_prefix(METADATA_URI_PREFIX)
        .ok_or_else(|| MintError::Metadata("not a base64 JSON data URI".into()))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| MintError::Metadata(format!("invalid base64 payload: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| MintError::Metadata(format!("invalid metadata document: {e}")))
}
