//! Achievement token types and metadata documents.

use crate::identity::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ledger-assigned achievement token identifier.
///
/// Only ever recovered from the `Transfer` event of a mint transaction —
/// never generated client-side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u64);

impl TokenId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single `trait_type`/`value` attribute on a metadata document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    /// String or number in practice; kept as a JSON value so either survives
    /// a round trip unchanged.
    pub value: serde_json::Value,
}

/// The metadata document embedded in a token's URI.
///
/// `name` and `description` are required; `image` and `attributes` are
/// optional. Additional fields are preserved verbatim so that callers can
/// attach collaborator-specific data without this crate knowing about it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<MetadataAttribute>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenMetadata {
    /// Minimal document with just a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: None,
            attributes: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// A minted achievement token as this protocol sees it.
///
/// Ownership lives on the ledger after minting; this protocol implements
/// neither transfer nor burn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AchievementToken {
    pub token_id: TokenId,
    pub owner: AccountId,
    /// Credited alongside the owner; informational, not ownership-bearing.
    pub contributors: Vec<AccountId>,
    /// Self-contained, content-addressed metadata URI.
    pub metadata_uri: String,
}
