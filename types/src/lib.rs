//! Fundamental types for the attest protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identities, hashes, action records, achievement token metadata,
//! transaction receipts, and ledger events.

pub mod action;
pub mod hash;
pub mod identity;
pub mod receipt;
pub mod time;
pub mod token;

pub use action::{ActionId, ActionRecord, ActionStatus};
pub use hash::{ActionHash, TxHash};
pub use identity::AccountId;
pub use receipt::{LedgerEvent, TxReceipt};
pub use time::Timestamp;
pub use token::{AchievementToken, MetadataAttribute, TokenId, TokenMetadata};
