//! Achievement token minting.
//!
//! Mints a non-fungible achievement token bound to a verified action. The
//! metadata document travels inside the token URI itself (base64 data URI),
//! so no external metadata host is ever fetched — the encoding is reversible
//! offline.

pub mod error;
pub mod metadata;
pub mod minter;

pub use error::MintError;
pub use metadata::{decode_metadata_uri, encode_metadata_uri};
pub use minter::{AchievementMinter, ContractAchievementMinter, MintReceipt};
