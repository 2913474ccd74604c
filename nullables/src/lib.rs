//! Nullable infrastructure for deterministic testing.
//!
//! The ledger-facing seams of this workspace are traits (`ActionRegistry`,
//! `AchievementMinter`). This crate provides in-memory implementations that:
//! - enforce the same invariants the real ledger contract does (`(id, hash)`
//!   uniqueness, terminal statuses)
//! - record every call for sequencing assertions
//! - can be switched into failure modes programmatically
//! - never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod minter;
pub mod registry;

pub use minter::{MintCall, NullAchievementMinter};
pub use registry::{NullActionRegistry, RegistryCall};
