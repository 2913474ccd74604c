//! Action registry — the on-ledger contract abstraction.
//!
//! The rest of the workspace depends only on the [`ActionRegistry`] trait;
//! [`ContractActionRegistry`] is the production implementation backed by a
//! `LedgerClient`, and `attest-nullables` provides an in-memory double for
//! tests.

pub mod contract;
pub mod error;
pub mod registry;

pub use contract::ContractActionRegistry;
pub use error::RegistryError;
pub use registry::{verify_action_record, ActionRegistry};
