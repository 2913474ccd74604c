//! Verification coordinator — the primary service API of the protocol.
//!
//! Drives an action through its full lifecycle: duplicate pre-check, record,
//! sequential verifier attestations, completion. Constructed with an
//! injected [`ActionRegistry`](attest_registry::ActionRegistry) so callers
//! can run multiple independent ledgers per process and tests can substitute
//! nullable doubles.

pub mod coordinator;
pub mod error;

pub use coordinator::VerificationCoordinator;
pub use error::CoordinatorError;
