//! Action records and their status lifecycle.

use crate::hash::ActionHash;
use crate::identity::AccountId;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A caller-supplied unique identifier for an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The lifecycle status of an action on the ledger.
///
/// Transitions are monotonic forward: an action never returns to `Pending`
/// once advanced. `Completed` and `Rejected` are terminal — the record is
/// immutable from then on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    /// Recorded, no attestations yet.
    Pending,
    /// Verifications underway.
    InProgress,
    /// All requested verifiers have attested.
    Verified,
    /// Sealed as complete.
    Completed,
    /// Terminally rejected.
    Rejected,
}

impl ActionStatus {
    /// The numeric code the ledger contract stores for this status.
    pub fn code(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Verified => 2,
            Self::Completed => 3,
            Self::Rejected => 4,
        }
    }

    /// Decode a contract status code. Unknown codes return `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::InProgress),
            2 => Some(Self::Verified),
            3 => Some(Self::Completed),
            4 => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether the action can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Verified => "verified",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// A governed unit of work recorded on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Caller-supplied unique identifier.
    pub id: ActionId,
    /// Descriptive tag; by convention embeds the creation time for human
    /// readability. Not part of the uniqueness key — `hash` is.
    pub action_type: String,
    /// Content hash of the action payload.
    pub hash: ActionHash,
    /// Identity that proposed the action.
    pub initiator: AccountId,
    /// Current lifecycle status.
    pub status: ActionStatus,
    /// Identities that have attested, in attestation order. Repeated calls
    /// for the same verifier append again — every attestation is binding.
    pub verifiers: Vec<AccountId>,
    /// Ledger-assigned creation time.
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            ActionStatus::Pending,
            ActionStatus::InProgress,
            ActionStatus::Verified,
            ActionStatus::Completed,
            ActionStatus::Rejected,
        ] {
            assert_eq!(ActionStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn unknown_status_code_rejected() {
        assert_eq!(ActionStatus::from_code(5), None);
        assert_eq!(ActionStatus::from_code(255), None);
    }

    #[test]
    fn terminal_statuses() {
        assert!(ActionStatus::Completed.is_terminal());
        assert!(ActionStatus::Rejected.is_terminal());
        assert!(!ActionStatus::Pending.is_terminal());
        assert!(!ActionStatus::InProgress.is_terminal());
        assert!(!ActionStatus::Verified.is_terminal());
    }
}
