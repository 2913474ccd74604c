//! Transaction receipts and the ledger events they carry.

use crate::action::ActionId;
use crate::hash::TxHash;
use crate::identity::AccountId;
use crate::token::TokenId;
use serde::{Deserialize, Serialize};

/// An event emitted by a ledger contract, as decoded from a receipt or a
/// websocket notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A verifier's attestation was recorded against an action.
    ActionVerified {
        action_id: ActionId,
        verifier: AccountId,
    },
    /// An action transitioned to `Completed`.
    ActionCompleted { action_id: ActionId },
    /// Token ownership changed. A mint emits this with the zero-account
    /// sender; it is the only place a `TokenId` originates.
    Transfer {
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    },
}

/// The confirmed result of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    /// Events emitted during execution, in emission order.
    pub events: Vec<LedgerEvent>,
}

impl TxReceipt {
    /// The token id carried by the first `Transfer` event, if any.
    pub fn minted_token_id(&self) -> Option<TokenId> {
        self.events.iter().find_map(|e| match e {
            LedgerEvent::Transfer { token_id, .. } => Some(*token_id),
            _ => None,
        })
    }
}
