//! Websocket event stream from a ledger node.
//!
//! The node pushes contract events as JSON text frames; this module decodes
//! them and feeds the notifier. Re-delivered frames (re-orgs, reconnects)
//! are published again — at-least-once is the contract here.

use crate::notifier::EventNotifier;
use attest_types::LedgerEvent;
use futures_util::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum EventStreamError {
    #[error("websocket connect failed: {0}")]
    Connect(String),

    #[error("websocket stream error: {0}")]
    Stream(String),
}

/// Connect to a node's websocket endpoint and publish every decodable
/// ledger event until the stream closes.
///
/// Runs until the node closes the connection (returns `Ok`) or the stream
/// errors. Reconnection policy belongs to the caller; this function does
/// not retry.
pub async fn run_event_stream(
    ws_url: &str,
    notifier: Arc<EventNotifier>,
) -> Result<(), EventStreamError> {
    let (mut ws, _) = connect_async(ws_url)
        .await
        .map_err(|e| EventStreamError::Connect(e.to_string()))?;
    info!(ws_url, "event stream connected");

    while let Some(frame) = ws.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<LedgerEvent>(&text) {
                Ok(event) => notifier.publish(event),
                Err(e) => debug!("skipping undecodable event frame: {e}"),
            },
            Ok(Message::Close(_)) => {
                info!("event stream closed by node");
                break;
            }
            // Pings are answered by the library; other frame types carry
            // nothing for us.
            Ok(_) => {}
            Err(e) => {
                warn!("event stream failed: {e}");
                return Err(EventStreamError::Stream(e.to_string()));
            }
        }
    }

    Ok(())
}
