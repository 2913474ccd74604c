//! Topic-based event subscriptions over broadcast channels.

use attest_types::LedgerEvent;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// The three event classes the ledger emits for this protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTopic {
    /// A verifier attestation was recorded.
    ActionVerified,
    /// An action was sealed as complete.
    ActionCompleted,
    /// Token ownership changed (mints included).
    Transfer,
}

impl EventTopic {
    /// The topic a given event belongs to.
    pub fn of(event: &LedgerEvent) -> Self {
        match event {
            LedgerEvent::ActionVerified { .. } => Self::ActionVerified,
            LedgerEvent::ActionCompleted { .. } => Self::ActionCompleted,
            LedgerEvent::Transfer { .. } => Self::Transfer,
        }
    }
}

/// A live subscription returned from [`EventNotifier::subscribe`].
///
/// Tear down exactly this callback with [`Subscription::unsubscribe`];
/// dropping the handle leaves the subscription running.
pub struct Subscription {
    topic: EventTopic,
    handle: tokio::task::JoinHandle<()>,
}

impl Subscription {
    pub fn topic(&self) -> EventTopic {
        self.topic
    }

    /// Whether the dispatch task is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop delivering events to this subscription's callback.
    pub fn unsubscribe(self) {
        self.handle.abort();
    }
}

/// Dispatches ledger events to registered callbacks, one broadcast channel
/// per topic.
pub struct EventNotifier {
    verified_tx: broadcast::Sender<LedgerEvent>,
    completed_tx: broadcast::Sender<LedgerEvent>,
    transfer_tx: broadcast::Sender<LedgerEvent>,
    /// Abort handles of every live dispatch task, for `unsubscribe_all`.
    dispatchers: Mutex<Vec<AbortHandle>>,
}

impl EventNotifier {
    /// Create a notifier with a default per-topic channel capacity of 256.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// A subscriber that falls more than `capacity` events behind starts
    /// losing the oldest ones (logged as a warning on its side).
    pub fn with_capacity(capacity: usize) -> Self {
        let (verified_tx, _) = broadcast::channel(capacity);
        let (completed_tx, _) = broadcast::channel(capacity);
        let (transfer_tx, _) = broadcast::channel(capacity);
        Self {
            verified_tx,
            completed_tx,
            transfer_tx,
            dispatchers: Mutex::new(Vec::new()),
        }
    }

    fn sender_for(&self, topic: EventTopic) -> &broadcast::Sender<LedgerEvent> {
        match topic {
            EventTopic::ActionVerified => &self.verified_tx,
            EventTopic::ActionCompleted => &self.completed_tx,
            EventTopic::Transfer => &self.transfer_tx,
        }
    }

    /// Register a callback for one topic. The callback runs on a spawned
    /// dispatch task, so it fires asynchronously with respect to `publish`.
    pub fn subscribe<F>(&self, topic: EventTopic, callback: F) -> Subscription
    where
        F: Fn(LedgerEvent) + Send + Sync + 'static,
    {
        let mut rx = self.sender_for(topic).subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => callback(event),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(?topic, missed, "event subscriber lagged; events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        let mut dispatchers = self.dispatchers.lock().unwrap();
        // Sweep handles whose tasks already ended (individual unsubscribes,
        // closed channels) so churn does not grow the list without bound.
        dispatchers.retain(|h| !h.is_finished());
        dispatchers.push(handle.abort_handle());
        Subscription { topic, handle }
    }

    /// Publish a ledger event to its topic's subscribers.
    pub fn publish(&self, event: LedgerEvent) {
        let topic = EventTopic::of(&event);
        debug!(?topic, ?event, "ledger event");
        // No receivers is fine; nobody subscribed to this topic yet.
        let _ = self.sender_for(topic).send(event);
    }

    #[cfg(test)]
    fn dispatcher_count(&self) -> usize {
        self.dispatchers.lock().unwrap().len()
    }

    /// Tear down every live subscription at once.
    pub fn unsubscribe_all(&self) {
        let mut dispatchers = self.dispatchers.lock().unwrap();
        for handle in dispatchers.drain(..) {
            handle.abort();
        }
    }
}

impl Default for EventNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_types::{AccountId, ActionId, TokenId};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn verified(id: &str) -> LedgerEvent {
        LedgerEvent::ActionVerified {
            action_id: ActionId::from(id),
            verifier: AccountId::from("v1"),
        }
    }

    fn completed(id: &str) -> LedgerEvent {
        LedgerEvent::ActionCompleted {
            action_id: ActionId::from(id),
        }
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<LedgerEvent>) -> LedgerEvent {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("event not delivered in time")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn events_reach_their_topic_subscribers() {
        let notifier = EventNotifier::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _sub = notifier.subscribe(EventTopic::ActionVerified, move |event| {
            let _ = tx.send(event);
        });

        notifier.publish(verified("a-1"));
        assert_eq!(recv(&mut rx).await, verified("a-1"));
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let notifier = EventNotifier::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _sub = notifier.subscribe(EventTopic::Transfer, move |event| {
            let _ = tx.send(event);
        });

        notifier.publish(verified("a-1"));
        notifier.publish(completed("a-1"));
        let transfer = LedgerEvent::Transfer {
            from: AccountId::from("0x0"),
            to: AccountId::from("owner"),
            token_id: TokenId::new(1),
        };
        notifier.publish(transfer.clone());

        // Only the transfer arrives.
        assert_eq!(recv(&mut rx).await, transfer);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribe_stops_one_callback() {
        let notifier = EventNotifier::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        // Keep a sender alive so rx_a pends (rather than closing) after the
        // subscription's clone is dropped by the abort.
        let _keep_a = tx_a.clone();
        let sub_a = notifier.subscribe(EventTopic::ActionCompleted, move |event| {
            let _ = tx_a.send(event);
        });
        let _sub_b = notifier.subscribe(EventTopic::ActionCompleted, move |event| {
            let _ = tx_b.send(event);
        });

        notifier.publish(completed("a-1"));
        assert_eq!(recv(&mut rx_a).await, completed("a-1"));
        assert_eq!(recv(&mut rx_b).await, completed("a-1"));

        sub_a.unsubscribe();
        notifier.publish(completed("a-2"));
        assert_eq!(recv(&mut rx_b).await, completed("a-2"));
        assert!(timeout(Duration::from_millis(100), rx_a.recv())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn unsubscribe_all_tears_everything_down() {
        let notifier = EventNotifier::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tx2 = tx.clone();
        let _keep = tx.clone();
        let _sub_a = notifier.subscribe(EventTopic::ActionVerified, move |event| {
            let _ = tx.send(event);
        });
        let _sub_b = notifier.subscribe(EventTopic::ActionCompleted, move |event| {
            let _ = tx2.send(event);
        });

        notifier.unsubscribe_all();
        // Give the aborts a moment to land before publishing.
        tokio::task::yield_now().await;

        notifier.publish(verified("a-1"));
        notifier.publish(completed("a-1"));
        assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn subscription_churn_does_not_accumulate_dead_handles() {
        let notifier = EventNotifier::new();
        for _ in 0..8 {
            notifier
                .subscribe(EventTopic::ActionVerified, |_| {})
                .unsubscribe();
        }
        // Let the aborted tasks wind down before the next subscribe sweeps.
        tokio::time::sleep(Duration::from_millis(100)).await;

        let _sub = notifier.subscribe(EventTopic::ActionVerified, |_| {});
        assert!(notifier.dispatcher_count() <= 2);
    }
}
