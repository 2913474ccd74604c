//! Event notification for ledger-emitted protocol events.
//!
//! Surfaces verification, completion, and token-transfer events to external
//! collaborators (dashboards, logs). Delivery is asynchronous and
//! at-least-once per published notification — the ledger may re-deliver
//! across re-orgs, and this layer does not de-duplicate. Callers needing
//! exactly-once semantics must dedupe on transaction hash themselves.

pub mod notifier;
pub mod stream;

pub use notifier::{EventNotifier, EventTopic, Subscription};
pub use stream::{run_event_stream, EventStreamError};
