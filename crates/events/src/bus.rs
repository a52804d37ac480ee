//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` in the API state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shepherd_core::types::DbId;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// CrmEvent
// ---------------------------------------------------------------------------

/// Something that happened in the CRM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmEvent {
    /// Dot-separated event name, e.g. `"leads.imported"`.
    pub event_type: String,

    /// Id of the signed-in user that caused the event, if any.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl CrmEvent {
    /// Create an event with no actor and an empty object payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus. Every subscriber receives every published [`CrmEvent`].
pub struct EventBus {
    sender: broadcast::Sender<CrmEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers that fall more than `capacity` events behind observe
    /// `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently if there are none.
    pub fn publish(&self, event: CrmEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CrmEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            CrmEvent::new("leads.imported")
                .with_actor(3)
                .with_payload(serde_json::json!({"success": 2, "errors": 1})),
        );

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "leads.imported");
        assert_eq!(received.actor_user_id, Some(3));
        assert_eq!(received.payload["success"], 2);
    }

    #[tokio::test]
    async fn every_subscriber_sees_the_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(CrmEvent::new("session.signed_in"));

        assert_eq!(rx1.recv().await.unwrap().event_type, "session.signed_in");
        assert_eq!(rx2.recv().await.unwrap().event_type, "session.signed_in");
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.publish(CrmEvent::new("session.signed_out"));
    }

    #[test]
    fn new_event_has_no_actor_and_object_payload() {
        let event = CrmEvent::new("bare");
        assert!(event.actor_user_id.is_none());
        assert!(event.payload.is_object());
    }
}
