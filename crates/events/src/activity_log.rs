//! Structured-log sink for CRM events.

use tokio::sync::broadcast;

use crate::bus::CrmEvent;

/// Background subscriber that writes every event to the `tracing` log.
pub struct ActivityLog;

impl ActivityLog {
    /// Run until the bus is dropped.
    pub async fn run(mut receiver: broadcast::Receiver<CrmEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::record(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity log lagged behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity log shutting down");
                    break;
                }
            }
        }
    }

    fn record(event: &CrmEvent) {
        tracing::info!(
            event_type = %event.event_type,
            actor_user_id = ?event.actor_user_id,
            payload = %event.payload,
            at = %event.timestamp,
            "CRM event"
        );
    }
}
