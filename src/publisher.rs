//! Domain event publication
//!
//! Outbox handoff contract: a command's events are handed over exactly
//! once, in production order, and only after the triggering state change
//! was durably committed. Delivery beyond the handoff (broker retries,
//! dead-lettering) belongs to the messaging adapter, not this crate.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::DomainEvent;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event handoff failed: {0}")]
    Delivery(String),
}

/// Consumer-facing publication contract, implemented by the excluded
/// messaging layer (and by test doubles).
#[async_trait]
pub trait DomainEventPublisher: Send + Sync {
    /// Hand off all events produced by one successful command, in order.
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError>;
}

/// Default adapter that logs each event record instead of sending it
/// anywhere. Useful for local runs and environments without a broker.
#[derive(Debug, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DomainEventPublisher for TracingEventPublisher {
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
        for event in events {
            let envelope = event.to_envelope()?;
            tracing::info!(
                event_type = envelope.event_type,
                event_id = %envelope.id,
                payload = %envelope.payload,
                "domain event published"
            );
        }
        Ok(())
    }
}

/// Publish committed events, logging instead of failing the command when
/// the handoff itself fails. Publication is fire-and-forget relative to
/// the core: a committed mutation is never rolled back because its events
/// could not be delivered.
pub(crate) async fn publish_committed(publisher: &dyn DomainEventPublisher, events: &[DomainEvent]) {
    if events.is_empty() {
        return;
    }
    if let Err(err) = publisher.publish(events).await {
        tracing::warn!(error = %err, count = events.len(), "failed to hand off committed events");
    }
}
