//! Audit event publishing.
//!
//! The core depends on the [`AuditSink`] trait but does not own delivery.
//! Publishing happens after a mutation has committed; a failed publish is
//! logged and never undoes the mutation.

mod memory;
mod queued;

pub use memory::MemoryAuditSink;
pub use queued::QueuedAuditSink;

use tracing::warn;
use uuid::Uuid;

use crate::models::AuditEvent;

/// Outbound hook receiving audit events.
pub trait AuditSink: Send + Sync {
    /// Hands an event to the delivery channel without waiting for delivery.
    fn publish(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The delivery channel no longer accepts events.
    #[error("audit channel closed")]
    ChannelClosed,
    /// The sink could not record the event.
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Publishes each event, logging failures instead of returning them.
pub(crate) fn emit(sink: &dyn AuditSink, events: Vec<AuditEvent>, correlation_id: Uuid) {
    for event in events {
        let action = event.action.clone();
        let scope = event.scope;
        if let Err(err) = sink.publish(event) {
            warn!(
                correlation_id = %correlation_id,
                action = %action,
                scope = ?scope,
                error = %err,
                "Audit event could not be published"
            );
        }
    }
}
