//! Channel-backed audit sink.
//!
//! Events are pushed onto an unbounded `tokio` channel; a consumer owned by
//! the surrounding application drains the receiver and persists them.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::config::AuditConfig;
use crate::models::AuditEvent;

use super::{AuditError, AuditSink};

/// Sink handing events to a background consumer through a queue.
///
/// # Example
///
/// ```
/// use workforce_calendar::audit::QueuedAuditSink;
///
/// let (sink, mut receiver) = QueuedAuditSink::channel("low");
/// assert_eq!(sink.queue(), "low");
/// assert!(receiver.try_recv().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct QueuedAuditSink {
    queue: String,
    sender: UnboundedSender<AuditEvent>,
}

impl QueuedAuditSink {
    /// Creates a sink and the receiver its events arrive on.
    pub fn channel(queue: impl Into<String>) -> (Self, UnboundedReceiver<AuditEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let sink = Self {
            queue: queue.into(),
            sender,
        };
        (sink, receiver)
    }

    /// Creates a sink on the queue named in the audit configuration.
    pub fn from_config(config: &AuditConfig) -> (Self, UnboundedReceiver<AuditEvent>) {
        Self::channel(config.queue.clone())
    }

    /// Name of the queue events are published on.
    pub fn queue(&self) -> &str {
        &self.queue
    }
}

impl AuditSink for QueuedAuditSink {
    fn publish(&self, event: AuditEvent) -> Result<(), AuditError> {
        debug!(queue = %self.queue, action = %event.action, "Queueing audit event");
        self.sender
            .send(event)
            .map_err(|_| AuditError::ChannelClosed)
    }
}
