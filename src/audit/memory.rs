//! In-memory audit sink.

use std::sync::Mutex;

use crate::models::AuditEvent;

use super::{AuditError, AuditSink};

/// Sink that keeps every published event in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the events published so far.
    ///
    /// The list is only ever appended to, so a poisoned lock still guards a
    /// consistent list and is read through.
    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for MemoryAuditSink {
    fn publish(&self, event: AuditEvent) -> Result<(), AuditError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| AuditError::Unavailable("memory sink lock poisoned".to_string()))?;
        events.push(event);
        Ok(())
    }
}
