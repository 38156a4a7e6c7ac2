//! Audit event model.
//!
//! Every mutating operation publishes audit events in this shape. How they
//! are delivered and stored is up to the [`AuditSink`](crate::audit::AuditSink)
//! implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Actor;

/// Which log an audit event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditScope {
    /// The company-wide audit log.
    Company,
    /// An individual employee's log.
    Employee,
}

/// A single audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Which log the entry goes to.
    pub scope: AuditScope,
    /// Company id or employee id, depending on `scope`.
    pub scope_id: u64,
    /// Machine-readable action name, e.g. `time_off_created`.
    pub action: String,
    /// The employee who performed the action.
    pub actor_id: u64,
    /// The actor's name at the time of the action.
    pub actor_name: String,
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
    /// Objects touched by the action.
    pub payload: serde_json::Value,
    /// Whether the action was performed on dummy data.
    pub is_dummy: bool,
}

impl AuditEvent {
    /// Builds an event for `actor`, stamped with the current time.
    pub fn new(
        scope: AuditScope,
        scope_id: u64,
        action: impl Into<String>,
        actor: &Actor,
        payload: serde_json::Value,
        is_dummy: bool,
    ) -> Self {
        Self {
            scope,
            scope_id,
            action: action.into(),
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            occurred_at: Utc::now(),
            payload,
            is_dummy,
        }
    }
}
