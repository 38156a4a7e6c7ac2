//! Configuration types for the workforce calendar engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::Weekday;
use serde::Deserialize;

use crate::models::Tier;

/// Minimum tiers required by each gated operation.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionConfig {
    /// Tier required to schedule or unschedule leave for another employee.
    #[serde(default = "default_hr")]
    pub leave_scheduling: Tier,
    /// Tier required to create a PTO policy.
    #[serde(default = "default_hr")]
    pub policy_creation: Tier,
}

fn default_hr() -> Tier {
    Tier::Hr
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            leave_scheduling: Tier::Hr,
            policy_creation: Tier::Hr,
        }
    }
}

/// Calendar generation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Weekdays generated as non-worked days.
    #[serde(default = "default_non_working_weekdays")]
    pub non_working_weekdays: Vec<Weekday>,
}

fn default_non_working_weekdays() -> Vec<Weekday> {
    vec![Weekday::Sat, Weekday::Sun]
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            non_working_weekdays: default_non_working_weekdays(),
        }
    }
}

/// Audit publishing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Name of the queue audit events are published on.
    #[serde(default = "default_queue")]
    pub queue: String,
}

fn default_queue() -> String {
    "low".to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            queue: default_queue(),
        }
    }
}

/// The complete engine configuration.
///
/// Aggregates the sections loaded from the YAML files of a configuration
/// directory. [`WorkforceConfig::default`] gives the built-in settings.
#[derive(Debug, Clone, Default)]
pub struct WorkforceConfig {
    permissions: PermissionConfig,
    calendar: CalendarConfig,
    audit: AuditConfig,
}

impl WorkforceConfig {
    /// Creates a new WorkforceConfig from its component parts.
    pub fn new(
        permissions: PermissionConfig,
        calendar: CalendarConfig,
        audit: AuditConfig,
    ) -> Self {
        Self {
            permissions,
            calendar,
            audit,
        }
    }

    /// Returns the permission requirements.
    pub fn permissions(&self) -> &PermissionConfig {
        &self.permissions
    }

    /// Returns the calendar settings.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Returns the audit settings.
    pub fn audit(&self) -> &AuditConfig {
        &self.audit
    }
}
