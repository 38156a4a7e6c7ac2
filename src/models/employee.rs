//! Employee model and permission tiers.
//!
//! This module defines the Employee struct, which doubles as the acting
//! identity for every gated operation, and the Tier enumeration used to
//! authorize it.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Ordered permission level held by an employee.
///
/// The ordering follows the numeric level, so a *smaller* tier is *more*
/// privileged: `Administrator < Hr < User`. An actor satisfies a requirement
/// when its tier compares less than or equal to the required tier; always go
/// through [`Tier::is_at_least`] rather than comparing by hand.
///
/// # Example
///
/// ```
/// use workforce_calendar::models::Tier;
///
/// assert!(Tier::Administrator.is_at_least(Tier::Hr));
/// assert!(Tier::Hr.is_at_least(Tier::Hr));
/// assert!(!Tier::User.is_at_least(Tier::Hr));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Company administrators (level 100).
    Administrator = 100,
    /// Human resources staff (level 200).
    Hr = 200,
    /// Regular employees (level 300).
    User = 300,
}

impl Tier {
    /// Returns the numeric permission level.
    pub fn level(self) -> u16 {
        self as u16
    }

    /// Returns true if this tier is at least as privileged as `required`.
    pub fn is_at_least(self, required: Tier) -> bool {
        self <= required
    }
}

impl TryFrom<u16> for Tier {
    type Error = EngineError;

    fn try_from(level: u16) -> Result<Self, Self::Error> {
        match level {
            100 => Ok(Tier::Administrator),
            200 => Ok(Tier::Hr),
            300 => Ok(Tier::User),
            other => Err(EngineError::validation(
                "permission_level",
                format!("unknown permission level {other}"),
            )),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Administrator => write!(f, "administrator"),
            Tier::Hr => write!(f, "hr"),
            Tier::User => write!(f, "user"),
        }
    }
}

/// An employee of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// The company the employee belongs to.
    pub company_id: u64,
    /// Display name, recorded on audit events.
    pub name: String,
    /// The employee's permission tier.
    pub tier: Tier,
}

/// An employee acting as the caller of an operation.
pub type Actor = Employee;
