//! Leave request model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of time off being taken.
///
/// Half-day slots on the same date may use different types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Regular holiday.
    Holiday,
    /// Sick day.
    Sick,
    /// Paid time off.
    Pto,
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Holiday => write!(f, "holiday"),
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Pto => write!(f, "pto"),
        }
    }
}

impl std::str::FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "holiday" => Ok(LeaveType::Holiday),
            "sick" => Ok(LeaveType::Sick),
            "pto" => Ok(LeaveType::Pto),
            other => Err(format!("unknown leave type '{other}'")),
        }
    }
}

/// A stored time-off slot for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// The employee taking the time off.
    pub employee_id: u64,
    /// The date of the time off.
    pub date: NaiveDate,
    /// The kind of time off.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// True for a whole day, false for a half day.
    pub full: bool,
}

/// A leave request that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLeaveRequest {
    /// The employee taking the time off.
    pub employee_id: u64,
    /// The date of the time off.
    pub date: NaiveDate,
    /// The kind of time off.
    pub leave_type: LeaveType,
    /// True for a whole day, false for a half day.
    pub full: bool,
}

impl NewLeaveRequest {
    /// Attaches the store-assigned id.
    pub fn into_request(self, id: u64) -> LeaveRequest {
        LeaveRequest {
            id,
            employee_id: self.employee_id,
            date: self.date,
            leave_type: self.leave_type,
            full: self.full,
        }
    }
}
