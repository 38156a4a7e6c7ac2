//! PTO policy and calendar day models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A company's PTO policy for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// The owning company.
    pub company_id: u64,
    /// The calendar year the policy covers.
    pub year: i32,
    /// Number of worked days in the generated calendar.
    pub total_worked_days: u32,
    /// Default holidays granted to each employee.
    pub default_amount_of_allowed_holidays: u32,
    /// Default sick days granted to each employee.
    pub default_amount_of_sick_days: u32,
    /// Default PTO days granted to each employee.
    pub default_amount_of_pto_days: u32,
    /// Whether the policy was created as dummy data.
    #[serde(default)]
    pub is_dummy: bool,
}

/// A policy that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
    /// The owning company.
    pub company_id: u64,
    /// The calendar year the policy covers.
    pub year: i32,
    /// Number of worked days in the generated calendar.
    pub total_worked_days: u32,
    /// Default holidays granted to each employee.
    pub default_amount_of_allowed_holidays: u32,
    /// Default sick days granted to each employee.
    pub default_amount_of_sick_days: u32,
    /// Default PTO days granted to each employee.
    pub default_amount_of_pto_days: u32,
    /// Whether the policy is dummy data.
    pub is_dummy: bool,
}

impl NewPolicy {
    /// Attaches the store-assigned id.
    pub fn into_policy(self, id: u64) -> Policy {
        Policy {
            id,
            company_id: self.company_id,
            year: self.year,
            total_worked_days: self.total_worked_days,
            default_amount_of_allowed_holidays: self.default_amount_of_allowed_holidays,
            default_amount_of_sick_days: self.default_amount_of_sick_days,
            default_amount_of_pto_days: self.default_amount_of_pto_days,
            is_dummy: self.is_dummy,
        }
    }
}

/// One day of a policy's calendar.
///
/// Generated in bulk with its policy and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date.
    pub date: NaiveDate,
    /// Day of the week, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u32,
    /// Day of the year, starting at 1.
    pub day_of_year: u32,
    /// Whether the day counts as a business day.
    pub is_worked: bool,
}
