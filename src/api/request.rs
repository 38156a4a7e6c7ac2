//! Inbound request types.
//!
//! Requests are deserialized as loosely-typed JSON and validated field by
//! field before any scheduling logic runs. A successful `validate` yields the
//! typed command consumed by the scheduling services.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveType;
use crate::scheduling::{
    CreatePolicy, MAX_POLICY_YEAR, MIN_POLICY_YEAR, ScheduleLeave, UnscheduleLeave,
};

/// Request body for scheduling time off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleLeaveRequest {
    /// The employee performing the operation.
    pub actor_id: u64,
    /// The company both employees belong to.
    pub company_id: u64,
    /// The employee taking time off.
    pub employee_id: u64,
    /// The day off, formatted `YYYY-MM-DD`.
    pub date: String,
    /// One of `holiday`, `sick` or `pto`.
    #[serde(rename = "type")]
    pub leave_type: String,
    /// Whole day (true) or half day (false).
    pub full: bool,
    /// Whether the data is dummy data.
    #[serde(default)]
    pub is_dummy: bool,
}

impl ScheduleLeaveRequest {
    /// Decodes and validates a JSON body in one step.
    pub fn from_json(body: Value) -> EngineResult<ScheduleLeave> {
        decode::<Self>(body)?.validate()
    }

    /// Validates the request and converts it into a [`ScheduleLeave`].
    ///
    /// # Example
    ///
    /// ```
    /// use workforce_calendar::api::ScheduleLeaveRequest;
    ///
    /// let request: ScheduleLeaveRequest = serde_json::from_str(r#"{
    ///     "actor_id": 1, "company_id": 1, "employee_id": 2,
    ///     "date": "2024-01-08", "type": "pto", "full": true
    /// }"#).unwrap();
    /// assert!(request.validate().is_ok());
    /// ```
    pub fn validate(&self) -> EngineResult<ScheduleLeave> {
        Ok(ScheduleLeave {
            actor_id: require_id("actor_id", self.actor_id)?,
            company_id: require_id("company_id", self.company_id)?,
            employee_id: require_id("employee_id", self.employee_id)?,
            date: parse_date("date", &self.date)?,
            leave_type: self
                .leave_type
                .parse::<LeaveType>()
                .map_err(|message| EngineError::validation("type", message))?,
            full: self.full,
            is_dummy: self.is_dummy,
        })
    }
}

/// Request body for removing scheduled time off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnscheduleLeaveRequest {
    /// The employee performing the operation.
    pub actor_id: u64,
    /// The company both employees belong to.
    pub company_id: u64,
    /// The employee owning the leave request.
    pub employee_id: u64,
    /// The leave request to remove.
    pub leave_request_id: u64,
    /// Whether the data is dummy data.
    #[serde(default)]
    pub is_dummy: bool,
}

impl UnscheduleLeaveRequest {
    /// Decodes and validates a JSON body in one step.
    pub fn from_json(body: Value) -> EngineResult<UnscheduleLeave> {
        decode::<Self>(body)?.validate()
    }

    /// Validates the request and converts it into an [`UnscheduleLeave`].
    pub fn validate(&self) -> EngineResult<UnscheduleLeave> {
        Ok(UnscheduleLeave {
            actor_id: require_id("actor_id", self.actor_id)?,
            company_id: require_id("company_id", self.company_id)?,
            employee_id: require_id("employee_id", self.employee_id)?,
            request_id: require_id("leave_request_id", self.leave_request_id)?,
            is_dummy: self.is_dummy,
        })
    }
}

/// Request body for creating a PTO policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePolicyRequest {
    /// The company the policy belongs to.
    pub company_id: u64,
    /// The employee performing the operation.
    pub actor_id: u64,
    /// The 4-digit calendar year.
    pub year: i64,
    /// Default holidays granted to each employee.
    pub default_amount_of_allowed_holidays: i64,
    /// Default sick days granted to each employee.
    pub default_amount_of_sick_days: i64,
    /// Default PTO days granted to each employee.
    pub default_amount_of_pto_days: i64,
    /// Whether the data is dummy data.
    #[serde(default)]
    pub is_dummy: bool,
}

impl CreatePolicyRequest {
    /// Decodes and validates a JSON body in one step.
    pub fn from_json(body: Value) -> EngineResult<CreatePolicy> {
        decode::<Self>(body)?.validate()
    }

    /// Validates the request and converts it into a [`CreatePolicy`].
    pub fn validate(&self) -> EngineResult<CreatePolicy> {
        let year = i32::try_from(self.year)
            .ok()
            .filter(|year| (MIN_POLICY_YEAR..=MAX_POLICY_YEAR).contains(year))
            .ok_or_else(|| EngineError::validation("year", "expected a 4-digit year"))?;

        Ok(CreatePolicy {
            actor_id: require_id("actor_id", self.actor_id)?,
            company_id: require_id("company_id", self.company_id)?,
            year,
            default_amount_of_allowed_holidays: require_amount(
                "default_amount_of_allowed_holidays",
                self.default_amount_of_allowed_holidays,
            )?,
            default_amount_of_sick_days: require_amount(
                "default_amount_of_sick_days",
                self.default_amount_of_sick_days,
            )?,
            default_amount_of_pto_days: require_amount(
                "default_amount_of_pto_days",
                self.default_amount_of_pto_days,
            )?,
            is_dummy: self.is_dummy,
        })
    }
}

/// Deserializes a request body, reporting absent or mistyped fields as
/// validation errors.
fn decode<T: DeserializeOwned>(body: Value) -> EngineResult<T> {
    serde_json::from_value(body).map_err(|err| {
        let message = err.to_string();
        let field = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
            .unwrap_or("body")
            .to_string();
        EngineError::Validation { field, message }
    })
}

fn require_id(field: &str, id: u64) -> EngineResult<u64> {
    if id == 0 {
        return Err(EngineError::validation(field, "must be a positive id"));
    }
    Ok(id)
}

fn require_amount(field: &str, amount: i64) -> EngineResult<u32> {
    u32::try_from(amount)
        .map_err(|_| EngineError::validation(field, "must be a non-negative number of days"))
}

/// Parses a canonical `YYYY-MM-DD` date, rejecting shorthand like `2024-1-8`.
fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    let invalid = || EngineError::validation(field, format!("'{value}' is not a YYYY-MM-DD date"));
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
    if date.format("%Y-%m-%d").to_string() != value {
        return Err(invalid());
    }
    Ok(date)
}
