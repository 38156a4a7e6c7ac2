//! Error types for the workforce calendar engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while generating calendars and
//! scheduling leave.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Tier;

/// The broad category an [`EngineError`] belongs to.
///
/// Callers use the kind to decide how to react: validation, authorization
/// and conflict errors are user-actionable, integrity violations are defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input fields.
    Validation,
    /// A company, employee, policy or leave request does not exist.
    NotFound,
    /// The actor's tier is not privileged enough.
    Authorization,
    /// A policy already exists for the requested year.
    PolicyConflict,
    /// The requested date cannot accept the leave request.
    SchedulingConflict,
    /// Stored data already breaks an invariant.
    IntegrityViolation,
    /// Configuration or storage backend failure.
    Infrastructure,
}

/// The main error type for the workforce calendar engine.
///
/// # Example
///
/// ```
/// use workforce_calendar::error::{EngineError, ErrorKind};
///
/// let error = EngineError::PolicyConflict { company_id: 1, year: 2024 };
/// assert_eq!(error.to_string(), "A PTO policy already exists for company 1 in 2024");
/// assert_eq!(error.kind(), ErrorKind::PolicyConflict);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An inbound field was missing or malformed.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The acting employee does not exist in the company.
    #[error("Actor {actor_id} not found in company {company_id}")]
    ActorNotFound {
        /// The acting employee.
        actor_id: u64,
        /// The company the actor was looked up in.
        company_id: u64,
    },

    /// The target employee does not belong to the company.
    #[error("Employee {employee_id} does not belong to company {company_id}")]
    EmployeeMismatch {
        /// The target employee.
        employee_id: u64,
        /// The company the employee was expected in.
        company_id: u64,
    },

    /// No policy covers the current year for the company.
    #[error("No active PTO policy for company {company_id} in {year}")]
    NoActivePolicy {
        /// The company without a policy.
        company_id: u64,
        /// The year that was resolved.
        year: i32,
    },

    /// The leave request does not exist for the employee.
    #[error("Leave request {request_id} not found for employee {employee_id}")]
    RequestNotFound {
        /// The missing request.
        request_id: u64,
        /// The employee the request was scoped to.
        employee_id: u64,
    },

    /// The actor is not privileged enough for the operation.
    #[error("Actor {actor_id} has tier {actual} but at least {required} is required")]
    InsufficientPermission {
        /// The acting employee.
        actor_id: u64,
        /// The tier the operation requires.
        required: Tier,
        /// The tier the actor holds.
        actual: Tier,
    },

    /// A policy already exists for the company and year.
    #[error("A PTO policy already exists for company {company_id} in {year}")]
    PolicyConflict {
        /// The company.
        company_id: u64,
        /// The conflicting year.
        year: i32,
    },

    /// The date is not a worked day in the policy calendar.
    #[error("{date} is not a worked day")]
    NonWorkingDay {
        /// The requested date.
        date: NaiveDate,
    },

    /// The employee has no remaining leave capacity on the date.
    #[error("Employee {employee_id} is already fully booked on {date}")]
    DateFullyBooked {
        /// The employee.
        employee_id: u64,
        /// The requested date.
        date: NaiveDate,
    },

    /// Stored leave requests for the date already break the capacity rule.
    #[error("Integrity violation for employee {employee_id} on {date}: {message}")]
    IntegrityViolation {
        /// The employee.
        employee_id: u64,
        /// The affected date.
        date: NaiveDate,
        /// What was found.
        message: String,
    },

    /// The storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error for a field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the taxonomy category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::ActorNotFound { .. }
            | EngineError::EmployeeMismatch { .. }
            | EngineError::NoActivePolicy { .. }
            | EngineError::RequestNotFound { .. } => ErrorKind::NotFound,
            EngineError::InsufficientPermission { .. } => ErrorKind::Authorization,
            EngineError::PolicyConflict { .. } => ErrorKind::PolicyConflict,
            EngineError::NonWorkingDay { .. } | EngineError::DateFullyBooked { .. } => {
                ErrorKind::SchedulingConflict
            }
            EngineError::IntegrityViolation { .. } => ErrorKind::IntegrityViolation,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::Storage { .. } => ErrorKind::Infrastructure,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
