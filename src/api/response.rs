//! Error responses returned to callers.
//!
//! Maps [`EngineError`] onto stable error codes. Integrity violations and
//! infrastructure failures are reported with a generic message; their details
//! only go to the logs.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};

const GENERIC_MESSAGE: &str = "An internal error occurred";

/// Error response structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl From<&EngineError> for ApiError {
    fn from(error: &EngineError) -> Self {
        match error {
            EngineError::Validation { field, message } => ApiError::with_details(
                "VALIDATION_ERROR",
                error.to_string(),
                format!("Field '{field}': {message}"),
            ),
            EngineError::NonWorkingDay { .. } => {
                ApiError::new("NON_WORKING_DAY", error.to_string())
            }
            EngineError::DateFullyBooked { .. } => {
                ApiError::new("DATE_FULLY_BOOKED", error.to_string())
            }
            _ => match error.kind() {
                ErrorKind::NotFound => ApiError::new("NOT_FOUND", error.to_string()),
                ErrorKind::Authorization => {
                    ApiError::new("INSUFFICIENT_PERMISSION", error.to_string())
                }
                ErrorKind::PolicyConflict => ApiError::new("POLICY_CONFLICT", error.to_string()),
                ErrorKind::IntegrityViolation => {
                    ApiError::new("INTEGRITY_VIOLATION", GENERIC_MESSAGE)
                }
                ErrorKind::Validation
                | ErrorKind::SchedulingConflict
                | ErrorKind::Infrastructure => ApiError::new("INTERNAL_ERROR", GENERIC_MESSAGE),
            },
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        ApiError::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_validation_error_has_details() {
        let error: ApiError = EngineError::validation("date", "bad format").into();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.as_deref(), Some("Field 'date': bad format"));
    }

    #[test]
    fn test_scheduling_conflicts_have_distinct_codes() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let non_working: ApiError = EngineError::NonWorkingDay { date }.into();
        let booked: ApiError = EngineError::DateFullyBooked {
            employee_id: 1,
            date,
        }
        .into();
        assert_eq!(non_working.code, "NON_WORKING_DAY");
        assert_eq!(booked.code, "DATE_FULLY_BOOKED");
    }

    #[test]
    fn test_permission_and_not_found_codes() {
        let denied: ApiError = EngineError::InsufficientPermission {
            actor_id: 1,
            required: Tier::Hr,
            actual: Tier::User,
        }
        .into();
        let missing: ApiError = EngineError::RequestNotFound {
            request_id: 3,
            employee_id: 1,
        }
        .into();
        assert_eq!(denied.code, "INSUFFICIENT_PERMISSION");
        assert_eq!(missing.code, "NOT_FOUND");
    }

    #[test]
    fn test_integrity_violation_is_generic() {
        let error: ApiError = EngineError::IntegrityViolation {
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            message: "3 leave requests already stored".to_string(),
        }
        .into();
        assert_eq!(error.code, "INTEGRITY_VIOLATION");
        assert_eq!(error.message, GENERIC_MESSAGE);
        assert!(error.details.is_none());
    }

    #[test]
    fn test_storage_error_is_generic() {
        let error: ApiError = EngineError::Storage {
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(error.code, "INTERNAL_ERROR");
        assert!(!error.message.contains("connection"));
    }
}
