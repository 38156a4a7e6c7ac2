//! Caller-facing request and response types.
//!
//! Transport is left to the embedding application; this module validates
//! inbound payloads and shapes error responses.

mod request;
mod response;

pub use request::{CreatePolicyRequest, ScheduleLeaveRequest, UnscheduleLeaveRequest};
pub use response::ApiError;
