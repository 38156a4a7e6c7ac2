//! Core data models for the workforce calendar engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit_event;
mod employee;
mod leave_request;
mod policy;

pub use audit_event::{AuditEvent, AuditScope};
pub use employee::{Actor, Employee, Tier};
pub use leave_request::{LeaveRequest, LeaveType, NewLeaveRequest};
pub use policy::{CalendarDay, NewPolicy, Policy};
