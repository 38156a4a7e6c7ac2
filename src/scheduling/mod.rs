//! Calendar generation and leave scheduling.
//!
//! This module contains the permission gate shared by every operation, the
//! yearly calendar generator, active policy resolution, policy creation, and
//! the leave scheduler enforcing per-day slot capacity.

mod calendar;
mod leave_scheduler;
mod permission;
mod policy_resolver;
mod policy_service;

pub use calendar::{
    CalendarGenerator, GeneratedCalendar, MAX_POLICY_YEAR, MIN_POLICY_YEAR, build_calendar,
    days_in_year, is_worked_day,
};
pub use leave_scheduler::{
    LeaveScheduler, ScheduleLeave, TIME_OFF_CREATED, TIME_OFF_DESTROYED, UnscheduleLeave,
    admit_leave,
};
pub use permission::{AuthorizationRequest, PermissionGate};
pub use policy_resolver::{Clock, FixedClock, LeavePolicyResolver, SystemClock};
pub use policy_service::{COMPANY_PTO_POLICY_CREATED, CreatePolicy, PolicyService};
