//! Storage abstraction for policies, calendars, employees and leave requests.
//!
//! The [`Store`] trait is the seam between the scheduling core and the
//! relational store. Its mutating operations are atomic units: implementations
//! must enforce the (company, year) policy uniqueness and serialize leave
//! admission per (employee, date) themselves, so callers never rely on a
//! separate existence check followed by an insert.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{CalendarDay, Employee, LeaveRequest, NewLeaveRequest, NewPolicy, Policy};

/// Admission rule evaluated against the requests already stored for an
/// (employee, date) pair, inside the store's critical section.
pub type AdmissionRule<'a> = &'a dyn Fn(&[LeaveRequest]) -> EngineResult<()>;

/// Storage operations used by the scheduling core.
pub trait Store: Send + Sync {
    /// Finds an employee by id, scoped to a company.
    fn find_employee(&self, company_id: u64, employee_id: u64) -> EngineResult<Option<Employee>>;

    /// Finds the policy for a company and year.
    fn find_policy(&self, company_id: u64, year: i32) -> EngineResult<Option<Policy>>;

    /// Stores a policy together with its calendar as one unit.
    ///
    /// Fails with `PolicyConflict` if a policy already exists for the
    /// company and year; in that case nothing is written.
    fn insert_policy(&self, policy: NewPolicy, days: Vec<CalendarDay>) -> EngineResult<Policy>;

    /// Returns the calendar day of a policy for a date, if it is in the calendar.
    fn calendar_day(&self, policy_id: u64, date: NaiveDate) -> EngineResult<Option<CalendarDay>>;

    /// Returns the number of calendar days stored for a policy.
    fn calendar_len(&self, policy_id: u64) -> EngineResult<usize>;

    /// Returns the leave requests an employee has on a date.
    fn leave_requests_on(&self, employee_id: u64, date: NaiveDate)
    -> EngineResult<Vec<LeaveRequest>>;

    /// Stores a leave request if `admit` accepts the requests already stored
    /// for the same employee and date.
    ///
    /// `admit` and the insert run under a lock keyed on (employee, date).
    fn insert_leave_request(
        &self,
        request: NewLeaveRequest,
        admit: AdmissionRule<'_>,
    ) -> EngineResult<LeaveRequest>;

    /// Removes a leave request belonging to an employee, returning it.
    ///
    /// Returns `None` if no such request exists for that employee.
    fn delete_leave_request(
        &self,
        employee_id: u64,
        request_id: u64,
    ) -> EngineResult<Option<LeaveRequest>>;
}
