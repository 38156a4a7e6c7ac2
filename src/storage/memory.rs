//! In-memory [`Store`] implementation.
//!
//! All state lives behind one mutex, so every trait method is a serialized
//! transaction. The uniqueness rules a relational backend would express as
//! constraints are checked inside that critical section.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalendarDay, Employee, LeaveRequest, NewLeaveRequest, NewPolicy, Policy, Tier,
};

use super::{AdmissionRule, Store};

#[derive(Debug, Default)]
struct State {
    next_employee_id: u64,
    next_policy_id: u64,
    next_request_id: u64,
    employees: HashMap<u64, Employee>,
    /// Keyed on (company_id, year): at most one policy per key.
    policies: HashMap<(u64, i32), Policy>,
    calendars: HashMap<u64, BTreeMap<NaiveDate, CalendarDay>>,
    /// Keyed on (employee_id, date).
    leave_requests: HashMap<(u64, NaiveDate), Vec<LeaveRequest>>,
}

/// A thread-safe store held entirely in memory.
///
/// # Example
///
/// ```
/// use workforce_calendar::models::Tier;
/// use workforce_calendar::storage::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// let hr = store.add_employee(1, "Holly Flax", Tier::Hr).unwrap();
/// assert!(store.find_employee(1, hr.id).unwrap().is_some());
/// assert!(store.find_employee(2, hr.id).unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee to a company and returns it.
    pub fn add_employee(
        &self,
        company_id: u64,
        name: impl Into<String>,
        tier: Tier,
    ) -> EngineResult<Employee> {
        let mut state = self.lock()?;
        state.next_employee_id += 1;
        let employee = Employee {
            id: state.next_employee_id,
            company_id,
            name: name.into(),
            tier,
        };
        state.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| EngineError::Storage {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl Store for MemoryStore {
    fn find_employee(&self, company_id: u64, employee_id: u64) -> EngineResult<Option<Employee>> {
        let state = self.lock()?;
        Ok(state
            .employees
            .get(&employee_id)
            .filter(|employee| employee.company_id == company_id)
            .cloned())
    }

    fn find_policy(&self, company_id: u64, year: i32) -> EngineResult<Option<Policy>> {
        let state = self.lock()?;
        Ok(state.policies.get(&(company_id, year)).cloned())
    }

    fn insert_policy(&self, policy: NewPolicy, days: Vec<CalendarDay>) -> EngineResult<Policy> {
        let mut state = self.lock()?;
        let key = (policy.company_id, policy.year);
        if state.policies.contains_key(&key) {
            return Err(EngineError::PolicyConflict {
                company_id: policy.company_id,
                year: policy.year,
            });
        }

        state.next_policy_id += 1;
        let policy = policy.into_policy(state.next_policy_id);
        let calendar = days.into_iter().map(|day| (day.date, day)).collect();
        state.calendars.insert(policy.id, calendar);
        state.policies.insert(key, policy.clone());
        Ok(policy)
    }

    fn calendar_day(&self, policy_id: u64, date: NaiveDate) -> EngineResult<Option<CalendarDay>> {
        let state = self.lock()?;
        Ok(state
            .calendars
            .get(&policy_id)
            .and_then(|calendar| calendar.get(&date))
            .copied())
    }

    fn calendar_len(&self, policy_id: u64) -> EngineResult<usize> {
        let state = self.lock()?;
        Ok(state.calendars.get(&policy_id).map_or(0, BTreeMap::len))
    }

    fn leave_requests_on(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> EngineResult<Vec<LeaveRequest>> {
        let state = self.lock()?;
        Ok(state
            .leave_requests
            .get(&(employee_id, date))
            .cloned()
            .unwrap_or_default())
    }

    fn insert_leave_request(
        &self,
        request: NewLeaveRequest,
        admit: AdmissionRule<'_>,
    ) -> EngineResult<LeaveRequest> {
        let mut state = self.lock()?;
        let key = (request.employee_id, request.date);
        if let Some(existing) = state.leave_requests.get(&key) {
            admit(existing)?;
        } else {
            admit(&[])?;
        }

        state.next_request_id += 1;
        let stored = request.into_request(state.next_request_id);
        state
            .leave_requests
            .entry(key)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    fn delete_leave_request(
        &self,
        employee_id: u64,
        request_id: u64,
    ) -> EngineResult<Option<LeaveRequest>> {
        let mut state = self.lock()?;
        let key = state
            .leave_requests
            .iter()
            .find(|((owner, _), requests)| {
                *owner == employee_id && requests.iter().any(|r| r.id == request_id)
            })
            .map(|(key, _)| *key);

        let Some(key) = key else {
            return Ok(None);
        };

        let requests = state.leave_requests.entry(key).or_default();
        let position = requests.iter().position(|r| r.id == request_id);
        let removed = position.map(|index| requests.remove(index));
        if requests.is_empty() {
            state.leave_requests.remove(&key);
        }
        Ok(removed)
    }
}
