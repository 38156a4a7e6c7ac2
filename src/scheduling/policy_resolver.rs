//! Active policy lookup.

use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarDay, Policy};
use crate::storage::Store;

/// Source of the current date.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Clock reading the system time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(
    /// The date returned by every call.
    pub NaiveDate,
);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Resolves the policy in force for a company.
pub struct LeavePolicyResolver<'a> {
    store: &'a dyn Store,
    clock: &'a dyn Clock,
}

impl<'a> LeavePolicyResolver<'a> {
    /// Creates a resolver over `store`, using `clock` to decide the current year.
    pub fn new(store: &'a dyn Store, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Returns the policy whose year is the current year.
    pub fn current_policy_for(&self, company_id: u64) -> EngineResult<Policy> {
        let year = self.clock.today().year();
        self.store
            .find_policy(company_id, year)?
            .ok_or(EngineError::NoActivePolicy { company_id, year })
    }

    /// Returns the policy's calendar entry for `date`, if the date is in its year.
    pub fn calendar_day(
        &self,
        policy: &Policy,
        date: NaiveDate,
    ) -> EngineResult<Option<CalendarDay>> {
        self.store.calendar_day(policy.id, date)
    }
}
