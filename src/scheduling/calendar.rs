//! Yearly working-day calendar generation.
//!
//! A policy's calendar holds one entry per day of its year. Days falling on a
//! configured non-working weekday (Saturday and Sunday by default) are marked
//! as not worked; every other day is worked.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::CalendarDay;
use crate::storage::Store;

/// Earliest year accepted for a policy calendar.
pub const MIN_POLICY_YEAR: i32 = 1000;
/// Latest year accepted for a policy calendar.
pub const MAX_POLICY_YEAR: i32 = 9999;

/// The calendar produced for one policy year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCalendar {
    /// The year the calendar covers.
    pub year: i32,
    /// Every day from January 1st to December 31st, in order.
    pub days: Vec<CalendarDay>,
    /// How many days are marked as not worked.
    pub non_worked_days: u32,
    /// `days.len() - non_worked_days`.
    pub total_worked_days: u32,
}

/// Returns the number of days in `year` under the Gregorian leap-year rule.
///
/// # Example
///
/// ```
/// use workforce_calendar::scheduling::days_in_year;
///
/// assert_eq!(days_in_year(2023), 365);
/// assert_eq!(days_in_year(2024), 366);
/// assert_eq!(days_in_year(1900), 365);
/// assert_eq!(days_in_year(2000), 366);
/// ```
pub fn days_in_year(year: i32) -> u32 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    if leap { 366 } else { 365 }
}

/// Returns true if `date` is a worked day given the non-working weekdays.
pub fn is_worked_day(date: NaiveDate, non_working_weekdays: &[Weekday]) -> bool {
    !non_working_weekdays.contains(&date.weekday())
}

/// Builds the full calendar for `year` without touching storage.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use workforce_calendar::scheduling::build_calendar;
///
/// let calendar = build_calendar(2024, &[Weekday::Sat, Weekday::Sun]).unwrap();
/// assert_eq!(calendar.days.len(), 366);
/// assert_eq!(calendar.non_worked_days, 104);
/// assert_eq!(calendar.total_worked_days, 262);
/// ```
pub fn build_calendar(
    year: i32,
    non_working_weekdays: &[Weekday],
) -> EngineResult<GeneratedCalendar> {
    if !(MIN_POLICY_YEAR..=MAX_POLICY_YEAR).contains(&year) {
        return Err(EngineError::validation(
            "year",
            format!("{year} is not a 4-digit year"),
        ));
    }

    let first_day = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| EngineError::validation("year", format!("{year} is out of range")))?;

    let days: Vec<CalendarDay> = first_day
        .iter_days()
        .take_while(|date| date.year() == year)
        .map(|date| CalendarDay {
            date,
            day_of_week: date.weekday().num_days_from_sunday(),
            day_of_year: date.ordinal(),
            is_worked: is_worked_day(date, non_working_weekdays),
        })
        .collect();

    let non_worked_days = days.iter().filter(|day| !day.is_worked).count() as u32;
    let total_worked_days = days_in_year(year) - non_worked_days;

    Ok(GeneratedCalendar {
        year,
        days,
        non_worked_days,
        total_worked_days,
    })
}

/// Generates calendars for companies that do not yet have a policy for the year.
pub struct CalendarGenerator<'a> {
    store: &'a dyn Store,
    non_working_weekdays: &'a [Weekday],
}

impl<'a> CalendarGenerator<'a> {
    /// Creates a generator checking existing policies in `store`.
    pub fn new(store: &'a dyn Store, non_working_weekdays: &'a [Weekday]) -> Self {
        Self {
            store,
            non_working_weekdays,
        }
    }

    /// Generates the calendar for `company_id` and `year`.
    ///
    /// Fails with `PolicyConflict` before producing any day if the company
    /// already has a policy for the year. This check alone is not race-free;
    /// the store enforces uniqueness again when the policy is inserted.
    pub fn generate(&self, company_id: u64, year: i32) -> EngineResult<GeneratedCalendar> {
        if self.store.find_policy(company_id, year)?.is_some() {
            return Err(EngineError::PolicyConflict { company_id, year });
        }
        build_calendar(year, self.non_working_weekdays)
    }
}
