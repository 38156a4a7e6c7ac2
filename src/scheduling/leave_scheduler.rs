//! Scheduling and unscheduling of employee time off.
//!
//! An employee's leave on a single date is made of slots: either one full-day
//! request, or up to two half-day requests (possibly of different types).
//! A full day and a half day never coexist on the same date.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::audit::{self, AuditSink};
use crate::config::WorkforceConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Actor, AuditEvent, AuditScope, Employee, LeaveRequest, LeaveType, NewLeaveRequest, Tier,
};
use crate::storage::Store;

use super::permission::{AuthorizationRequest, PermissionGate};
use super::policy_resolver::{Clock, LeavePolicyResolver};

/// Audit action recorded when time off is scheduled.
pub const TIME_OFF_CREATED: &str = "time_off_created";
/// Audit action recorded when time off is removed.
pub const TIME_OFF_DESTROYED: &str = "time_off_destroyed";

/// A validated request to book time off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleLeave {
    /// The employee performing the operation.
    pub actor_id: u64,
    /// The company both employees belong to.
    pub company_id: u64,
    /// The employee taking time off.
    pub employee_id: u64,
    /// The day off.
    pub date: NaiveDate,
    /// The kind of time off.
    pub leave_type: LeaveType,
    /// Whole day (true) or half day (false).
    pub full: bool,
    /// Whether audit events are flagged as dummy data.
    pub is_dummy: bool,
}

/// A validated request to remove booked time off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnscheduleLeave {
    /// The employee performing the operation.
    pub actor_id: u64,
    /// The company both employees belong to.
    pub company_id: u64,
    /// The employee owning the leave request.
    pub employee_id: u64,
    /// The leave request to remove.
    pub request_id: u64,
    /// Whether audit events are flagged as dummy data.
    pub is_dummy: bool,
}

/// Decides whether a new slot fits next to the requests already booked.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use workforce_calendar::scheduling::admit_leave;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// assert!(admit_leave(&[], 1, date, true).is_ok());
/// ```
pub fn admit_leave(
    existing: &[LeaveRequest],
    employee_id: u64,
    date: NaiveDate,
    full: bool,
) -> EngineResult<()> {
    match existing {
        [] => Ok(()),
        [booked] if booked.full || full => Err(EngineError::DateFullyBooked { employee_id, date }),
        [_] => Ok(()),
        [first, second] if !first.full && !second.full => {
            Err(EngineError::DateFullyBooked { employee_id, date })
        }
        many => Err(EngineError::IntegrityViolation {
            employee_id,
            date,
            message: format!("{} leave requests already stored", many.len()),
        }),
    }
}

/// Books and removes time off for employees.
pub struct LeaveScheduler<S, A> {
    store: Arc<S>,
    audit: Arc<A>,
    clock: Arc<dyn Clock>,
    required_tier: Tier,
}

impl<S, A> LeaveScheduler<S, A>
where
    S: Store + 'static,
    A: AuditSink + 'static,
{
    /// Creates a scheduler requiring the configured leave-scheduling tier.
    pub fn new(
        store: Arc<S>,
        audit: Arc<A>,
        clock: Arc<dyn Clock>,
        config: &WorkforceConfig,
    ) -> Self {
        Self {
            store,
            audit,
            clock,
            required_tier: config.permissions().leave_scheduling,
        }
    }

    /// Books a leave slot for an employee.
    ///
    /// HR (or the configured tier) may book for anyone in the company; any
    /// employee may book for themselves.
    pub fn schedule(&self, command: ScheduleLeave) -> EngineResult<LeaveRequest> {
        let correlation_id = Uuid::new_v4();
        let result = self.try_schedule(&command, correlation_id);
        if let Err(err) = &result {
            self.log_rejection("schedule", command.employee_id, err, correlation_id);
        }
        result
    }

    fn try_schedule(
        &self,
        command: &ScheduleLeave,
        correlation_id: Uuid,
    ) -> EngineResult<LeaveRequest> {
        let employee = self.employee_in_company(command.company_id, command.employee_id)?;
        let actor = self.authorize(command.actor_id, command.company_id, employee.id)?;

        let resolver = LeavePolicyResolver::new(&*self.store, &*self.clock);
        let policy = resolver.current_policy_for(command.company_id)?;
        let worked = resolver
            .calendar_day(&policy, command.date)?
            .is_some_and(|day| day.is_worked);
        if !worked {
            return Err(EngineError::NonWorkingDay { date: command.date });
        }

        let new_request = NewLeaveRequest {
            employee_id: employee.id,
            date: command.date,
            leave_type: command.leave_type,
            full: command.full,
        };
        let admit = |existing: &[LeaveRequest]| {
            admit_leave(existing, employee.id, command.date, command.full)
        };
        let request = self.store.insert_leave_request(new_request, &admit)?;

        info!(
            correlation_id = %correlation_id,
            company_id = command.company_id,
            employee_id = employee.id,
            leave_request_id = request.id,
            date = %request.date,
            leave_type = %request.leave_type,
            full = request.full,
            "Time off scheduled"
        );

        let payload = json!({
            "planned_holiday_id": request.id,
            "planned_holiday_date": request.date,
        });
        self.publish(
            TIME_OFF_CREATED,
            &actor,
            &employee,
            payload,
            command.is_dummy,
            correlation_id,
        );

        Ok(request)
    }

    /// Removes a leave request belonging to an employee.
    pub fn unschedule(&self, command: UnscheduleLeave) -> EngineResult<()> {
        let correlation_id = Uuid::new_v4();
        let result = self.try_unschedule(&command, correlation_id);
        if let Err(err) = &result {
            self.log_rejection("unschedule", command.employee_id, err, correlation_id);
        }
        result
    }

    fn try_unschedule(&self, command: &UnscheduleLeave, correlation_id: Uuid) -> EngineResult<()> {
        let actor = self.authorize(command.actor_id, command.company_id, command.employee_id)?;
        let employee = self.employee_in_company(command.company_id, command.employee_id)?;

        let removed = self
            .store
            .delete_leave_request(employee.id, command.request_id)?
            .ok_or(EngineError::RequestNotFound {
                request_id: command.request_id,
                employee_id: employee.id,
            })?;

        info!(
            correlation_id = %correlation_id,
            company_id = command.company_id,
            employee_id = employee.id,
            leave_request_id = removed.id,
            date = %removed.date,
            "Time off unscheduled"
        );

        let payload = json!({ "planned_holiday_date": removed.date });
        self.publish(
            TIME_OFF_DESTROYED,
            &actor,
            &employee,
            payload,
            command.is_dummy,
            correlation_id,
        );

        Ok(())
    }

    fn employee_in_company(&self, company_id: u64, employee_id: u64) -> EngineResult<Employee> {
        self.store
            .find_employee(company_id, employee_id)?
            .ok_or(EngineError::EmployeeMismatch {
                employee_id,
                company_id,
            })
    }

    fn authorize(&self, actor_id: u64, company_id: u64, employee_id: u64) -> EngineResult<Actor> {
        let request = AuthorizationRequest::new(actor_id, company_id, self.required_tier)
            .bypass_for(employee_id);
        PermissionGate::new(&*self.store).authorize(request)
    }

    /// Emits one company-scoped and one employee-scoped event.
    fn publish(
        &self,
        action: &str,
        actor: &Actor,
        employee: &Employee,
        payload: serde_json::Value,
        is_dummy: bool,
        correlation_id: Uuid,
    ) {
        let events = vec![
            AuditEvent::new(
                AuditScope::Company,
                employee.company_id,
                action,
                actor,
                payload.clone(),
                is_dummy,
            ),
            AuditEvent::new(
                AuditScope::Employee,
                employee.id,
                action,
                actor,
                payload,
                is_dummy,
            ),
        ];
        audit::emit(&*self.audit, events, correlation_id);
    }

    fn log_rejection(
        &self,
        operation: &str,
        employee_id: u64,
        err: &EngineError,
        correlation_id: Uuid,
    ) {
        if let EngineError::IntegrityViolation { .. } = err {
            error!(
                correlation_id = %correlation_id,
                operation,
                employee_id,
                error = %err,
                "Leave data integrity violation"
            );
        } else {
            warn!(
                correlation_id = %correlation_id,
                operation,
                employee_id,
                error = %err,
                "Leave operation rejected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditSink;
    use crate::error::ErrorKind;
    use crate::scheduling::policy_resolver::FixedClock;
    use crate::scheduling::{CreatePolicy, PolicyService};
    use crate::storage::MemoryStore;

    struct Fixture {
        store: Arc<MemoryStore>,
        audit: Arc<MemoryAuditSink>,
        scheduler: LeaveScheduler<MemoryStore, MemoryAuditSink>,
        hr: Employee,
        employee: Employee,
        colleague: Employee,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-01-08 is a Monday
    fn monday() -> NaiveDate {
        date(2024, 1, 8)
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let audit = Arc::new(MemoryAuditSink::new());
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(date(2024, 1, 3)));
        let config = WorkforceConfig::default();

        let hr = store.add_employee(1, "Toby Flenderson", Tier::Hr).unwrap();
        let employee = store.add_employee(1, "Jim Halpert", Tier::User).unwrap();
        let colleague = store.add_employee(1, "Dwight Schrute", Tier::User).unwrap();

        let policies = PolicyService::new(store.clone(), audit.clone(), &config);
        policies
            .create_policy(CreatePolicy {
                actor_id: hr.id,
                company_id: 1,
                year: 2024,
                default_amount_of_allowed_holidays: 25,
                default_amount_of_sick_days: 5,
                default_amount_of_pto_days: 3,
                is_dummy: false,
            })
            .unwrap();

        let scheduler = LeaveScheduler::new(store.clone(), audit.clone(), clock, &config);
        Fixture {
            store,
            audit,
            scheduler,
            hr,
            employee,
            colleague,
        }
    }

    fn command(actor: &Employee, employee: &Employee, on: NaiveDate, full: bool) -> ScheduleLeave {
        ScheduleLeave {
            actor_id: actor.id,
            company_id: 1,
            employee_id: employee.id,
            date: on,
            leave_type: LeaveType::Holiday,
            full,
            is_dummy: false,
        }
    }

    fn booked(existing_full: &[bool]) -> Vec<LeaveRequest> {
        existing_full
            .iter()
            .enumerate()
            .map(|(index, full)| LeaveRequest {
                id: index as u64 + 1,
                employee_id: 1,
                date: monday(),
                leave_type: LeaveType::Pto,
                full: *full,
            })
            .collect()
    }

    #[test]
    fn test_admit_leave_rules() {
        let on = monday();
        assert!(admit_leave(&booked(&[]), 1, on, true).is_ok());
        assert!(admit_leave(&booked(&[]), 1, on, false).is_ok());
        assert!(admit_leave(&booked(&[false]), 1, on, false).is_ok());
        assert!(matches!(
            admit_leave(&booked(&[false]), 1, on, true),
            Err(EngineError::DateFullyBooked { .. })
        ));
        assert!(matches!(
            admit_leave(&booked(&[true]), 1, on, false),
            Err(EngineError::DateFullyBooked { .. })
        ));
        assert!(matches!(
            admit_leave(&booked(&[true]), 1, on, true),
            Err(EngineError::DateFullyBooked { .. })
        ));
        assert!(matches!(
            admit_leave(&booked(&[false, false]), 1, on, false),
            Err(EngineError::DateFullyBooked { .. })
        ));
        assert!(matches!(
            admit_leave(&booked(&[false, false]), 1, on, true),
            Err(EngineError::DateFullyBooked { .. })
        ));
    }

    #[test]
    fn test_admit_leave_flags_impossible_states() {
        let on = monday();
        assert!(matches!(
            admit_leave(&booked(&[true, false]), 1, on, false),
            Err(EngineError::IntegrityViolation { .. })
        ));
        assert!(matches!(
            admit_leave(&booked(&[true, true]), 1, on, true),
            Err(EngineError::IntegrityViolation { .. })
        ));
        assert!(matches!(
            admit_leave(&booked(&[false, false, false]), 1, on, false),
            Err(EngineError::IntegrityViolation { .. })
        ));
    }

    #[test]
    fn test_employee_can_schedule_for_themselves() {
        let f = fixture();
        let request = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, monday(), true))
            .unwrap();

        assert_eq!(request.employee_id, f.employee.id);
        assert_eq!(request.date, monday());
        assert!(request.full);
    }

    #[test]
    fn test_hr_can_schedule_for_employee() {
        let f = fixture();
        assert!(
            f.scheduler
                .schedule(command(&f.hr, &f.employee, monday(), false))
                .is_ok()
        );
    }

    #[test]
    fn test_colleague_cannot_schedule_for_employee() {
        let f = fixture();
        let result = f
            .scheduler
            .schedule(command(&f.colleague, &f.employee, monday(), true));
        assert!(matches!(
            result,
            Err(EngineError::InsufficientPermission { .. })
        ));
        assert!(f.store.leave_requests_on(f.employee.id, monday()).unwrap().is_empty());
    }

    #[test]
    fn test_employee_from_other_company_is_rejected() {
        let f = fixture();
        let outsider = f.store.add_employee(2, "David Wallace", Tier::User).unwrap();
        let result = f
            .scheduler
            .schedule(command(&f.hr, &outsider, monday(), true));
        assert!(matches!(result, Err(EngineError::EmployeeMismatch { .. })));
    }

    #[test]
    fn test_weekend_is_rejected_for_every_tier() {
        let f = fixture();
        let saturday = date(2024, 1, 6);
        let admin = f.store.add_employee(1, "Michael Scott", Tier::Administrator).unwrap();

        for actor in [&f.employee, &f.hr, &admin] {
            let result = f.scheduler.schedule(command(actor, &f.employee, saturday, false));
            assert!(matches!(result, Err(EngineError::NonWorkingDay { .. })));
        }
    }

    #[test]
    fn test_date_outside_policy_year_is_rejected() {
        let f = fixture();
        let result = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, date(2025, 1, 6), true));
        assert!(matches!(result, Err(EngineError::NonWorkingDay { .. })));
    }

    #[test]
    fn test_no_active_policy() {
        let f = fixture();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(date(2025, 3, 3)));
        let scheduler = LeaveScheduler::new(
            f.store.clone(),
            f.audit.clone(),
            clock,
            &WorkforceConfig::default(),
        );
        let result = scheduler.schedule(command(&f.employee, &f.employee, monday(), true));
        assert!(matches!(result, Err(EngineError::NoActivePolicy { .. })));
    }

    #[test]
    fn test_full_then_half_is_rejected() {
        let f = fixture();
        f.scheduler
            .schedule(command(&f.employee, &f.employee, monday(), true))
            .unwrap();
        let result = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, monday(), false));
        assert!(matches!(result, Err(EngineError::DateFullyBooked { .. })));
    }

    #[test]
    fn test_two_halves_then_third_is_rejected() {
        let f = fixture();
        let mut second = command(&f.employee, &f.employee, monday(), false);
        second.leave_type = LeaveType::Sick;

        f.scheduler
            .schedule(command(&f.employee, &f.employee, monday(), false))
            .unwrap();
        f.scheduler.schedule(second).unwrap();
        let third = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, monday(), false));

        assert!(matches!(third, Err(EngineError::DateFullyBooked { .. })));
        assert_eq!(f.store.leave_requests_on(f.employee.id, monday()).unwrap().len(), 2);
    }

    #[test]
    fn test_corrupted_date_reports_integrity_violation() {
        let f = fixture();
        let allow = |_: &[LeaveRequest]| -> EngineResult<()> { Ok(()) };
        for _ in 0..3 {
            f.store
                .insert_leave_request(
                    NewLeaveRequest {
                        employee_id: f.employee.id,
                        date: monday(),
                        leave_type: LeaveType::Holiday,
                        full: false,
                    },
                    &allow,
                )
                .unwrap();
        }

        let err = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, monday(), false))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IntegrityViolation);
    }

    #[test]
    fn test_unschedule_frees_a_half_slot() {
        let f = fixture();
        let first = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, monday(), false))
            .unwrap();
        f.scheduler
            .schedule(command(&f.employee, &f.employee, monday(), false))
            .unwrap();

        f.scheduler
            .unschedule(UnscheduleLeave {
                actor_id: f.employee.id,
                company_id: 1,
                employee_id: f.employee.id,
                request_id: first.id,
                is_dummy: false,
            })
            .unwrap();

        assert!(
            f.scheduler
                .schedule(command(&f.employee, &f.employee, monday(), false))
                .is_ok()
        );
    }

    #[test]
    fn test_unschedule_unknown_request() {
        let f = fixture();
        let result = f.scheduler.unschedule(UnscheduleLeave {
            actor_id: f.hr.id,
            company_id: 1,
            employee_id: f.employee.id,
            request_id: 404,
            is_dummy: false,
        });
        assert!(matches!(
            result,
            Err(EngineError::RequestNotFound {
                request_id: 404,
                ..
            })
        ));
    }

    #[test]
    fn test_unschedule_cannot_remove_someone_elses_request() {
        let f = fixture();
        let request = f
            .scheduler
            .schedule(command(&f.colleague, &f.colleague, monday(), true))
            .unwrap();

        let result = f.scheduler.unschedule(UnscheduleLeave {
            actor_id: f.employee.id,
            company_id: 1,
            employee_id: f.employee.id,
            request_id: request.id,
            is_dummy: false,
        });
        assert!(matches!(result, Err(EngineError::RequestNotFound { .. })));
        assert_eq!(f.store.leave_requests_on(f.colleague.id, monday()).unwrap().len(), 1);
    }

    #[test]
    fn test_colleague_cannot_unschedule_for_employee() {
        let f = fixture();
        let request = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, monday(), true))
            .unwrap();

        let result = f.scheduler.unschedule(UnscheduleLeave {
            actor_id: f.colleague.id,
            company_id: 1,
            employee_id: f.employee.id,
            request_id: request.id,
            is_dummy: false,
        });
        assert!(matches!(
            result,
            Err(EngineError::InsufficientPermission {
                required: Tier::Hr,
                actual: Tier::User,
                ..
            })
        ));
        assert_eq!(f.store.leave_requests_on(f.employee.id, monday()).unwrap(), vec![request]);
    }

    #[test]
    fn test_unschedule_for_employee_of_other_company_is_rejected() {
        let f = fixture();
        let outsider = f.store.add_employee(2, "David Wallace", Tier::User).unwrap();

        let result = f.scheduler.unschedule(UnscheduleLeave {
            actor_id: f.hr.id,
            company_id: 1,
            employee_id: outsider.id,
            request_id: 1,
            is_dummy: false,
        });
        assert!(matches!(
            result,
            Err(EngineError::EmployeeMismatch { company_id: 1, .. })
        ));
    }

    #[test]
    fn test_schedule_emits_company_and_employee_events() {
        let f = fixture();
        let before = f.audit.events().len();
        let request = f
            .scheduler
            .schedule(command(&f.hr, &f.employee, monday(), true))
            .unwrap();

        let events = f.audit.events();
        let emitted = &events[before..];
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].scope, AuditScope::Company);
        assert_eq!(emitted[0].scope_id, 1);
        assert_eq!(emitted[1].scope, AuditScope::Employee);
        assert_eq!(emitted[1].scope_id, f.employee.id);
        for event in emitted {
            assert_eq!(event.action, TIME_OFF_CREATED);
            assert_eq!(event.actor_id, f.hr.id);
            assert_eq!(event.actor_name, "Toby Flenderson");
            assert_eq!(event.payload["planned_holiday_id"], request.id);
            assert_eq!(event.payload["planned_holiday_date"], "2024-01-08");
        }
    }

    #[test]
    fn test_failed_schedule_emits_nothing() {
        let f = fixture();
        let before = f.audit.events().len();
        let _ = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, date(2024, 1, 7), true));
        assert_eq!(f.audit.events().len(), before);
    }

    #[test]
    fn test_unschedule_emits_destroyed_events() {
        let f = fixture();
        let request = f
            .scheduler
            .schedule(command(&f.employee, &f.employee, monday(), true))
            .unwrap();
        let before = f.audit.events().len();

        f.scheduler
            .unschedule(UnscheduleLeave {
                actor_id: f.employee.id,
                company_id: 1,
                employee_id: f.employee.id,
                request_id: request.id,
                is_dummy: true,
            })
            .unwrap();

        let events = f.audit.events();
        let emitted = &events[before..];
        assert_eq!(emitted.len(), 2);
        assert!(emitted.iter().all(|e| e.action == TIME_OFF_DESTROYED && e.is_dummy));
    }
}
