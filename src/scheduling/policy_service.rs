//! PTO policy creation.
//!
//! Creating a policy generates its calendar and stores both in one atomic
//! unit. A company has at most one policy per year.

use std::sync::Arc;

use chrono::Weekday;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::{self, AuditSink};
use crate::config::WorkforceConfig;
use crate::error::EngineResult;
use crate::models::{AuditEvent, AuditScope, NewPolicy, Policy, Tier};
use crate::storage::Store;

use super::calendar::CalendarGenerator;
use super::permission::{AuthorizationRequest, PermissionGate};

/// Audit action recorded when a policy is created.
pub const COMPANY_PTO_POLICY_CREATED: &str = "company_pto_policy_created";

/// A validated request to create a PTO policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatePolicy {
    /// The employee performing the operation.
    pub actor_id: u64,
    /// The company the policy belongs to.
    pub company_id: u64,
    /// The calendar year of the policy.
    pub year: i32,
    /// Default holidays granted to each employee.
    pub default_amount_of_allowed_holidays: u32,
    /// Default sick days granted to each employee.
    pub default_amount_of_sick_days: u32,
    /// Default PTO days granted to each employee.
    pub default_amount_of_pto_days: u32,
    /// Whether the policy is dummy data.
    pub is_dummy: bool,
}

/// Creates PTO policies and their calendars.
pub struct PolicyService<S, A> {
    store: Arc<S>,
    audit: Arc<A>,
    required_tier: Tier,
    non_working_weekdays: Vec<Weekday>,
}

impl<S, A> PolicyService<S, A>
where
    S: Store + 'static,
    A: AuditSink + 'static,
{
    /// Creates a service using the configured tier and non-working weekdays.
    pub fn new(store: Arc<S>, audit: Arc<A>, config: &WorkforceConfig) -> Self {
        Self {
            store,
            audit,
            required_tier: config.permissions().policy_creation,
            non_working_weekdays: config.calendar().non_working_weekdays.clone(),
        }
    }

    /// Creates the policy for `command.year` together with its calendar.
    ///
    /// Fails with `PolicyConflict` if the company already has a policy for
    /// that year, including when a concurrent call wins the race.
    pub fn create_policy(&self, command: CreatePolicy) -> EngineResult<Policy> {
        let correlation_id = Uuid::new_v4();
        let result = self.try_create_policy(&command, correlation_id);
        if let Err(err) = &result {
            warn!(
                correlation_id = %correlation_id,
                company_id = command.company_id,
                year = command.year,
                error = %err,
                "Policy creation rejected"
            );
        }
        result
    }

    fn try_create_policy(
        &self,
        command: &CreatePolicy,
        correlation_id: Uuid,
    ) -> EngineResult<Policy> {
        let request =
            AuthorizationRequest::new(command.actor_id, command.company_id, self.required_tier);
        let actor = PermissionGate::new(&*self.store).authorize(request)?;

        let calendar = CalendarGenerator::new(&*self.store, &self.non_working_weekdays)
            .generate(command.company_id, command.year)?;

        let new_policy = NewPolicy {
            company_id: command.company_id,
            year: command.year,
            total_worked_days: calendar.total_worked_days,
            default_amount_of_allowed_holidays: command.default_amount_of_allowed_holidays,
            default_amount_of_sick_days: command.default_amount_of_sick_days,
            default_amount_of_pto_days: command.default_amount_of_pto_days,
            is_dummy: command.is_dummy,
        };
        let policy = self.store.insert_policy(new_policy, calendar.days)?;

        info!(
            correlation_id = %correlation_id,
            company_id = policy.company_id,
            policy_id = policy.id,
            year = policy.year,
            total_worked_days = policy.total_worked_days,
            "PTO policy created"
        );

        let event = AuditEvent::new(
            AuditScope::Company,
            policy.company_id,
            COMPANY_PTO_POLICY_CREATED,
            &actor,
            json!({
                "company_pto_policy_id": policy.id,
                "company_pto_policy_year": policy.year,
            }),
            command.is_dummy,
        );
        audit::emit(&*self.audit, vec![event], correlation_id);

        Ok(policy)
    }
}
