//! Tier-based authorization shared by every gated operation.

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{Actor, Tier};
use crate::storage::Store;

/// An immutable description of what an actor wants to be authorized for.
///
/// # Example
///
/// ```
/// use workforce_calendar::models::Tier;
/// use workforce_calendar::scheduling::AuthorizationRequest;
///
/// let request = AuthorizationRequest::as_at_least_hr(4, 1).bypass_for(4);
/// assert_eq!(request.required_tier, Tier::Hr);
/// assert!(request.is_bypassed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// The acting employee.
    pub actor_id: u64,
    /// The company the action runs in.
    pub company_id: u64,
    /// The least privileged tier allowed to act.
    pub required_tier: Tier,
    /// Employee for whom the tier requirement is waived when they act on
    /// their own behalf.
    pub bypass_if_actor_equals: Option<u64>,
}

impl AuthorizationRequest {
    /// Creates a request requiring `required_tier`.
    pub fn new(actor_id: u64, company_id: u64, required_tier: Tier) -> Self {
        Self {
            actor_id,
            company_id,
            required_tier,
            bypass_if_actor_equals: None,
        }
    }

    /// Requires administrator privileges.
    pub fn as_at_least_administrator(actor_id: u64, company_id: u64) -> Self {
        Self::new(actor_id, company_id, Tier::Administrator)
    }

    /// Requires HR privileges.
    pub fn as_at_least_hr(actor_id: u64, company_id: u64) -> Self {
        Self::new(actor_id, company_id, Tier::Hr)
    }

    /// Any employee of the company may act.
    pub fn as_normal_user(actor_id: u64, company_id: u64) -> Self {
        Self::new(actor_id, company_id, Tier::User)
    }

    /// Waives the tier requirement when the actor is `employee_id`.
    pub fn bypass_for(self, employee_id: u64) -> Self {
        Self {
            bypass_if_actor_equals: Some(employee_id),
            ..self
        }
    }

    /// Returns true if the actor is acting on their own behalf.
    pub fn is_bypassed(&self) -> bool {
        self.bypass_if_actor_equals == Some(self.actor_id)
    }
}

/// Evaluates authorization requests against stored employees.
pub struct PermissionGate<'a> {
    store: &'a dyn Store,
}

impl<'a> PermissionGate<'a> {
    /// Creates a gate reading actors from `store`.
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Authorizes the request, returning the acting employee.
    ///
    /// Fails with `ActorNotFound` if the actor is not part of the company,
    /// and with `InsufficientPermission` if the actor's tier is less
    /// privileged than required and no bypass applies.
    pub fn authorize(&self, request: AuthorizationRequest) -> EngineResult<Actor> {
        let actor = self
            .store
            .find_employee(request.company_id, request.actor_id)?
            .ok_or(EngineError::ActorNotFound {
                actor_id: request.actor_id,
                company_id: request.company_id,
            })?;

        if request.is_bypassed() || actor.tier.is_at_least(request.required_tier) {
            return Ok(actor);
        }

        warn!(
            actor_id = actor.id,
            company_id = request.company_id,
            tier = %actor.tier,
            required = %request.required_tier,
            "Permission denied"
        );
        Err(EngineError::InsufficientPermission {
            actor_id: actor.id,
            required: request.required_tier,
            actual: actor.tier,
        })
    }
}
