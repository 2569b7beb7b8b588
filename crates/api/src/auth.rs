// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use civic_pulse::Actor;
use civic_pulse_domain::{AdminId, CitizenId, OfficerId};
use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Each role maps onto one kind of lifecycle actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Citizens submit complaints, follow them and reply to clarifications.
    Citizen,
    /// Officers work the complaints assigned to them.
    Officer,
    /// Admins triage, assign and moderate every complaint.
    Admin,
}

impl Role {
    /// Returns the role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "Citizen",
            Self::Officer => "Officer",
            Self::Admin => "Admin",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "citizen" => Ok(Self::Citizen),
            "officer" => Ok(Self::Officer),
            "admin" => Ok(Self::Admin),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{s}'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The identifier of the citizen, officer or admin record.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The record identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into a lifecycle actor.
    #[must_use]
    pub const fn to_actor(self) -> Actor {
        match self.role {
            Role::Citizen => Actor::Citizen(CitizenId::new(self.id)),
            Role::Officer => Actor::Officer(OfficerId::new(self.id)),
            Role::Admin => Actor::Admin(AdminId::new(self.id)),
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require(
        actor: &AuthenticatedActor,
        action: &str,
        allowed: &[Role],
    ) -> Result<(), AuthError> {
        if allowed.contains(&actor.role) {
            return Ok(());
        }
        let required_role: String = allowed
            .iter()
            .copied()
            .map(Role::as_str)
            .collect::<Vec<&str>>()
            .join(" or ");
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role,
        })
    }

    /// Checks if an actor may perform an admin complaint operation.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The operation name, reported on failure
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_admin_action(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, action, &[Role::Admin])
    }

    /// Checks if an actor may perform an officer complaint operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Officer role.
    pub fn authorize_officer_action(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, action, &[Role::Officer])
    }

    /// Checks if an actor may perform a citizen complaint operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Citizen role.
    pub fn authorize_citizen_action(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, action, &[Role::Citizen])
    }

    /// Checks if an actor may view the derived officer workload listing.
    ///
    /// Both Admin and Officer actors may view it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a Citizen.
    pub fn authorize_view_workload(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require(actor, "officer_workload", &[Role::Admin, Role::Officer])
    }
}

/// Stub authentication standing in for the external identity provider.
///
/// Accepts any positive record identifier with the claimed role.
///
/// # Arguments
///
/// * `actor_id` - The claimed record identifier
/// * `role` - The claimed role
///
/// # Errors
///
/// Returns an error if the identifier is not positive.
pub fn authenticate_stub(actor_id: i64, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id <= 0 {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID must be a positive integer"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
