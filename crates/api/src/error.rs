// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use civic_pulse::CoreError;
use civic_pulse_domain::DomainError;
use civic_pulse_persistence::{PersistenceError, StorageError};

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor's role may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor has the right role but does not own the complaint.
    AccessDenied {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::AccessDenied { message } => write!(f, "Access denied: {message}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::ComplaintNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Complaint"),
            message: format!("Complaint {id} does not exist"),
        },
        DomainError::OfficerNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Officer"),
            message: format!("Officer {id} does not exist"),
        },
        DomainError::CitizenNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Citizen"),
            message: format!("Citizen {id} does not exist"),
        },
        DomainError::AccessDenied { .. } => ApiError::AccessDenied { message },
        DomainError::InvalidTransition { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::DepartmentMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("department_match"),
            message,
        },
        DomainError::OfficerUnavailable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("officer_available"),
            message,
        },
        DomainError::EmptyFile
        | DomainError::InvalidFileType { .. }
        | DomainError::FileTooLarge { .. } => ApiError::InvalidInput {
            field: String::from("file"),
            message,
        },
        DomainError::ComplaintDeleted(_) => ApiError::DomainRuleViolation {
            rule: String::from("complaint_not_deleted"),
            message,
        },
        DomainError::InvalidDate { .. } => ApiError::InvalidInput {
            field: String::from("expected_date"),
            message,
        },
        DomainError::InvalidComplaint(msg) => ApiError::InvalidInput {
            field: String::from("complaint"),
            message: msg,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ActorNotPermitted { .. } => ApiError::AccessDenied {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ComplaintNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Complaint"),
            message: format!("Complaint {id} does not exist"),
        },
        PersistenceError::OfficerNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Officer"),
            message: format!("Officer {id} does not exist"),
        },
        PersistenceError::CitizenNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Citizen"),
            message: format!("Citizen {id} does not exist"),
        },
        PersistenceError::Duplicate { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_id"),
            message: err.to_string(),
        },
        PersistenceError::IdExhausted { .. }
        | PersistenceError::DanglingReference(_)
        | PersistenceError::Storage(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates an evidence storage failure into an API error.
///
/// Storage failures are never the caller's fault.
#[must_use]
pub fn translate_storage_error(err: &StorageError) -> ApiError {
    ApiError::Internal {
        message: format!("Evidence upload failed: {err}"),
    }
}
