// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ComplaintCategory, ComplaintId, CitizenId, OfficerId, OfficerStatus};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The complaint does not exist.
    ComplaintNotFound(ComplaintId),
    /// The officer does not exist.
    OfficerNotFound(OfficerId),
    /// The citizen does not exist.
    CitizenNotFound(CitizenId),
    /// The acting party does not own the complaint.
    AccessDenied {
        /// The complaint that was targeted.
        complaint_id: ComplaintId,
        /// Why access was refused.
        reason: String,
    },
    /// An enumerated value was not recognised.
    InvalidTransition {
        /// The field being set (status, stage, priority, ...).
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },
    /// The officer's department does not match the complaint category.
    DepartmentMismatch {
        /// The complaint being assigned.
        complaint_id: ComplaintId,
        /// The complaint's category.
        category: ComplaintCategory,
        /// The officer being assigned.
        officer_id: OfficerId,
        /// The officer's department.
        department: ComplaintCategory,
    },
    /// The officer cannot take a new assignment.
    OfficerUnavailable {
        /// The officer.
        officer_id: OfficerId,
        /// The officer's persisted status.
        status: OfficerStatus,
    },
    /// The uploaded evidence file is empty.
    EmptyFile,
    /// The uploaded evidence file is not an accepted image type.
    InvalidFileType {
        /// The rejected content type.
        content_type: String,
    },
    /// The uploaded evidence file exceeds the size limit.
    FileTooLarge {
        /// The file size in bytes.
        size: u64,
        /// The maximum accepted size in bytes.
        max: u64,
    },
    /// The complaint has been soft-deleted and is read-only.
    ComplaintDeleted(ComplaintId),
    /// A date string could not be parsed.
    InvalidDate {
        /// The invalid date string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// A submitted complaint is missing required content.
    InvalidComplaint(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ComplaintNotFound(id) => write!(f, "Complaint {id} not found"),
            Self::OfficerNotFound(id) => write!(f, "Officer {id} not found"),
            Self::CitizenNotFound(id) => write!(f, "Citizen {id} not found"),
            Self::AccessDenied {
                complaint_id,
                reason,
            } => write!(f, "Access denied to complaint {complaint_id}: {reason}"),
            Self::InvalidTransition { field, value } => {
                write!(f, "Invalid {field} value: '{value}'")
            }
            Self::DepartmentMismatch {
                complaint_id,
                category,
                officer_id,
                department,
            } => write!(
                f,
                "Officer {officer_id} in department {department} cannot take complaint {complaint_id} in category {category}"
            ),
            Self::OfficerUnavailable { officer_id, status } => {
                write!(f, "Officer {officer_id} is not available (status {status})")
            }
            Self::EmptyFile => write!(f, "File is empty"),
            Self::InvalidFileType { content_type } => {
                write!(
                    f,
                    "Only PNG/JPG images allowed, got content type '{content_type}'"
                )
            }
            Self::FileTooLarge { size, max } => {
                write!(f, "File size {size} bytes exceeds the {max} byte limit")
            }
            Self::ComplaintDeleted(id) => {
                write!(f, "Complaint {id} has been deleted and cannot be modified")
            }
            Self::InvalidDate { value, error } => {
                write!(f, "Failed to parse date '{value}': {error}")
            }
            Self::InvalidComplaint(msg) => write!(f, "Invalid complaint: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
