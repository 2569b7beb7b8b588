// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{
    AdminId, CitizenId, ComplaintCategory, ComplaintId, ComplaintStage, ComplaintStatus,
    OfficerId, Priority,
};
use time::{Date, OffsetDateTime};

/// Citizen feedback on a resolved complaint.
///
/// Feedback is authored outside this system and is read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub rating: u8,
    pub officer_behaviour_rating: u8,
    pub resolution_status: String,
    pub timeliness: String,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub reopened: bool,
    pub submitted_at: OffsetDateTime,
}

/// The citizen-supplied content of a new complaint.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: ComplaintCategory,
    pub priority: Option<Priority>,
    pub image_url: Option<String>,
}

impl NewComplaint {
    /// Validates that the required text fields are present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidComplaint` if the title or description
    /// is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvalidComplaint(String::from(
                "title must not be blank",
            )));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::InvalidComplaint(String::from(
                "description must not be blank",
            )));
        }
        Ok(())
    }
}

/// A citizen grievance and its lifecycle fields.
///
/// Invariants maintained by the lifecycle engine:
/// - a `Resolved` complaint always carries `resolved_at`
/// - once `deleted` is set, only reads and a repeated soft delete are allowed
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: ComplaintId,
    pub citizen_id: CitizenId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: ComplaintCategory,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub stage: ComplaintStage,
    pub assigned_officer: Option<OfficerId>,
    pub assigned_admin: Option<AdminId>,
    pub assigned_at: Option<OffsetDateTime>,
    pub submitted_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
    pub expected_completion: Option<Date>,
    pub officer_remark: Option<String>,
    pub admin_remark: Option<String>,
    pub deletion_reason: Option<String>,
    pub clarification_message: Option<String>,
    pub image_url: Option<String>,
    pub evidence_url: Option<String>,
    pub deleted: bool,
    pub feedback: Option<Feedback>,
}

impl Complaint {
    /// Creates a freshly submitted complaint in `Pending` / `Registered`.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier allocated by the repository
    /// * `citizen_id` - The submitting citizen
    /// * `content` - The citizen-supplied fields
    /// * `submitted_at` - The submission timestamp
    #[must_use]
    pub fn new(
        id: ComplaintId,
        citizen_id: CitizenId,
        content: NewComplaint,
        submitted_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            citizen_id,
            title: content.title,
            description: content.description,
            location: content.location,
            latitude: content.latitude,
            longitude: content.longitude,
            category: content.category,
            priority: content.priority.unwrap_or_default(),
            status: ComplaintStatus::Pending,
            stage: ComplaintStage::Registered,
            assigned_officer: None,
            assigned_admin: None,
            assigned_at: None,
            submitted_at,
            resolved_at: None,
            expected_completion: None,
            officer_remark: None,
            admin_remark: None,
            deletion_reason: None,
            clarification_message: None,
            image_url: content.image_url,
            evidence_url: None,
            deleted: false,
            feedback: None,
        }
    }

    /// Returns true if the complaint counts toward `officer`'s workload.
    #[must_use]
    pub fn is_active_for(&self, officer: OfficerId) -> bool {
        self.assigned_officer == Some(officer) && self.status.is_active()
    }

    /// Fails if the complaint has been soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ComplaintDeleted`.
    pub const fn ensure_not_deleted(&self) -> Result<(), DomainError> {
        if self.deleted {
            return Err(DomainError::ComplaintDeleted(self.id));
        }
        Ok(())
    }

    /// Fails unless `officer` is the assigned officer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AccessDenied`.
    pub fn ensure_assigned_to(&self, officer: OfficerId) -> Result<(), DomainError> {
        if self.assigned_officer != Some(officer) {
            return Err(DomainError::AccessDenied {
                complaint_id: self.id,
                reason: format!("officer {officer} is not assigned to this complaint"),
            });
        }
        Ok(())
    }

    /// Fails unless `citizen` submitted the complaint.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AccessDenied`.
    pub fn ensure_owned_by(&self, citizen: CitizenId) -> Result<(), DomainError> {
        if self.citizen_id != citizen {
            return Err(DomainError::AccessDenied {
                complaint_id: self.id,
                reason: format!("citizen {citizen} did not submit this complaint"),
            });
        }
        Ok(())
    }

    /// Sets the status, stamping `resolved_at` when it becomes `Resolved`.
    pub const fn set_status(&mut self, status: ComplaintStatus, now: OffsetDateTime) {
        self.status = status;
        if matches!(status, ComplaintStatus::Resolved) {
            self.resolved_at = Some(now);
        }
    }
}

/// Admin listing filter.
///
/// Status and priority match case-insensitively against the wire names;
/// search is a case-insensitive title substring. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl ComplaintFilter {
    /// Returns true if the complaint is listed under this filter.
    ///
    /// Soft-deleted complaints never match.
    #[must_use]
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if complaint.deleted {
            return false;
        }
        if let Some(status) = non_blank(self.status.as_deref())
            && !complaint.status.as_str().eq_ignore_ascii_case(status)
        {
            return false;
        }
        if let Some(priority) = non_blank(self.priority.as_deref())
            && !complaint.priority.as_str().eq_ignore_ascii_case(priority)
        {
            return false;
        }
        if let Some(search) = non_blank(self.search.as_deref()) {
            return complaint
                .title
                .to_lowercase()
                .contains(&search.to_lowercase());
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
