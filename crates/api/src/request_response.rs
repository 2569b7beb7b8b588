// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use civic_pulse::Notification;
use civic_pulse_domain::{AdminId, Complaint, Feedback, Officer, OfficerId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// The outcome of a mutating API operation.
///
/// `notifications` must be published by the caller once it has released
/// the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The response to return to the caller.
    pub response: T,
    /// Notifications produced by the committed transitions.
    pub notifications: Vec<Notification>,
}

/// Admin listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListComplaintsQuery {
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Status name, matched case-insensitively.
    pub status: Option<String>,
    /// Priority name, matched case-insensitively.
    pub priority: Option<String>,
}

/// API request to assign a complaint to an officer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignOfficerRequest {
    pub officer_id: i64,
}

/// API request to set a complaint's status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// API request to set a complaint's stage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStageRequest {
    pub stage: String,
}

/// API request to set a complaint's priority.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePriorityRequest {
    pub priority: String,
}

/// API request to soft-delete a complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteComplaintRequest {
    pub reason: Option<String>,
}

/// API request for the officer's combined update.
///
/// Each present, non-blank field is applied in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OfficerUpdateRequest {
    pub status: Option<String>,
    pub stage: Option<String>,
    pub remark: Option<String>,
    /// Expected completion date (ISO 8601, `YYYY-MM-DD`).
    pub expected_date: Option<String>,
}

/// An evidence upload as received by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// API request to submit a new complaint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitComplaintRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Category name (ELECTRICITY, WATER, ROADS, ...).
    pub category: String,
    /// Priority name; defaults to MEDIUM.
    pub priority: Option<String>,
    pub image_url: Option<String>,
}

/// API request for a citizen's clarification reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
}

/// Renders a timestamp as RFC 3339.
fn format_timestamp(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}

/// API view of citizen feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub rating: u8,
    pub officer_behaviour_rating: u8,
    pub resolution_status: String,
    pub timeliness: String,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub reopened: bool,
    pub submitted_at: String,
}

impl From<&Feedback> for FeedbackResponse {
    fn from(feedback: &Feedback) -> Self {
        Self {
            rating: feedback.rating,
            officer_behaviour_rating: feedback.officer_behaviour_rating,
            resolution_status: feedback.resolution_status.clone(),
            timeliness: feedback.timeliness.clone(),
            comment: feedback.comment.clone(),
            image_url: feedback.image_url.clone(),
            reopened: feedback.reopened,
            submitted_at: format_timestamp(feedback.submitted_at),
        }
    }
}

/// Feedback as shown to the officer who handled the complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerFeedbackResponse {
    pub complaint_id: i64,
    #[serde(flatten)]
    pub feedback: FeedbackResponse,
}

impl OfficerFeedbackResponse {
    #[must_use]
    pub fn new(complaint: &Complaint, feedback: &Feedback) -> Self {
        Self {
            complaint_id: complaint.id.value(),
            feedback: FeedbackResponse::from(feedback),
        }
    }
}

/// API view of a complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintResponse {
    pub id: i64,
    pub citizen_id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub stage: String,
    pub assigned_officer_id: Option<i64>,
    pub assigned_admin_id: Option<i64>,
    pub assigned_at: Option<String>,
    pub submitted_at: String,
    pub resolved_at: Option<String>,
    pub expected_completion_date: Option<String>,
    pub officer_remark: Option<String>,
    pub admin_remark: Option<String>,
    pub deletion_reason: Option<String>,
    pub clarification_message: Option<String>,
    pub image_url: Option<String>,
    pub evidence_url: Option<String>,
    pub deleted: bool,
    pub feedback: Option<FeedbackResponse>,
}

impl From<&Complaint> for ComplaintResponse {
    fn from(c: &Complaint) -> Self {
        Self {
            id: c.id.value(),
            citizen_id: c.citizen_id.value(),
            title: c.title.clone(),
            description: c.description.clone(),
            location: c.location.clone(),
            latitude: c.latitude,
            longitude: c.longitude,
            category: c.category.as_str().to_string(),
            priority: c.priority.as_str().to_string(),
            status: c.status.as_str().to_string(),
            stage: c.stage.as_str().to_string(),
            assigned_officer_id: c.assigned_officer.map(OfficerId::value),
            assigned_admin_id: c.assigned_admin.map(AdminId::value),
            assigned_at: c.assigned_at.map(format_timestamp),
            submitted_at: format_timestamp(c.submitted_at),
            resolved_at: c.resolved_at.map(format_timestamp),
            expected_completion_date: c.expected_completion.map(|d| d.to_string()),
            officer_remark: c.officer_remark.clone(),
            admin_remark: c.admin_remark.clone(),
            deletion_reason: c.deletion_reason.clone(),
            clarification_message: c.clarification_message.clone(),
            image_url: c.image_url.clone(),
            evidence_url: c.evidence_url.clone(),
            deleted: c.deleted,
            feedback: c.feedback.as_ref().map(FeedbackResponse::from),
        }
    }
}

/// API view of a complaint from the assigned officer's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficerComplaintResponse {
    #[serde(flatten)]
    pub complaint: ComplaintResponse,
    pub assigned_officer_name: String,
    pub assigned_officer_status: String,
    pub assigned_officer_department: String,
    pub assigned_officer_active_complaints: u64,
}

impl OfficerComplaintResponse {
    /// Combines a complaint with its officer's current standing.
    #[must_use]
    pub fn new(complaint: &Complaint, officer: &Officer, active_complaints: u64) -> Self {
        Self {
            complaint: ComplaintResponse::from(complaint),
            assigned_officer_name: officer.name.clone(),
            assigned_officer_status: officer.status.as_str().to_string(),
            assigned_officer_department: officer.department.as_str().to_string(),
            assigned_officer_active_complaints: active_complaints,
        }
    }
}
