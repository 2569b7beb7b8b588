// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Civic Pulse grievance system.
//!
//! This crate authorizes actors, translates transport requests into
//! lifecycle commands and renders complaints for the three dashboards.
//! It knows nothing about HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod notify;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error, translate_storage_error,
};
pub use handlers::{
    admin_officer_availability, assign_officer, assigned_complaints, citizen_complaint,
    citizen_complaints, citizen_deleted_complaints, get_complaint, list_complaints,
    officer_complaint, officer_feedback, officer_feedbacks, officer_update_complaint,
    officer_workload, prepare_evidence_upload, record_evidence, reply_to_complaint,
    soft_delete_complaint, submit_complaint, update_priority, update_stage, update_status,
    upload_evidence,
};
pub use notify::{NotificationPublisher, NullPublisher, PublishError, dispatch};
pub use request_response::{
    ApiResult, AssignOfficerRequest, ComplaintResponse, DeleteComplaintRequest, EvidenceUpload,
    FeedbackResponse, ListComplaintsQuery, OfficerComplaintResponse, OfficerFeedbackResponse,
    OfficerUpdateRequest, ReplyRequest, SubmitComplaintRequest, UpdatePriorityRequest,
    UpdateStageRequest, UpdateStatusRequest,
};
