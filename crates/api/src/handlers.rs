// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Every operation authorizes the actor first, then translates the request
//! into domain values, runs the lifecycle engine against a loaded scope and
//! commits the result. Mutating operations return their notifications in an
//! `ApiResult` for the caller to publish after it releases the repository.

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_storage_error,
};
use crate::request_response::{
    ApiResult, AssignOfficerRequest, ComplaintResponse, DeleteComplaintRequest, EvidenceUpload,
    ListComplaintsQuery, OfficerComplaintResponse, OfficerFeedbackResponse, OfficerUpdateRequest,
    ReplyRequest,
    SubmitComplaintRequest, UpdatePriorityRequest, UpdateStageRequest, UpdateStatusRequest,
};
use civic_pulse::{
    Actor, Command, Notification, State, TransitionResult, apply, apply_submission,
    validate_evidence_upload,
};
use civic_pulse_domain::{
    CitizenId, Complaint, ComplaintCategory, ComplaintFilter, ComplaintId, ComplaintStage,
    ComplaintStatus, DomainError, EvidenceFile, NewComplaint, Officer, OfficerAvailability,
    OfficerId, OfficerWorkload, Priority, parse_date,
};
use civic_pulse_persistence::{LocalEvidenceStorage, Persistence, StoredEvidence};
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Loads the scope, applies the command and commits the result.
fn run_transition(
    persistence: &mut Persistence,
    complaint_id: ComplaintId,
    target_officer: Option<OfficerId>,
    command: Command,
    actor: Actor,
) -> Result<TransitionResult, ApiError> {
    let state: State = persistence
        .load_state(complaint_id, target_officer)
        .map_err(translate_persistence_error)?;
    let command_name: &'static str = command.name();

    let result: TransitionResult =
        apply(&state, command, actor, OffsetDateTime::now_utc()).map_err(translate_core_error)?;
    persistence
        .commit(&result)
        .map_err(translate_persistence_error)?;

    info!(
        complaint_id = %complaint_id,
        actor = %actor,
        command = command_name,
        status = %result.complaint.status,
        stage = %result.complaint.stage,
        "Applied complaint transition"
    );
    Ok(result)
}

fn parse_field<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(value).map_err(translate_domain_error)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn complaint_result(result: TransitionResult) -> ApiResult<ComplaintResponse> {
    ApiResult {
        response: ComplaintResponse::from(&result.complaint),
        notifications: result.notifications,
    }
}

// ============================================================================
// Admin operations
// ============================================================================

/// Lists complaints for the admin dashboard.
///
/// Soft-deleted complaints are never listed. Status and priority match
/// case-insensitively; search is a case-insensitive title substring.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin.
pub fn list_complaints(
    persistence: &Persistence,
    query: ListComplaintsQuery,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "list_complaints")?;

    let filter: ComplaintFilter = ComplaintFilter {
        search: query.search,
        status: query.status,
        priority: query.priority,
    };
    Ok(persistence
        .list_complaints(&filter)
        .iter()
        .map(ComplaintResponse::from)
        .collect())
}

/// Returns a single complaint for an admin.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The complaint does not exist or has been soft-deleted
pub fn get_complaint(
    persistence: &Persistence,
    complaint_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ComplaintResponse, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "get_complaint")?;

    let complaint: Complaint = persistence
        .get_complaint(ComplaintId::new(complaint_id))
        .map_err(translate_persistence_error)?;
    if complaint.deleted {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Complaint"),
            message: format!("Complaint {complaint_id} has been deleted"),
        });
    }
    Ok(ComplaintResponse::from(&complaint))
}

/// Assigns a complaint to an officer of the matching department.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The complaint or officer does not exist
/// - The complaint has been soft-deleted
/// - The officer's department differs from the complaint category
/// - The officer is not available
pub fn assign_officer(
    persistence: &mut Persistence,
    complaint_id: i64,
    request: AssignOfficerRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "assign_officer")?;

    let officer_id: OfficerId = OfficerId::new(request.officer_id);
    let result: TransitionResult = run_transition(
        persistence,
        ComplaintId::new(complaint_id),
        Some(officer_id),
        Command::AssignOfficer { officer_id },
        authenticated_actor.to_actor(),
    )?;
    Ok(complaint_result(result))
}

/// Sets a complaint's status as an admin.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The status name is unknown
/// - The complaint does not exist or has been soft-deleted
pub fn update_status(
    persistence: &mut Persistence,
    complaint_id: i64,
    request: UpdateStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "update_status")?;

    let status: ComplaintStatus = parse_field(&request.status)?;
    let result: TransitionResult = run_transition(
        persistence,
        ComplaintId::new(complaint_id),
        None,
        Command::SetStatus { status },
        authenticated_actor.to_actor(),
    )?;
    Ok(complaint_result(result))
}

/// Sets a complaint's stage as an admin.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The stage name is unknown
/// - The complaint does not exist or has been soft-deleted
pub fn update_stage(
    persistence: &mut Persistence,
    complaint_id: i64,
    request: UpdateStageRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "update_stage")?;

    let stage: ComplaintStage = parse_field(&request.stage)?;
    let result: TransitionResult = run_transition(
        persistence,
        ComplaintId::new(complaint_id),
        None,
        Command::SetStage { stage },
        authenticated_actor.to_actor(),
    )?;
    Ok(complaint_result(result))
}

/// Sets a complaint's priority.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The priority name is unknown
/// - The complaint does not exist or has been soft-deleted
pub fn update_priority(
    persistence: &mut Persistence,
    complaint_id: i64,
    request: UpdatePriorityRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "update_priority")?;

    let priority: Priority = parse_field(&request.priority)?;
    let result: TransitionResult = run_transition(
        persistence,
        ComplaintId::new(complaint_id),
        None,
        Command::SetPriority { priority },
        authenticated_actor.to_actor(),
    )?;
    Ok(complaint_result(result))
}

/// Soft-deletes a complaint. Repeating the delete overwrites the reason.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The complaint does not exist
pub fn soft_delete_complaint(
    persistence: &mut Persistence,
    complaint_id: i64,
    request: DeleteComplaintRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "soft_delete_complaint")?;

    let result: TransitionResult = run_transition(
        persistence,
        ComplaintId::new(complaint_id),
        None,
        Command::SoftDelete {
            reason: request.reason,
        },
        authenticated_actor.to_actor(),
    )?;
    Ok(complaint_result(result))
}

/// Reports every officer's persisted status with their active count.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin.
pub fn admin_officer_availability(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<OfficerAvailability>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "officer_availability")?;

    Ok(persistence
        .list_officers()
        .iter()
        .map(|officer| {
            OfficerAvailability::recorded(officer, persistence.count_active_complaints(officer.id))
        })
        .collect())
}

/// Reports every officer's derived workload classification.
///
/// # Errors
///
/// Returns an error if the actor is a Citizen.
pub fn officer_workload(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<OfficerWorkload>, ApiError> {
    AuthorizationService::authorize_view_workload(authenticated_actor)?;

    Ok(persistence
        .list_officers()
        .iter()
        .map(|officer| {
            OfficerWorkload::derive(officer, persistence.count_active_complaints(officer.id))
        })
        .collect())
}

// ============================================================================
// Officer operations
// ============================================================================

fn acting_officer(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Officer, ApiError> {
    persistence
        .get_officer(OfficerId::new(authenticated_actor.id))
        .map_err(translate_persistence_error)
}

/// Renders a complaint with the officer's standing as currently recorded.
fn officer_view(
    persistence: &Persistence,
    complaint: &Complaint,
    officer_id: OfficerId,
) -> Result<OfficerComplaintResponse, ApiError> {
    let officer: Officer = persistence
        .get_officer(officer_id)
        .map_err(translate_persistence_error)?;
    let active: u64 = persistence.count_active_complaints(officer_id);
    Ok(OfficerComplaintResponse::new(complaint, &officer, active))
}

/// Lists the complaints assigned to the acting officer.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - The officer is not registered
pub fn assigned_complaints(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<OfficerComplaintResponse>, ApiError> {
    AuthorizationService::authorize_officer_action(authenticated_actor, "assigned_complaints")?;

    let officer: Officer = acting_officer(persistence, authenticated_actor)?;
    let active: u64 = persistence.count_active_complaints(officer.id);
    Ok(persistence
        .complaints_for_officer(officer.id)
        .iter()
        .map(|complaint| OfficerComplaintResponse::new(complaint, &officer, active))
        .collect())
}

/// Returns one complaint assigned to the acting officer.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - The complaint does not exist
/// - The officer is not assigned to it
pub fn officer_complaint(
    persistence: &Persistence,
    complaint_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<OfficerComplaintResponse, ApiError> {
    AuthorizationService::authorize_officer_action(authenticated_actor, "officer_complaint")?;

    let officer: Officer = acting_officer(persistence, authenticated_actor)?;
    let complaint: Complaint = persistence
        .get_complaint(ComplaintId::new(complaint_id))
        .map_err(translate_persistence_error)?;
    complaint
        .ensure_assigned_to(officer.id)
        .map_err(translate_domain_error)?;

    let active: u64 = persistence.count_active_complaints(officer.id);
    Ok(OfficerComplaintResponse::new(&complaint, &officer, active))
}

/// Applies the officer's combined update.
///
/// The response carries the officer's status as recomputed by the update.
///
/// Present, non-blank fields are applied in order: status, stage, remark,
/// expected date. Every field is parsed before anything is applied, so an
/// invalid value rejects the whole request.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - No field is present
/// - A status, stage or date value is invalid
/// - The officer is not assigned to the complaint, or it has been deleted
pub fn officer_update_complaint(
    persistence: &mut Persistence,
    complaint_id: i64,
    request: OfficerUpdateRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<OfficerComplaintResponse>, ApiError> {
    AuthorizationService::authorize_officer_action(
        authenticated_actor,
        "officer_update_complaint",
    )?;

    let mut commands: Vec<Command> = Vec::new();
    if let Some(status) = non_blank(request.status.as_deref()) {
        commands.push(Command::OfficerSetStatus {
            status: parse_field(status)?,
        });
    }
    if let Some(stage) = non_blank(request.stage.as_deref()) {
        commands.push(Command::OfficerSetStage {
            stage: parse_field(stage)?,
        });
    }
    if let Some(remark) = non_blank(request.remark.as_deref()) {
        commands.push(Command::AddRemark {
            remark: remark.to_string(),
        });
    }
    if let Some(date) = non_blank(request.expected_date.as_deref()) {
        commands.push(Command::SetExpectedCompletion {
            date: parse_date(date).map_err(translate_domain_error)?,
        });
    }

    if commands.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("request"),
            message: String::from(
                "At least one of status, stage, remark or expected_date is required",
            ),
        });
    }

    let complaint_id: ComplaintId = ComplaintId::new(complaint_id);
    let actor: Actor = authenticated_actor.to_actor();
    let mut notifications: Vec<Notification> = Vec::new();
    let mut last: Option<Complaint> = None;
    for command in commands {
        let result: TransitionResult =
            run_transition(persistence, complaint_id, None, command, actor)?;
        notifications.extend(result.notifications);
        last = Some(result.complaint);
    }

    let complaint: Complaint = match last {
        Some(complaint) => complaint,
        None => persistence
            .get_complaint(complaint_id)
            .map_err(translate_persistence_error)?,
    };
    Ok(ApiResult {
        response: officer_view(persistence, &complaint, OfficerId::new(authenticated_actor.id))?,
        notifications,
    })
}

/// Checks an evidence upload before anything is written.
///
/// Returns the file to hand to storage. Callers that store off the request
/// thread follow up with [`record_evidence`].
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - The complaint does not exist, is not assigned to the officer, or has been deleted
/// - The file is empty, not a PNG/JPEG image, or larger than 5 MiB
pub fn prepare_evidence_upload(
    persistence: &Persistence,
    complaint_id: i64,
    upload: EvidenceUpload,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EvidenceFile, ApiError> {
    AuthorizationService::authorize_officer_action(authenticated_actor, "upload_evidence")?;

    let complaint: Complaint = persistence
        .get_complaint(ComplaintId::new(complaint_id))
        .map_err(translate_persistence_error)?;
    let file: EvidenceFile = EvidenceFile {
        original_name: upload.file_name,
        content_type: upload.content_type,
        bytes: upload.bytes,
    };
    validate_evidence_upload(&complaint, OfficerId::new(authenticated_actor.id), &file)
        .map_err(translate_domain_error)?;
    Ok(file)
}

/// Records a stored evidence file on the complaint.
///
/// Ownership and deletion are checked again by the lifecycle engine, so a
/// complaint reassigned while the file was being written is rejected. If
/// the commit fails, the stored file is removed.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - The complaint does not exist, is not assigned to the officer, or has been deleted
pub fn record_evidence(
    persistence: &mut Persistence,
    storage: &LocalEvidenceStorage,
    complaint_id: i64,
    stored: &StoredEvidence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<OfficerComplaintResponse>, ApiError> {
    let recorded: Result<TransitionResult, ApiError> =
        attach_evidence(persistence, complaint_id, stored, authenticated_actor);
    let result: TransitionResult = match recorded {
        Ok(result) => result,
        Err(err) => {
            warn!(path = %stored.path.display(), error = %err, "Discarding evidence after failed commit");
            storage.discard(stored);
            return Err(err);
        }
    };
    Ok(ApiResult {
        response: officer_view(
            persistence,
            &result.complaint,
            OfficerId::new(authenticated_actor.id),
        )?,
        notifications: result.notifications,
    })
}

fn attach_evidence(
    persistence: &mut Persistence,
    complaint_id: i64,
    stored: &StoredEvidence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<TransitionResult, ApiError> {
    AuthorizationService::authorize_officer_action(authenticated_actor, "upload_evidence")?;

    run_transition(
        persistence,
        ComplaintId::new(complaint_id),
        None,
        Command::AttachEvidence {
            evidence_url: stored.url.clone(),
        },
        authenticated_actor.to_actor(),
    )
}

/// Validates, stores and records officer evidence in one call.
///
/// The file is validated before it is written. If recording the stored file
/// fails, the file is removed again.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - The complaint does not exist, is not assigned to the officer, or has been deleted
/// - The file is empty, not a PNG/JPEG image, or larger than 5 MiB
/// - The file cannot be written
pub fn upload_evidence(
    persistence: &mut Persistence,
    storage: &LocalEvidenceStorage,
    complaint_id: i64,
    upload: EvidenceUpload,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<OfficerComplaintResponse>, ApiError> {
    let file: EvidenceFile =
        prepare_evidence_upload(persistence, complaint_id, upload, authenticated_actor)?;
    let stored: StoredEvidence = storage
        .store(&file)
        .map_err(|e| translate_storage_error(&e))?;
    record_evidence(
        persistence,
        storage,
        complaint_id,
        &stored,
        authenticated_actor,
    )
}

// ============================================================================
// Officer feedback
// ============================================================================

/// Returns the citizen feedback on one of the acting officer's complaints.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - The complaint does not exist or is not assigned to the officer
/// - No feedback has been submitted
pub fn officer_feedback(
    persistence: &Persistence,
    complaint_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<OfficerFeedbackResponse, ApiError> {
    AuthorizationService::authorize_officer_action(authenticated_actor, "officer_feedback")?;

    let officer: Officer = acting_officer(persistence, authenticated_actor)?;
    let complaint: Complaint = persistence
        .get_complaint(ComplaintId::new(complaint_id))
        .map_err(translate_persistence_error)?;
    complaint
        .ensure_assigned_to(officer.id)
        .map_err(translate_domain_error)?;

    complaint.feedback.as_ref().map_or_else(
        || {
            Err(ApiError::ResourceNotFound {
                resource_type: String::from("Feedback"),
                message: format!("No feedback submitted for complaint {complaint_id}"),
            })
        },
        |feedback| Ok(OfficerFeedbackResponse::new(&complaint, feedback)),
    )
}

/// Lists the feedback received on every complaint assigned to the acting
/// officer. Complaints without feedback are skipped.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Officer
/// - The officer is not registered
pub fn officer_feedbacks(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<OfficerFeedbackResponse>, ApiError> {
    AuthorizationService::authorize_officer_action(authenticated_actor, "officer_feedbacks")?;

    let officer: Officer = acting_officer(persistence, authenticated_actor)?;
    Ok(persistence
        .complaints_for_officer(officer.id)
        .iter()
        .filter_map(|complaint| {
            complaint
                .feedback
                .as_ref()
                .map(|feedback| OfficerFeedbackResponse::new(complaint, feedback))
        })
        .collect())
}

// ============================================================================
// Citizen operations
// ============================================================================

fn acting_citizen(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CitizenId, ApiError> {
    let citizen_id: CitizenId = CitizenId::new(authenticated_actor.id);
    persistence
        .get_citizen(citizen_id)
        .map_err(translate_persistence_error)?;
    Ok(citizen_id)
}

/// Submits a new complaint for the acting citizen.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a Citizen
/// - The citizen is not registered
/// - The category or priority name is unknown
/// - The title or description is blank
pub fn submit_complaint(
    persistence: &mut Persistence,
    request: SubmitComplaintRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_citizen_action(authenticated_actor, "submit_complaint")?;

    let citizen_id: CitizenId = acting_citizen(persistence, authenticated_actor)?;
    let category: ComplaintCategory = parse_field(&request.category)?;
    let priority: Option<Priority> = match non_blank(request.priority.as_deref()) {
        Some(value) => Some(parse_field(value)?),
        None => None,
    };

    let content: NewComplaint = NewComplaint {
        title: request.title,
        description: request.description,
        location: request.location,
        latitude: request.latitude,
        longitude: request.longitude,
        category,
        priority,
        image_url: request.image_url,
    };
    content.validate().map_err(translate_domain_error)?;

    let complaint_id: ComplaintId = persistence
        .next_complaint_id()
        .map_err(translate_persistence_error)?;
    let result: TransitionResult =
        apply_submission(complaint_id, citizen_id, content, OffsetDateTime::now_utc())
            .map_err(translate_core_error)?;
    persistence
        .commit(&result)
        .map_err(translate_persistence_error)?;

    info!(
        complaint_id = %complaint_id,
        citizen_id = %citizen_id,
        category = %category,
        "Complaint submitted"
    );
    Ok(complaint_result(result))
}

/// Lists every complaint the acting citizen submitted, including deleted ones.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a Citizen
/// - The citizen is not registered
pub fn citizen_complaints(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_citizen_action(authenticated_actor, "citizen_complaints")?;

    let citizen_id: CitizenId = acting_citizen(persistence, authenticated_actor)?;
    Ok(persistence
        .complaints_for_citizen(citizen_id)
        .iter()
        .map(ComplaintResponse::from)
        .collect())
}

/// Lists the acting citizen's complaints that an admin has soft-deleted.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a Citizen
/// - The citizen is not registered
pub fn citizen_deleted_complaints(
    persistence: &Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_citizen_action(
        authenticated_actor,
        "citizen_deleted_complaints",
    )?;

    let citizen_id: CitizenId = acting_citizen(persistence, authenticated_actor)?;
    Ok(persistence
        .complaints_for_citizen(citizen_id)
        .iter()
        .filter(|complaint| complaint.deleted)
        .map(ComplaintResponse::from)
        .collect())
}

/// Returns one of the acting citizen's complaints, even if deleted.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a Citizen
/// - The complaint does not exist
/// - The citizen did not submit it
pub fn citizen_complaint(
    persistence: &Persistence,
    complaint_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ComplaintResponse, ApiError> {
    AuthorizationService::authorize_citizen_action(authenticated_actor, "citizen_complaint")?;

    let complaint: Complaint = persistence
        .get_complaint(ComplaintId::new(complaint_id))
        .map_err(translate_persistence_error)?;
    complaint
        .ensure_owned_by(CitizenId::new(authenticated_actor.id))
        .map_err(translate_domain_error)?;
    Ok(ComplaintResponse::from(&complaint))
}

/// Records the acting citizen's clarification reply.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a Citizen
/// - The message is blank
/// - The complaint does not exist, belongs to someone else, or has been deleted
pub fn reply_to_complaint(
    persistence: &mut Persistence,
    complaint_id: i64,
    request: ReplyRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApiResult<ComplaintResponse>, ApiError> {
    AuthorizationService::authorize_citizen_action(authenticated_actor, "reply_to_complaint")?;

    let Some(message) = non_blank(Some(request.message.as_str())) else {
        return Err(ApiError::InvalidInput {
            field: String::from("message"),
            message: String::from("Reply must not be blank"),
        });
    };

    let result: TransitionResult = run_transition(
        persistence,
        ComplaintId::new(complaint_id),
        None,
        Command::Reply {
            message: message.to_string(),
        },
        authenticated_actor.to_actor(),
    )?;
    Ok(complaint_result(result))
}
