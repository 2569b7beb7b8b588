// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::actor::Actor;
use crate::command::Command;
use crate::error::CoreError;
use crate::notification::{Channel, Notification};
use crate::state::{State, TransitionResult};
use civic_pulse_domain::{
    AdminId, CitizenId, Complaint, ComplaintId, ComplaintStage, ComplaintStatus, DomainError,
    NewComplaint, Officer, OfficerId, OfficerStatus, availability_from_active_count,
    release_if_idle,
};
use time::OffsetDateTime;

const DEFAULT_DELETE_REASON: &str = "No reason provided";

fn require_admin(actor: Actor, command: &Command) -> Result<AdminId, CoreError> {
    match actor {
        Actor::Admin(id) => Ok(id),
        other => Err(CoreError::ActorNotPermitted {
            command: command.name(),
            actor: other.kind(),
        }),
    }
}

fn require_officer(actor: Actor, command: &Command) -> Result<OfficerId, CoreError> {
    match actor {
        Actor::Officer(id) => Ok(id),
        other => Err(CoreError::ActorNotPermitted {
            command: command.name(),
            actor: other.kind(),
        }),
    }
}

fn require_citizen(actor: Actor, command: &Command) -> Result<CitizenId, CoreError> {
    match actor {
        Actor::Citizen(id) => Ok(id),
        other => Err(CoreError::ActorNotPermitted {
            command: command.name(),
            actor: other.kind(),
        }),
    }
}

/// Collects notifications for a single complaint.
struct Outbox {
    complaint_id: ComplaintId,
    notifications: Vec<Notification>,
}

impl Outbox {
    const fn new(complaint_id: ComplaintId) -> Self {
        Self {
            complaint_id,
            notifications: Vec::new(),
        }
    }

    fn push(&mut self, channel: Channel, message: String) {
        self.notifications
            .push(Notification::new(channel, self.complaint_id, message));
    }

    /// Notifies the complaint's assigned admin, if it has one.
    fn push_assigned_admin(&mut self, complaint: &Complaint, message: String) {
        if let Some(admin) = complaint.assigned_admin {
            self.push(Channel::Admin(admin), message);
        }
    }
}

/// Recomputes the assigned officer's persisted status after an officer-side
/// update, counting the updated complaint if it is still active.
fn recompute_officer(state: &State, complaint: &Complaint) -> Option<Officer> {
    state.officer.as_ref().map(|officer| {
        let active: u64 =
            state.other_active_complaints + u64::from(complaint.status.is_active());
        let mut updated: Officer = officer.clone();
        updated.status = availability_from_active_count(active);
        updated
    })
}

/// Creates a new complaint from a citizen submission.
///
/// Submission has no prior complaint to scope against, so it is applied
/// separately from `apply`.
///
/// # Arguments
///
/// * `complaint_id` - The identifier allocated by the repository
/// * `citizen_id` - The submitting citizen
/// * `content` - The citizen-supplied fields
/// * `now` - The submission timestamp
///
/// # Errors
///
/// Returns an error if the title or description is blank.
pub fn apply_submission(
    complaint_id: ComplaintId,
    citizen_id: CitizenId,
    content: NewComplaint,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    content.validate()?;

    let complaint: Complaint = Complaint::new(complaint_id, citizen_id, content, now);
    let status: &str = complaint.status.as_str();

    let mut outbox: Outbox = Outbox::new(complaint_id);
    outbox.push(Channel::Citizen(citizen_id), status.to_string());
    outbox.push(Channel::AdminBroadcast, status.to_string());

    Ok(TransitionResult {
        complaint,
        officer: None,
        notifications: outbox.notifications,
    })
}

/// Applies a command to the current state, producing new snapshots and
/// the notifications to publish after commit.
///
/// # Arguments
///
/// * `state` - The loaded scope (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `now` - The timestamp recorded by time-stamping transitions
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new complaint, the touched
///   officer and the notifications
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The actor kind may not issue the command
/// - The complaint is soft-deleted (except for `SoftDelete`)
/// - The acting officer is not assigned, or the acting citizen does not own the complaint
/// - Assignment targets a missing, mismatched or unavailable officer
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let current: &Complaint = &state.complaint;
    let mut outbox: Outbox = Outbox::new(current.id);

    match command {
        Command::AssignOfficer { officer_id } => {
            require_admin(actor, &command)?;
            current.ensure_not_deleted()?;

            let officer: &Officer = state
                .officer
                .as_ref()
                .filter(|o| o.id == officer_id)
                .ok_or(DomainError::OfficerNotFound(officer_id))?;
            officer.ensure_assignable(current.id, current.category)?;

            let mut complaint: Complaint = current.clone();
            complaint.assigned_officer = Some(officer.id);
            complaint.assigned_at = Some(now);
            complaint.set_status(ComplaintStatus::InProgress, now);
            complaint.stage = ComplaintStage::Assigned;

            let mut officer: Officer = officer.clone();
            officer.status = OfficerStatus::Busy;

            outbox.push(
                Channel::Citizen(complaint.citizen_id),
                format!("Assigned to Officer: {}", officer.name),
            );
            outbox.push(
                Channel::Officer(officer.id),
                format!(
                    "A new complaint has been assigned to you: {}",
                    complaint.title
                ),
            );
            outbox.push_assigned_admin(
                &complaint,
                format!(
                    "Officer {} has been assigned to complaint: {}",
                    officer.name, complaint.title
                ),
            );

            Ok(TransitionResult {
                complaint,
                officer: Some(officer),
                notifications: outbox.notifications,
            })
        }
        Command::SetStatus { status } => {
            require_admin(actor, &command)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.set_status(status, now);

            // The resolved complaint no longer counts, so only the others remain.
            let officer: Option<Officer> = if status == ComplaintStatus::Resolved {
                state.officer.as_ref().map(|o| {
                    let mut updated: Officer = o.clone();
                    updated.status = release_if_idle(o.status, state.other_active_complaints);
                    updated
                })
            } else {
                None
            };

            outbox.push(
                Channel::Citizen(complaint.citizen_id),
                format!("Status updated: {status}"),
            );
            outbox.push_assigned_admin(
                &complaint,
                format!(
                    "Officer {} updated complaint status to: {status}",
                    state.officer_name()
                ),
            );

            Ok(TransitionResult {
                complaint,
                officer,
                notifications: outbox.notifications,
            })
        }
        Command::SetStage { stage } => {
            require_admin(actor, &command)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.stage = stage;

            outbox.push(
                Channel::Citizen(complaint.citizen_id),
                format!("Complaint stage updated to: {stage}"),
            );
            outbox.push_assigned_admin(
                &complaint,
                format!(
                    "Officer {} updated complaint stage to: {stage}",
                    state.officer_name()
                ),
            );

            Ok(TransitionResult {
                complaint,
                officer: None,
                notifications: outbox.notifications,
            })
        }
        Command::SetPriority { priority } => {
            require_admin(actor, &command)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.priority = priority;

            outbox.push(
                Channel::Citizen(complaint.citizen_id),
                format!("Complaint priority updated to: {priority}"),
            );
            outbox.push_assigned_admin(
                &complaint,
                format!(
                    "Officer {} updated complaint priority to: {priority}",
                    state.officer_name()
                ),
            );

            Ok(TransitionResult {
                complaint,
                officer: None,
                notifications: outbox.notifications,
            })
        }
        Command::SoftDelete { ref reason } => {
            require_admin(actor, &command)?;

            let reason: String = reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_DELETE_REASON)
                .to_string();

            let mut complaint: Complaint = current.clone();
            complaint.deleted = true;
            complaint.admin_remark = Some(reason.clone());
            complaint.deletion_reason = Some(reason.clone());
            complaint.resolved_at = Some(now);

            outbox.push(
                Channel::Citizen(complaint.citizen_id),
                format!("Complaint deleted by admin. Reason: {reason}"),
            );
            outbox.push_assigned_admin(
                &complaint,
                format!("Complaint was deleted. Reason: {reason}"),
            );

            Ok(TransitionResult {
                complaint,
                officer: None,
                notifications: outbox.notifications,
            })
        }
        Command::OfficerSetStatus { status } => {
            let officer_id: OfficerId = require_officer(actor, &command)?;
            current.ensure_assigned_to(officer_id)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.set_status(status, now);
            let officer: Option<Officer> = recompute_officer(state, &complaint);

            outbox.push(
                Channel::AdminBroadcast,
                String::from("Complaint status updated"),
            );
            outbox.push(
                Channel::Citizen(complaint.citizen_id),
                String::from("Your complaint status updated"),
            );

            Ok(TransitionResult {
                complaint,
                officer,
                notifications: outbox.notifications,
            })
        }
        Command::OfficerSetStage { stage } => {
            let officer_id: OfficerId = require_officer(actor, &command)?;
            current.ensure_assigned_to(officer_id)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.stage = stage;

            Ok(TransitionResult {
                complaint,
                officer: None,
                notifications: Vec::new(),
            })
        }
        Command::AddRemark { ref remark } => {
            let officer_id: OfficerId = require_officer(actor, &command)?;
            current.ensure_assigned_to(officer_id)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.officer_remark = Some(remark.clone());

            Ok(TransitionResult {
                complaint,
                officer: None,
                notifications: Vec::new(),
            })
        }
        Command::SetExpectedCompletion { date } => {
            let officer_id: OfficerId = require_officer(actor, &command)?;
            current.ensure_assigned_to(officer_id)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.expected_completion = Some(date);

            Ok(TransitionResult {
                complaint,
                officer: None,
                notifications: Vec::new(),
            })
        }
        Command::AttachEvidence { ref evidence_url } => {
            let officer_id: OfficerId = require_officer(actor, &command)?;
            current.ensure_assigned_to(officer_id)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.evidence_url = Some(evidence_url.clone());
            if complaint.status == ComplaintStatus::Pending {
                complaint.set_status(ComplaintStatus::InProgress, now);
            }
            let officer: Option<Officer> = recompute_officer(state, &complaint);

            outbox.push(
                Channel::AdminBroadcast,
                String::from("Officer uploaded evidence"),
            );
            outbox.push(
                Channel::Citizen(complaint.citizen_id),
                String::from("Officer uploaded evidence for your complaint"),
            );

            Ok(TransitionResult {
                complaint,
                officer,
                notifications: outbox.notifications,
            })
        }
        Command::Reply { ref message } => {
            let citizen_id: CitizenId = require_citizen(actor, &command)?;
            current.ensure_owned_by(citizen_id)?;
            current.ensure_not_deleted()?;

            let mut complaint: Complaint = current.clone();
            complaint.clarification_message = Some(message.clone());

            outbox.push(Channel::AdminBroadcast, String::from("Citizen replied"));

            Ok(TransitionResult {
                complaint,
                officer: None,
                notifications: outbox.notifications,
            })
        }
    }
}
