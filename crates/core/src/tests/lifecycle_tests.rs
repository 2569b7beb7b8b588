// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer-side and citizen-side transitions.

use crate::tests::helpers::{
    CITIZEN, admin, assigned_officer, create_assigned_state, create_test_content,
    create_test_complaint, test_now,
};
use crate::{
    Actor, Channel, Command, CoreError, State, TransitionResult, apply, apply_submission,
};
use civic_pulse_domain::{
    CitizenId, Complaint, ComplaintCategory, ComplaintId, ComplaintStage, ComplaintStatus,
    DomainError, NewComplaint, OfficerId, OfficerStatus, parse_date,
};

// ============================================================================
// Officer status
// ============================================================================

#[test]
fn test_officer_resolving_last_complaint_becomes_available() {
    let state: State = create_assigned_state(0);

    let result: TransitionResult = apply(
        &state,
        Command::OfficerSetStatus {
            status: ComplaintStatus::Resolved,
        },
        assigned_officer(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.complaint.resolved_at, Some(test_now()));
    assert_eq!(result.officer.unwrap().status, OfficerStatus::Available);
}

#[test]
fn test_officer_status_recompute_counts_current_complaint() {
    let mut state: State = create_assigned_state(0);
    state.officer.as_mut().unwrap().status = OfficerStatus::Available;

    let result: TransitionResult = apply(
        &state,
        Command::OfficerSetStatus {
            status: ComplaintStatus::InProgress,
        },
        assigned_officer(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.officer.unwrap().status, OfficerStatus::Busy);
}

#[test]
fn test_officer_status_notifies_admins_and_citizen() {
    let state: State = create_assigned_state(0);

    let result: TransitionResult = apply(
        &state,
        Command::OfficerSetStatus {
            status: ComplaintStatus::InProgress,
        },
        assigned_officer(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.notifications.len(), 2);
    assert_eq!(result.notifications[0].channel, Channel::AdminBroadcast);
    assert_eq!(result.notifications[0].message, "Complaint status updated");
    assert_eq!(result.notifications[1].channel, Channel::Citizen(CITIZEN));
    assert_eq!(
        result.notifications[1].message,
        "Your complaint status updated"
    );
}

#[test]
fn test_non_owning_officer_is_denied() {
    let state: State = create_assigned_state(0);

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::OfficerSetStatus {
            status: ComplaintStatus::Resolved,
        },
        Actor::Officer(OfficerId::new(8)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::AccessDenied { .. }))
    ));
    // The loaded scope is untouched.
    assert_eq!(state.complaint.status, ComplaintStatus::InProgress);
}

#[test]
fn test_officer_ownership_checked_before_deletion() {
    let mut state: State = create_assigned_state(0);
    state.complaint.deleted = true;

    let foreign: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::AddRemark {
            remark: String::from("Checked"),
        },
        Actor::Officer(OfficerId::new(8)),
        test_now(),
    );
    assert!(matches!(
        foreign,
        Err(CoreError::DomainViolation(DomainError::AccessDenied { .. }))
    ));

    let owner: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::AddRemark {
            remark: String::from("Checked"),
        },
        assigned_officer(),
        test_now(),
    );
    assert!(matches!(
        owner,
        Err(CoreError::DomainViolation(DomainError::ComplaintDeleted(_)))
    ));
}

// ============================================================================
// Officer field updates
// ============================================================================

#[test]
fn test_officer_field_updates_send_no_notifications() {
    let state: State = create_assigned_state(0);
    let date = parse_date("2026-04-01").unwrap();

    let stage: TransitionResult = apply(
        &state,
        Command::OfficerSetStage {
            stage: ComplaintStage::ActionTaken,
        },
        assigned_officer(),
        test_now(),
    )
    .unwrap();
    assert_eq!(stage.complaint.stage, ComplaintStage::ActionTaken);
    assert!(stage.notifications.is_empty());
    assert!(stage.officer.is_none());

    let remark: TransitionResult = apply(
        &state,
        Command::AddRemark {
            remark: String::from("Site visited"),
        },
        assigned_officer(),
        test_now(),
    )
    .unwrap();
    assert_eq!(
        remark.complaint.officer_remark.as_deref(),
        Some("Site visited")
    );
    assert!(remark.notifications.is_empty());

    let expected: TransitionResult = apply(
        &state,
        Command::SetExpectedCompletion { date },
        assigned_officer(),
        test_now(),
    )
    .unwrap();
    assert_eq!(expected.complaint.expected_completion, Some(date));
    assert!(expected.notifications.is_empty());
}

#[test]
fn test_admin_cannot_issue_officer_commands() {
    let state: State = create_assigned_state(0);

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::AddRemark {
            remark: String::from("x"),
        },
        admin(),
        test_now(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::ActorNotPermitted {
            command: "AddRemark",
            actor: "admin",
        }
    );
}

// ============================================================================
// Citizen submission and reply
// ============================================================================

#[test]
fn test_submission_creates_pending_registered_complaint() {
    let result: TransitionResult = apply_submission(
        ComplaintId::new(12),
        CITIZEN,
        create_test_content(ComplaintCategory::Traffic),
        test_now(),
    )
    .unwrap();

    let complaint: Complaint = result.complaint;
    assert_eq!(complaint.id, ComplaintId::new(12));
    assert_eq!(complaint.status, ComplaintStatus::Pending);
    assert_eq!(complaint.stage, ComplaintStage::Registered);
    assert_eq!(complaint.submitted_at, test_now());

    let channels: Vec<Channel> = result.notifications.iter().map(|n| n.channel).collect();
    assert_eq!(
        channels,
        vec![Channel::Citizen(CITIZEN), Channel::AdminBroadcast]
    );
    assert!(result.notifications.iter().all(|n| n.message == "PENDING"));
}

#[test]
fn test_submission_rejects_blank_description() {
    let mut content: NewComplaint = create_test_content(ComplaintCategory::Traffic);
    content.description = String::new();

    let result: Result<TransitionResult, CoreError> =
        apply_submission(ComplaintId::new(12), CITIZEN, content, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidComplaint(_)))
    ));
}

#[test]
fn test_reply_by_owner() {
    let state: State = State::new(create_test_complaint(ComplaintCategory::Water));

    let result: TransitionResult = apply(
        &state,
        Command::Reply {
            message: String::from("The leak is behind house 14"),
        },
        Actor::Citizen(CITIZEN),
        test_now(),
    )
    .unwrap();

    assert_eq!(
        result.complaint.clarification_message.as_deref(),
        Some("The leak is behind house 14")
    );
    assert_eq!(result.notifications.len(), 1);
    assert_eq!(result.notifications[0].channel, Channel::AdminBroadcast);
    assert_eq!(result.notifications[0].message, "Citizen replied");
}

#[test]
fn test_reply_by_other_citizen_denied() {
    let state: State = State::new(create_test_complaint(ComplaintCategory::Water));

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::Reply {
            message: String::from("hello"),
        },
        Actor::Citizen(CitizenId::new(101)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::AccessDenied { .. }))
    ));
}

#[test]
fn test_reply_to_deleted_complaint_rejected() {
    let mut state: State = State::new(create_test_complaint(ComplaintCategory::Water));
    state.complaint.deleted = true;

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::Reply {
            message: String::from("hello"),
        },
        Actor::Citizen(CITIZEN),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ComplaintDeleted(_)))
    ));
}
