// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use civic_pulse_domain::{
    AdminId, CitizenId, Complaint, ComplaintCategory, ComplaintId, ComplaintStage,
    ComplaintStatus, Feedback, NewComplaint, Officer, OfficerId, Priority,
};
use civic_pulse_persistence::{AdminData, CitizenData, Persistence};
use std::path::PathBuf;
use time::macros::datetime;

use crate::{AssignOfficerRequest, AuthenticatedActor, Role, assign_officer};

pub const CYBER_COMPLAINT: i64 = 1;
pub const WATER_COMPLAINT: i64 = 2;
pub const RATED_COMPLAINT: i64 = 3;

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, Role::Admin)
}

pub fn create_test_officer() -> AuthenticatedActor {
    AuthenticatedActor::new(7, Role::Officer)
}

pub fn create_test_water_officer() -> AuthenticatedActor {
    AuthenticatedActor::new(8, Role::Officer)
}

pub fn create_test_citizen() -> AuthenticatedActor {
    AuthenticatedActor::new(100, Role::Citizen)
}

pub fn create_test_other_citizen() -> AuthenticatedActor {
    AuthenticatedActor::new(200, Role::Citizen)
}

fn create_complaint(
    id: i64,
    citizen: i64,
    title: &str,
    category: ComplaintCategory,
    priority: Priority,
) -> Complaint {
    let mut complaint: Complaint = Complaint::new(
        ComplaintId::new(id),
        CitizenId::new(citizen),
        NewComplaint {
            title: String::from(title),
            description: String::from("Reported through the citizen portal"),
            location: Some(String::from("Ward 12")),
            latitude: Some(12.97),
            longitude: Some(77.59),
            category,
            priority: Some(priority),
            image_url: None,
        },
        datetime!(2026-03-14 09:30:00 UTC),
    );
    complaint.assigned_admin = Some(AdminId::new(1));
    complaint
}

/// Builds a repository with two citizens, one admin, a CYBER officer (7),
/// a WATER officer (8) and two pending complaints.
pub fn setup_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory();
    for (id, name) in [(100, "Meera Das"), (200, "Karan Shah")] {
        persistence
            .insert_citizen(CitizenData {
                id: CitizenId::new(id),
                name: String::from(name),
                email: format!("citizen{id}@example.org"),
            })
            .expect("Failed to insert citizen");
    }
    persistence
        .insert_admin(AdminData {
            id: AdminId::new(1),
            name: String::from("Control Room"),
            email: String::from("admin@example.org"),
        })
        .expect("Failed to insert admin");
    persistence
        .insert_officer(Officer::new(
            OfficerId::new(7),
            String::from("Ravi Kumar"),
            String::from("ravi@example.org"),
            None,
            ComplaintCategory::Cyber,
        ))
        .expect("Failed to insert officer");
    persistence
        .insert_officer(Officer::new(
            OfficerId::new(8),
            String::from("Anita Singh"),
            String::from("anita@example.org"),
            Some(String::from("+91 98450 00000")),
            ComplaintCategory::Water,
        ))
        .expect("Failed to insert officer");
    persistence
        .insert_complaint(create_complaint(
            CYBER_COMPLAINT,
            100,
            "Phishing call from fake bank",
            ComplaintCategory::Cyber,
            Priority::Medium,
        ))
        .expect("Failed to insert complaint");
    persistence
        .insert_complaint(create_complaint(
            WATER_COMPLAINT,
            200,
            "Broken water main",
            ComplaintCategory::Water,
            Priority::High,
        ))
        .expect("Failed to insert complaint");
    persistence
}

/// Assigns the CYBER complaint to officer 7.
pub fn assign_cyber_complaint(persistence: &mut Persistence) {
    assign_officer(
        persistence,
        CYBER_COMPLAINT,
        AssignOfficerRequest { officer_id: 7 },
        &create_test_admin(),
    )
    .expect("Failed to assign officer");
}

/// Adds a CYBER complaint from citizen 100 that officer 7 resolved and the
/// citizen rated.
pub fn insert_rated_complaint(persistence: &mut Persistence) {
    let mut complaint: Complaint = create_complaint(
        RATED_COMPLAINT,
        100,
        "UPI fraud refund",
        ComplaintCategory::Cyber,
        Priority::Low,
    );
    complaint.assigned_officer = Some(OfficerId::new(7));
    complaint.assigned_at = Some(datetime!(2026-03-14 10:00:00 UTC));
    complaint.set_status(ComplaintStatus::Resolved, datetime!(2026-03-16 12:00:00 UTC));
    complaint.stage = ComplaintStage::Resolved;
    complaint.feedback = Some(Feedback {
        rating: 4,
        officer_behaviour_rating: 5,
        resolution_status: String::from("RESOLVED"),
        timeliness: String::from("ON_TIME"),
        comment: Some(String::from("Refund came through")),
        image_url: None,
        reopened: false,
        submitted_at: datetime!(2026-03-17 08:15:00 UTC),
    });
    persistence
        .insert_complaint(complaint)
        .expect("Failed to insert complaint");
}

/// A unique upload directory under the system temp dir.
pub fn create_test_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("civic-pulse-api-test-{}", uuid::Uuid::new_v4()))
}
