// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{CitizenData, Persistence};
use civic_pulse_domain::{
    CitizenId, Complaint, ComplaintCategory, ComplaintId, ComplaintStatus, NewComplaint, Officer,
    OfficerId,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const CITIZEN: CitizenId = CitizenId::new(100);

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 09:30:00 UTC)
}

pub fn create_test_officer(id: i64, department: ComplaintCategory) -> Officer {
    Officer::new(
        OfficerId::new(id),
        format!("Officer {id}"),
        format!("officer{id}@example.org"),
        None,
        department,
    )
}

pub fn create_test_complaint(id: i64, title: &str, category: ComplaintCategory) -> Complaint {
    Complaint::new(
        ComplaintId::new(id),
        CITIZEN,
        NewComplaint {
            title: String::from(title),
            description: String::from("Needs attention"),
            location: None,
            latitude: None,
            longitude: None,
            category,
            priority: None,
            image_url: None,
        },
        test_now(),
    )
}

/// A repository with one citizen and one CYBER officer.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory();
    persistence
        .insert_citizen(CitizenData {
            id: CITIZEN,
            name: String::from("Meera Das"),
            email: String::from("meera@example.org"),
        })
        .unwrap();
    persistence
        .insert_officer(create_test_officer(7, ComplaintCategory::Cyber))
        .unwrap();
    persistence
}

/// Inserts a complaint assigned to `officer` with the given status.
pub fn insert_assigned(
    persistence: &mut Persistence,
    id: i64,
    officer: i64,
    status: ComplaintStatus,
) {
    let mut complaint: Complaint = create_test_complaint(id, "Assigned", ComplaintCategory::Cyber);
    complaint.assigned_officer = Some(OfficerId::new(officer));
    complaint.status = status;
    persistence.insert_complaint(complaint).unwrap();
}
