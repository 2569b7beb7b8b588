// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, State};
use civic_pulse_domain::{
    AdminId, CitizenId, Complaint, ComplaintCategory, ComplaintId, ComplaintStage,
    ComplaintStatus, NewComplaint, Officer, OfficerId, OfficerStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const CITIZEN: CitizenId = CitizenId::new(100);
pub const ADMIN: AdminId = AdminId::new(1);
pub const OFFICER: OfficerId = OfficerId::new(7);

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 09:30:00 UTC)
}

pub const fn admin() -> Actor {
    Actor::Admin(ADMIN)
}

pub const fn assigned_officer() -> Actor {
    Actor::Officer(OFFICER)
}

pub fn create_test_content(category: ComplaintCategory) -> NewComplaint {
    NewComplaint {
        title: String::from("Phishing calls from fake bank"),
        description: String::from("Repeated calls asking for OTPs"),
        location: Some(String::from("Ward 12")),
        latitude: None,
        longitude: None,
        category,
        priority: None,
        image_url: None,
    }
}

pub fn create_test_complaint(category: ComplaintCategory) -> Complaint {
    let mut complaint: Complaint = Complaint::new(
        ComplaintId::new(1),
        CITIZEN,
        create_test_content(category),
        test_now(),
    );
    complaint.assigned_admin = Some(ADMIN);
    complaint
}

pub fn create_test_officer(department: ComplaintCategory, status: OfficerStatus) -> Officer {
    let mut officer: Officer = Officer::new(
        OFFICER,
        String::from("Ravi Kumar"),
        String::from("ravi.kumar@example.org"),
        Some(String::from("555-0107")),
        department,
    );
    officer.status = status;
    officer
}

/// A CYBER complaint already assigned to a busy CYBER officer.
pub fn create_assigned_state(other_active: u64) -> State {
    let mut complaint: Complaint = create_test_complaint(ComplaintCategory::Cyber);
    complaint.assigned_officer = Some(OFFICER);
    complaint.status = ComplaintStatus::InProgress;
    complaint.stage = ComplaintStage::Assigned;
    State::new(complaint).with_officer(
        create_test_officer(ComplaintCategory::Cyber, OfficerStatus::Busy),
        other_active,
    )
}
