// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CitizenId, Complaint, ComplaintCategory, ComplaintId, NewComplaint, Officer, OfficerId,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 09:30:00 UTC)
}

pub fn create_test_new_complaint(category: ComplaintCategory) -> NewComplaint {
    NewComplaint {
        title: String::from("Streetlight out on Elm Road"),
        description: String::from("The light has been dark for a week"),
        location: Some(String::from("Elm Road near the school")),
        latitude: Some(12.97),
        longitude: Some(77.59),
        category,
        priority: None,
        image_url: None,
    }
}

pub fn create_test_complaint(id: i64, category: ComplaintCategory) -> Complaint {
    Complaint::new(
        ComplaintId::new(id),
        CitizenId::new(100),
        create_test_new_complaint(category),
        test_now(),
    )
}

pub fn create_test_officer(id: i64, department: ComplaintCategory) -> Officer {
    Officer::new(
        OfficerId::new(id),
        String::from("Asha Rao"),
        String::from("asha.rao@example.org"),
        None,
        department,
    )
}
