// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side mutations.

use crate::{AdminData, CitizenData, Persistence, PersistenceError};
use civic_pulse::TransitionResult;
use civic_pulse_domain::{Complaint, ComplaintId, Officer};
use tracing::{debug, info};

impl Persistence {
    /// Allocates the next complaint identifier.
    ///
    /// Identifiers are never reused, even when the submission that
    /// requested one is rejected.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::IdExhausted` if the highest identifier on
    /// record is `i64::MAX`.
    pub fn next_complaint_id(&mut self) -> Result<ComplaintId, PersistenceError> {
        let highest: i64 = self
            .complaints
            .keys()
            .next_back()
            .map_or(self.last_complaint_id, |id| {
                id.value().max(self.last_complaint_id)
            });
        let next: i64 = highest
            .checked_add(1)
            .ok_or(PersistenceError::IdExhausted { entity: "Complaint" })?;
        self.last_complaint_id = next;
        Ok(ComplaintId::new(next))
    }

    /// Registers a citizen.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the id is taken.
    pub fn insert_citizen(&mut self, citizen: CitizenData) -> Result<(), PersistenceError> {
        if self.citizens.contains_key(&citizen.id) {
            return Err(PersistenceError::Duplicate {
                entity: "Citizen",
                id: citizen.id.value(),
            });
        }
        info!(citizen_id = %citizen.id, "Registered citizen");
        self.citizens.insert(citizen.id, citizen);
        Ok(())
    }

    /// Registers an admin.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the id is taken.
    pub fn insert_admin(&mut self, admin: AdminData) -> Result<(), PersistenceError> {
        if self.admins.contains_key(&admin.id) {
            return Err(PersistenceError::Duplicate {
                entity: "Admin",
                id: admin.id.value(),
            });
        }
        info!(admin_id = %admin.id, "Registered admin");
        self.admins.insert(admin.id, admin);
        Ok(())
    }

    /// Registers an officer.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the id is taken.
    pub fn insert_officer(&mut self, officer: Officer) -> Result<(), PersistenceError> {
        if self.officers.contains_key(&officer.id) {
            return Err(PersistenceError::Duplicate {
                entity: "Officer",
                id: officer.id.value(),
            });
        }
        info!(officer_id = %officer.id, department = %officer.department, "Registered officer");
        self.officers.insert(officer.id, officer);
        Ok(())
    }

    /// Stores a complaint that did not come through a lifecycle transition,
    /// such as fixture data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The id is taken
    /// - The submitting citizen is not registered
    /// - The assigned officer is not registered
    pub fn insert_complaint(&mut self, complaint: Complaint) -> Result<(), PersistenceError> {
        if self.complaints.contains_key(&complaint.id) {
            return Err(PersistenceError::Duplicate {
                entity: "Complaint",
                id: complaint.id.value(),
            });
        }
        if !self.citizens.contains_key(&complaint.citizen_id) {
            return Err(PersistenceError::CitizenNotFound(complaint.citizen_id.value()));
        }
        if let Some(officer) = complaint.assigned_officer
            && !self.officers.contains_key(&officer)
        {
            return Err(PersistenceError::OfficerNotFound(officer.value()));
        }
        debug!(complaint_id = %complaint.id, "Inserted complaint");
        self.complaints.insert(complaint.id, complaint);
        Ok(())
    }

    /// Writes the snapshots produced by a lifecycle transition.
    ///
    /// The complaint is upserted; a touched officer must already exist.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::OfficerNotFound` if the transition touched
    /// an officer that is not on record. Nothing is written in that case.
    pub fn commit(&mut self, result: &TransitionResult) -> Result<(), PersistenceError> {
        if let Some(officer) = &result.officer {
            let slot: &mut Officer = self
                .officers
                .get_mut(&officer.id)
                .ok_or(PersistenceError::OfficerNotFound(officer.id.value()))?;
            *slot = officer.clone();
        }

        debug!(
            complaint_id = %result.complaint.id,
            status = %result.complaint.status,
            stage = %result.complaint.stage,
            deleted = result.complaint.deleted,
            "Committed transition"
        );
        self.complaints
            .insert(result.complaint.id, result.complaint.clone());
        Ok(())
    }
}
