// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries.

use crate::{AdminData, CitizenData, Persistence, PersistenceError};
use civic_pulse::State;
use civic_pulse_domain::{
    AdminId, CitizenId, Complaint, ComplaintFilter, ComplaintId, Officer, OfficerId,
    count_active_complaints,
};
use tracing::debug;

impl Persistence {
    /// Returns a complaint by id, including soft-deleted complaints.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ComplaintNotFound` if no such complaint exists.
    pub fn get_complaint(&self, id: ComplaintId) -> Result<Complaint, PersistenceError> {
        self.complaints
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::ComplaintNotFound(id.value()))
    }

    /// Returns an officer by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::OfficerNotFound` if no such officer exists.
    pub fn get_officer(&self, id: OfficerId) -> Result<Officer, PersistenceError> {
        self.officers
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::OfficerNotFound(id.value()))
    }

    /// Returns a citizen by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CitizenNotFound` if no such citizen exists.
    pub fn get_citizen(&self, id: CitizenId) -> Result<CitizenData, PersistenceError> {
        self.citizens
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::CitizenNotFound(id.value()))
    }

    /// Returns an admin by id, if registered.
    #[must_use]
    pub fn get_admin(&self, id: AdminId) -> Option<AdminData> {
        self.admins.get(&id).cloned()
    }

    /// Lists complaints matching the admin filter, ordered by id.
    ///
    /// Soft-deleted complaints are never listed.
    #[must_use]
    pub fn list_complaints(&self, filter: &ComplaintFilter) -> Vec<Complaint> {
        self.complaints
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect()
    }

    /// Lists every complaint a citizen submitted, including soft-deleted ones.
    #[must_use]
    pub fn complaints_for_citizen(&self, citizen: CitizenId) -> Vec<Complaint> {
        self.complaints
            .values()
            .filter(|c| c.citizen_id == citizen)
            .cloned()
            .collect()
    }

    /// Lists every complaint assigned to an officer.
    #[must_use]
    pub fn complaints_for_officer(&self, officer: OfficerId) -> Vec<Complaint> {
        self.complaints
            .values()
            .filter(|c| c.assigned_officer == Some(officer))
            .cloned()
            .collect()
    }

    /// Lists all officers, ordered by id.
    #[must_use]
    pub fn list_officers(&self) -> Vec<Officer> {
        self.officers.values().cloned().collect()
    }

    /// Counts an officer's active complaints (`PENDING` or `IN_PROGRESS`).
    #[must_use]
    pub fn count_active_complaints(&self, officer: OfficerId) -> u64 {
        count_active_complaints(self.complaints.values(), officer)
    }

    /// Loads the scope a lifecycle command operates on.
    ///
    /// # Arguments
    ///
    /// * `complaint_id` - The complaint being acted on
    /// * `target_officer` - For assignment, the officer named by the command;
    ///   `None` loads the complaint's assigned officer instead
    ///
    /// An unknown `target_officer` is left unloaded so the lifecycle engine
    /// reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The complaint does not exist
    /// - The complaint's assigned officer is not on record
    pub fn load_state(
        &self,
        complaint_id: ComplaintId,
        target_officer: Option<OfficerId>,
    ) -> Result<State, PersistenceError> {
        let complaint: Complaint = self.get_complaint(complaint_id)?;

        let officer: Option<Officer> = match target_officer {
            Some(id) => self.officers.get(&id).cloned(),
            None => match complaint.assigned_officer {
                Some(id) => Some(self.officers.get(&id).cloned().ok_or_else(|| {
                    PersistenceError::DanglingReference(format!(
                        "complaint {complaint_id} is assigned to unknown officer {id}"
                    ))
                })?),
                None => None,
            },
        };

        let mut state: State = State::new(complaint);
        if let Some(officer) = officer {
            let other_active: u64 = count_active_complaints(
                self.complaints.values().filter(|c| c.id != complaint_id),
                officer.id,
            );
            debug!(
                complaint_id = %complaint_id,
                officer_id = %officer.id,
                other_active,
                "Loaded transition scope"
            );
            state = state.with_officer(officer, other_active);
        }
        Ok(state)
    }
}
