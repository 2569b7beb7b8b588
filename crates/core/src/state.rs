// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::notification::Notification;
use civic_pulse_domain::{Complaint, Officer};

/// The slice of system state a single lifecycle command operates on.
///
/// The repository loads this scope, `apply` validates against it, and the
/// repository commits the resulting snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// The complaint being acted on.
    pub complaint: Complaint,
    /// For assignment, the officer named by the command. Otherwise the
    /// officer currently assigned to the complaint, if any.
    pub officer: Option<Officer>,
    /// Active complaints held by `officer`, not counting `complaint`.
    pub other_active_complaints: u64,
}

impl State {
    /// Creates a scope for a complaint with no officer loaded.
    #[must_use]
    pub const fn new(complaint: Complaint) -> Self {
        Self {
            complaint,
            officer: None,
            other_active_complaints: 0,
        }
    }

    /// Attaches the officer and their active count outside this complaint.
    #[must_use]
    pub fn with_officer(mut self, officer: Officer, other_active_complaints: u64) -> Self {
        self.officer = Some(officer);
        self.other_active_complaints = other_active_complaints;
        self
    }

    /// Returns the loaded officer's name, or `N/A` if none.
    #[must_use]
    pub fn officer_name(&self) -> &str {
        self.officer.as_ref().map_or("N/A", |o| o.name.as_str())
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The complaint after the transition.
    pub complaint: Complaint,
    /// The officer after the transition, when the transition touched one.
    pub officer: Option<Officer>,
    /// Notifications to publish once the transition is committed.
    pub notifications: Vec<Notification>,
}
