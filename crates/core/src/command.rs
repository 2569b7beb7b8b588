// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_pulse_domain::{ComplaintStage, ComplaintStatus, OfficerId, Priority};
use time::Date;

/// A command represents actor intent as data only.
///
/// Commands are the only way to request changes to an existing complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Admin: assign the complaint to an officer.
    AssignOfficer {
        /// The officer to assign.
        officer_id: OfficerId,
    },
    /// Admin: set the complaint status.
    SetStatus {
        /// The new status.
        status: ComplaintStatus,
    },
    /// Admin: set the progress stage.
    SetStage {
        /// The new stage.
        stage: ComplaintStage,
    },
    /// Admin: set the priority.
    SetPriority {
        /// The new priority.
        priority: Priority,
    },
    /// Admin: soft-delete the complaint.
    SoftDelete {
        /// Why the complaint was deleted. Defaults to "No reason provided".
        reason: Option<String>,
    },
    /// Officer: set the status of an assigned complaint.
    OfficerSetStatus {
        /// The new status.
        status: ComplaintStatus,
    },
    /// Officer: set the stage of an assigned complaint.
    OfficerSetStage {
        /// The new stage.
        stage: ComplaintStage,
    },
    /// Officer: record a remark.
    AddRemark {
        /// The remark text.
        remark: String,
    },
    /// Officer: set the expected completion date.
    SetExpectedCompletion {
        /// The expected completion date.
        date: Date,
    },
    /// Officer: record stored evidence.
    AttachEvidence {
        /// The public URL of the stored evidence file.
        evidence_url: String,
    },
    /// Citizen: reply to a clarification request.
    Reply {
        /// The reply text.
        message: String,
    },
}

impl Command {
    /// Returns the command name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AssignOfficer { .. } => "AssignOfficer",
            Self::SetStatus { .. } => "SetStatus",
            Self::SetStage { .. } => "SetStage",
            Self::SetPriority { .. } => "SetPriority",
            Self::SoftDelete { .. } => "SoftDelete",
            Self::OfficerSetStatus { .. } => "OfficerSetStatus",
            Self::OfficerSetStage { .. } => "OfficerSetStage",
            Self::AddRemark { .. } => "AddRemark",
            Self::SetExpectedCompletion { .. } => "SetExpectedCompletion",
            Self::AttachEvidence { .. } => "AttachEvidence",
            Self::Reply { .. } => "Reply",
        }
    }
}
