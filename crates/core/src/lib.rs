// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod actor;
mod apply;
mod command;
mod error;
mod notification;
mod state;

#[cfg(test)]
mod tests;

use civic_pulse_domain::{Complaint, DomainError, EvidenceFile, OfficerId, validate_evidence};

// Re-export public types and functions
pub use actor::Actor;
pub use apply::{apply, apply_submission};
pub use command::Command;
pub use error::CoreError;
pub use notification::{Channel, Notification};
pub use state::{State, TransitionResult};

/// Validates an evidence upload before the file is stored.
///
/// This is a read-only validation; the stored file is recorded afterwards
/// through `Command::AttachEvidence`.
///
/// # Arguments
///
/// * `complaint` - The complaint the evidence is for
/// * `officer_id` - The uploading officer
/// * `file` - The uploaded file
///
/// # Errors
///
/// Returns an error if:
/// - The officer is not assigned to the complaint
/// - The complaint has been soft-deleted
/// - The file is empty, not a PNG/JPEG image, or larger than 5 MiB
pub fn validate_evidence_upload(
    complaint: &Complaint,
    officer_id: OfficerId,
    file: &EvidenceFile,
) -> Result<(), DomainError> {
    complaint.ensure_assigned_to(officer_id)?;
    complaint.ensure_not_deleted()?;
    validate_evidence(file)
}
