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

mod complaint;
mod error;
mod evidence;
mod officer;
mod types;
mod workload;

#[cfg(test)]
mod tests;

pub use complaint::{Complaint, ComplaintFilter, Feedback, NewComplaint};
pub use error::DomainError;
pub use evidence::{
    ALLOWED_EVIDENCE_TYPES, EvidenceFile, MAX_EVIDENCE_BYTES, validate_evidence,
};
pub use officer::Officer;
pub use types::{
    AdminId, CitizenId, ComplaintCategory, ComplaintId, ComplaintStage, ComplaintStatus,
    OfficerId, OfficerStatus, Priority, parse_date,
};
pub use workload::{
    BUSY_LIMIT, OfficerAvailability, OfficerWorkload, WorkloadClassification,
    availability_from_active_count, classify_workload, count_active_complaints, release_if_idle,
};
