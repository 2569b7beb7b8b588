// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Civic Pulse grievance system.
//!
//! This crate owns the complaint, officer, citizen and admin records and the
//! officer evidence files. Records live in an in-memory repository keyed by
//! identifier; entities reference one another by id only and are resolved
//! here.
//!
//! ## Transition Scope
//!
//! Every lifecycle operation follows the same shape:
//!
//! 1. `load_state` reads the complaint, the relevant officer and that
//!    officer's active count outside the complaint
//! 2. the lifecycle engine validates and produces new snapshots
//! 3. `commit` writes the snapshots back
//!
//! Callers hold the repository behind a single lock for all three steps, so
//! operations on the same complaint or officer serialize.
//!
//! ## Evidence Files
//!
//! `LocalEvidenceStorage` writes evidence under a configured directory using
//! a random prefix, and reports the public `/uploads/officer/...` URL that is
//! recorded on the complaint.

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
#![allow(clippy::multiple_crate_versions)]

use civic_pulse_domain::{AdminId, CitizenId, Complaint, ComplaintId, Officer, OfficerId};
use std::collections::BTreeMap;

mod data_models;
mod error;
mod evidence_store;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{AdminData, CitizenData};
pub use error::PersistenceError;
pub use evidence_store::{EVIDENCE_URL_PREFIX, LocalEvidenceStorage, StorageError, StoredEvidence};

/// In-memory repository for complaints and the parties that act on them.
#[derive(Debug, Default)]
pub struct Persistence {
    pub(crate) complaints: BTreeMap<ComplaintId, Complaint>,
    pub(crate) officers: BTreeMap<OfficerId, Officer>,
    pub(crate) citizens: BTreeMap<CitizenId, CitizenData>,
    pub(crate) admins: BTreeMap<AdminId, AdminData>,
    pub(crate) last_complaint_id: i64,
}

impl Persistence {
    /// Creates an empty repository.
    #[must_use]
    pub fn new_in_memory() -> Self {
        Self::default()
    }
}
