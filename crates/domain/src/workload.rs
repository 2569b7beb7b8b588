// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer workload derivation.
//!
//! Two views are kept apart on purpose:
//!
//! - `OfficerAvailability` reports the persisted `OfficerStatus`, which only
//!   lifecycle operations write.
//! - `OfficerWorkload` classifies the live active-complaint count into
//!   `Available` / `Busy` / `Overloaded` and is never persisted.

use crate::complaint::Complaint;
use crate::officer::Officer;
use crate::types::{ComplaintCategory, OfficerId, OfficerStatus};
use serde::{Deserialize, Serialize};

/// The highest active count still classified as `Busy`.
pub const BUSY_LIMIT: u64 = 3;

/// Derived workload tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkloadClassification {
    Available,
    Busy,
    Overloaded,
}

impl WorkloadClassification {
    /// Returns the wire name of the classification.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Busy => "BUSY",
            Self::Overloaded => "OVERLOADED",
        }
    }
}

impl std::fmt::Display for WorkloadClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an active-complaint count.
///
/// 0 is `Available`, 1 through `BUSY_LIMIT` is `Busy`, anything above is
/// `Overloaded`.
#[must_use]
pub const fn classify_workload(active: u64) -> WorkloadClassification {
    if active == 0 {
        WorkloadClassification::Available
    } else if active <= BUSY_LIMIT {
        WorkloadClassification::Busy
    } else {
        WorkloadClassification::Overloaded
    }
}

/// Counts complaints assigned to `officer` whose status is active.
///
/// Soft-deleted complaints are included when their status is active.
#[must_use]
pub fn count_active_complaints<'a, I>(complaints: I, officer: OfficerId) -> u64
where
    I: IntoIterator<Item = &'a Complaint>,
{
    complaints
        .into_iter()
        .filter(|c| c.is_active_for(officer))
        .fold(0, |acc, _| acc + 1)
}

/// Persisted status after an officer-side update: idle officers become
/// `Available`, everyone else `Busy`.
#[must_use]
pub const fn availability_from_active_count(active: u64) -> OfficerStatus {
    if active == 0 {
        OfficerStatus::Available
    } else {
        OfficerStatus::Busy
    }
}

/// Persisted status after an admin resolution: the officer is released
/// only when nothing active remains, otherwise `current` is kept.
#[must_use]
pub const fn release_if_idle(current: OfficerStatus, active: u64) -> OfficerStatus {
    if active == 0 {
        OfficerStatus::Available
    } else {
        current
    }
}

/// Admin-facing raw availability row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerAvailability {
    pub officer_id: OfficerId,
    pub name: String,
    pub department: ComplaintCategory,
    pub active_complaints: u64,
    pub status: OfficerStatus,
}

impl OfficerAvailability {
    /// Reports the officer's persisted status alongside the active count.
    #[must_use]
    pub fn recorded(officer: &Officer, active_complaints: u64) -> Self {
        Self {
            officer_id: officer.id,
            name: officer.name.clone(),
            department: officer.department,
            active_complaints,
            status: officer.status,
        }
    }
}

/// Derived workload row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerWorkload {
    pub officer_id: OfficerId,
    pub name: String,
    pub department: ComplaintCategory,
    pub active_complaints: u64,
    pub classification: WorkloadClassification,
}

impl OfficerWorkload {
    /// Classifies the officer from the active count.
    #[must_use]
    pub fn derive(officer: &Officer, active_complaints: u64) -> Self {
        Self {
            officer_id: officer.id,
            name: officer.name.clone(),
            department: officer.department,
            active_complaints,
            classification: classify_workload(active_complaints),
        }
    }
}
