// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

/// Generates a numeric identifier newtype.
///
/// Entities reference each other through these identifiers only; the
/// repository resolves them.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a complaint.
    ComplaintId
);
entity_id!(
    /// Identifies an officer.
    OfficerId
);
entity_id!(
    /// Identifies the citizen who submitted a complaint.
    CitizenId
);
entity_id!(
    /// Identifies an admin.
    AdminId
);

/// Matches `value` case-insensitively against the wire names of `variants`.
fn parse_variant<T: Copy>(
    value: &str,
    variants: &[T],
    name: fn(T) -> &'static str,
    field: &'static str,
) -> Result<T, DomainError> {
    let trimmed: &str = value.trim();
    variants
        .iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| DomainError::InvalidTransition {
            field,
            value: value.to_string(),
        })
}

/// Complaint category. Officer departments share this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintCategory {
    Electricity,
    Water,
    Roads,
    Sanitation,
    Traffic,
    Crime,
    Cyber,
    Other,
}

impl ComplaintCategory {
    pub const ALL: [Self; 8] = [
        Self::Electricity,
        Self::Water,
        Self::Roads,
        Self::Sanitation,
        Self::Traffic,
        Self::Crime,
        Self::Cyber,
        Self::Other,
    ];

    /// Returns the wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electricity => "ELECTRICITY",
            Self::Water => "WATER",
            Self::Roads => "ROADS",
            Self::Sanitation => "SANITATION",
            Self::Traffic => "TRAFFIC",
            Self::Crime => "CRIME",
            Self::Cyber => "CYBER",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for ComplaintCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "category")
    }
}

/// Complaint priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the wire name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "priority")
    }
}

/// Complaint status.
///
/// `Pending` and `InProgress` count toward an officer's active workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Returns true if a complaint in this status occupies its officer.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl FromStr for ComplaintStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "status")
    }
}

/// Progress stage shown to the citizen.
///
/// Stage is independent of status; neither drives the other except where
/// a lifecycle operation sets both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStage {
    #[default]
    Registered,
    Verified,
    Assigned,
    InProgress,
    ActionTaken,
    Resolved,
}

impl ComplaintStage {
    pub const ALL: [Self; 6] = [
        Self::Registered,
        Self::Verified,
        Self::Assigned,
        Self::InProgress,
        Self::ActionTaken,
        Self::Resolved,
    ];

    /// Returns the wire name of the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Verified => "VERIFIED",
            Self::Assigned => "ASSIGNED",
            Self::InProgress => "IN_PROGRESS",
            Self::ActionTaken => "ACTION_TAKEN",
            Self::Resolved => "RESOLVED",
        }
    }
}

impl FromStr for ComplaintStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "stage")
    }
}

/// Persisted officer availability.
///
/// Only lifecycle operations write this field. The threshold-based
/// `OVERLOADED` tier lives in `WorkloadClassification` and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfficerStatus {
    #[default]
    Available,
    Busy,
}

impl OfficerStatus {
    pub const ALL: [Self; 2] = [Self::Available, Self::Busy];

    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Busy => "BUSY",
        }
    }
}

impl FromStr for OfficerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "officer_status")
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    ComplaintCategory,
    Priority,
    ComplaintStatus,
    ComplaintStage,
    OfficerStatus
);

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the value is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidDate {
            value: value.to_string(),
            error: e.to_string(),
        }
    })
}
