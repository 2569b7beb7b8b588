// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Startup fixtures.
//!
//! Officers, citizens and admins are managed outside this service. The
//! server loads them, plus any pre-existing complaints, from a JSON file.

use civic_pulse_domain::{
    AdminId, CitizenId, Complaint, ComplaintCategory, ComplaintId, ComplaintStage,
    ComplaintStatus, Feedback, NewComplaint, Officer, OfficerId, OfficerStatus, Priority,
};
use civic_pulse_persistence::{AdminData, CitizenData, Persistence, PersistenceError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

/// Errors that can occur while loading fixtures.
#[derive(Debug)]
pub enum SeedError {
    /// The fixture file could not be read.
    Io {
        /// The fixture path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The fixture is not valid JSON for the expected shape.
    Parse(serde_json::Error),
    /// A timestamp is not RFC 3339.
    Timestamp {
        /// The rejected value.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// A record was rejected by the repository.
    Persistence(PersistenceError),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read seed file {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "Invalid seed file: {err}"),
            Self::Timestamp { value, error } => {
                write!(f, "Invalid seed timestamp '{value}': {error}")
            }
            Self::Persistence(err) => write!(f, "Seed record rejected: {err}"),
        }
    }
}

impl std::error::Error for SeedError {}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SeedFile {
    admins: Vec<AdminData>,
    citizens: Vec<CitizenData>,
    officers: Vec<SeedOfficer>,
    complaints: Vec<SeedComplaint>,
}

#[derive(Debug, Deserialize)]
struct SeedOfficer {
    id: OfficerId,
    name: String,
    email: String,
    phone: Option<String>,
    department: ComplaintCategory,
    #[serde(default)]
    status: OfficerStatus,
}

#[derive(Debug, Deserialize)]
struct SeedComplaint {
    id: ComplaintId,
    citizen_id: CitizenId,
    title: String,
    description: String,
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    category: ComplaintCategory,
    priority: Option<Priority>,
    #[serde(default)]
    status: ComplaintStatus,
    #[serde(default)]
    stage: ComplaintStage,
    assigned_officer_id: Option<OfficerId>,
    assigned_admin_id: Option<AdminId>,
    submitted_at: Option<String>,
    image_url: Option<String>,
    feedback: Option<SeedFeedback>,
}

/// Citizen feedback is collected elsewhere and only carried here.
#[derive(Debug, Deserialize)]
struct SeedFeedback {
    rating: u8,
    officer_behaviour_rating: u8,
    resolution_status: String,
    timeliness: String,
    comment: Option<String>,
    image_url: Option<String>,
    #[serde(default)]
    reopened: bool,
    submitted_at: Option<String>,
}

impl SeedFeedback {
    fn into_feedback(self, now: OffsetDateTime) -> Result<Feedback, SeedError> {
        let submitted_at: OffsetDateTime = match self.submitted_at.as_deref() {
            Some(value) => parse_timestamp(value)?,
            None => now,
        };
        Ok(Feedback {
            rating: self.rating,
            officer_behaviour_rating: self.officer_behaviour_rating,
            resolution_status: self.resolution_status,
            timeliness: self.timeliness,
            comment: self.comment,
            image_url: self.image_url,
            reopened: self.reopened,
            submitted_at,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, SeedError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| SeedError::Timestamp {
        value: value.to_string(),
        error: e.to_string(),
    })
}

impl SeedComplaint {
    fn into_complaint(self, now: OffsetDateTime) -> Result<Complaint, SeedError> {
        let submitted_at: OffsetDateTime = match self.submitted_at.as_deref() {
            Some(value) => parse_timestamp(value)?,
            None => now,
        };
        let mut complaint: Complaint = Complaint::new(
            self.id,
            self.citizen_id,
            NewComplaint {
                title: self.title,
                description: self.description,
                location: self.location,
                latitude: self.latitude,
                longitude: self.longitude,
                category: self.category,
                priority: self.priority,
                image_url: self.image_url,
            },
            submitted_at,
        );
        complaint.set_status(self.status, now);
        complaint.stage = self.stage;
        complaint.assigned_officer = self.assigned_officer_id;
        complaint.assigned_admin = self.assigned_admin_id;
        if complaint.assigned_officer.is_some() {
            complaint.assigned_at = Some(submitted_at);
        }
        complaint.feedback = match self.feedback {
            Some(feedback) => Some(feedback.into_feedback(now)?),
            None => None,
        };
        Ok(complaint)
    }
}

/// Builds a repository from fixture JSON.
///
/// # Arguments
///
/// * `json` - The fixture document
/// * `now` - Stamped on seeded resolutions and missing submission times
///
/// # Errors
///
/// Returns an error if the document is malformed or a record is rejected
/// (duplicate id, unknown citizen or officer).
pub fn seed_from_str(json: &str, now: OffsetDateTime) -> Result<Persistence, SeedError> {
    let seed: SeedFile = serde_json::from_str(json).map_err(SeedError::Parse)?;
    let mut persistence: Persistence = Persistence::new_in_memory();

    let counts: (usize, usize, usize, usize) = (
        seed.admins.len(),
        seed.citizens.len(),
        seed.officers.len(),
        seed.complaints.len(),
    );

    for admin in seed.admins {
        persistence
            .insert_admin(admin)
            .map_err(SeedError::Persistence)?;
    }
    for citizen in seed.citizens {
        persistence
            .insert_citizen(citizen)
            .map_err(SeedError::Persistence)?;
    }
    for officer in seed.officers {
        let mut record: Officer = Officer::new(
            officer.id,
            officer.name,
            officer.email,
            officer.phone,
            officer.department,
        );
        record.status = officer.status;
        persistence
            .insert_officer(record)
            .map_err(SeedError::Persistence)?;
    }
    for complaint in seed.complaints {
        persistence
            .insert_complaint(complaint.into_complaint(now)?)
            .map_err(SeedError::Persistence)?;
    }

    info!(
        admins = counts.0,
        citizens = counts.1,
        officers = counts.2,
        complaints = counts.3,
        "Loaded seed data"
    );
    Ok(persistence)
}

/// Reads and applies a fixture file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is rejected by
/// [`seed_from_str`].
pub fn load_seed(path: &Path) -> Result<Persistence, SeedError> {
    let json: String = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    seed_from_str(&json, OffsetDateTime::now_utc())
}
