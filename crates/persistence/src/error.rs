// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The requested complaint was not found.
    ComplaintNotFound(i64),
    /// The requested officer was not found.
    OfficerNotFound(i64),
    /// The requested citizen was not found.
    CitizenNotFound(i64),
    /// A record with the same identifier already exists.
    Duplicate {
        /// The kind of record.
        entity: &'static str,
        /// The conflicting identifier.
        id: i64,
    },
    /// No identifier is left to allocate.
    IdExhausted {
        /// The kind of record.
        entity: &'static str,
    },
    /// A stored record references a record that does not exist.
    DanglingReference(String),
    /// Evidence storage failed.
    Storage(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ComplaintNotFound(id) => write!(f, "Complaint not found: {id}"),
            Self::OfficerNotFound(id) => write!(f, "Officer not found: {id}"),
            Self::CitizenNotFound(id) => write!(f, "Citizen not found: {id}"),
            Self::Duplicate { entity, id } => write!(f, "{entity} {id} already exists"),
            Self::IdExhausted { entity } => write!(f, "No {entity} identifiers left"),
            Self::DanglingReference(msg) => write!(f, "Dangling reference: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<crate::evidence_store::StorageError> for PersistenceError {
    fn from(err: crate::evidence_store::StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}
