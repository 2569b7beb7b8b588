// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_pulse_domain::EvidenceFile;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Public URL prefix recorded on complaints for stored evidence.
pub const EVIDENCE_URL_PREFIX: &str = "/uploads/officer/";

const FALLBACK_FILE_NAME: &str = "evidence";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write evidence file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a stored evidence file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvidence {
    /// The generated file name (`{uuid}_{original}`).
    pub file_name: String,
    /// The absolute or relative path on disk.
    pub path: PathBuf,
    /// The public URL to record on the complaint.
    pub url: String,
}

/// Stores officer evidence on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalEvidenceStorage {
    root: PathBuf,
}

impl LocalEvidenceStorage {
    /// Creates a storage rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `file` under the root as `{uuid}_{original name}`.
    ///
    /// The original name is reduced to its final path component. An existing
    /// file with the generated name is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn store(&self, file: &EvidenceFile) -> Result<StoredEvidence, StorageError> {
        std::fs::create_dir_all(&self.root).map_err(|source| StorageError::CreateDir {
            path: self.root.clone(),
            source,
        })?;

        let file_name: String = format!(
            "{}_{}",
            Uuid::new_v4(),
            sanitize_file_name(&file.original_name)
        );
        let path: PathBuf = self.root.join(&file_name);

        std::fs::write(&path, &file.bytes).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = file.bytes.len(), "Stored evidence file");

        Ok(StoredEvidence {
            url: format!("{EVIDENCE_URL_PREFIX}{file_name}"),
            file_name,
            path,
        })
    }

    /// Removes a stored file. Used to clean up after a failed commit.
    pub fn discard(&self, stored: &StoredEvidence) {
        if let Err(err) = std::fs::remove_file(&stored.path) {
            debug!(path = %stored.path.display(), error = %err, "Failed to remove evidence file");
        }
    }
}

/// Keeps only the final component of a client-supplied file name.
fn sanitize_file_name(original: &str) -> String {
    original
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}
