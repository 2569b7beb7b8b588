// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum accepted evidence size (5 MiB).
pub const MAX_EVIDENCE_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted evidence content types.
pub const ALLOWED_EVIDENCE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// An evidence upload as received from the officer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceFile {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl EvidenceFile {
    /// Returns the file size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }
}

/// Strips media-type parameters and lowercases the essence.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Validates an evidence upload.
///
/// Checks run in order: non-empty, content type, size.
///
/// # Errors
///
/// Returns an error if:
/// - The file is empty
/// - The content type is not PNG or JPEG
/// - The file exceeds `MAX_EVIDENCE_BYTES`
pub fn validate_evidence(file: &EvidenceFile) -> Result<(), DomainError> {
    if file.bytes.is_empty() {
        return Err(DomainError::EmptyFile);
    }
    let content_type: String = essence(&file.content_type);
    if !ALLOWED_EVIDENCE_TYPES.contains(&content_type.as_str()) {
        return Err(DomainError::InvalidFileType {
            content_type: file.content_type.clone(),
        });
    }
    let size: u64 = file.size();
    if size > MAX_EVIDENCE_BYTES {
        return Err(DomainError::FileTooLarge {
            size,
            max: MAX_EVIDENCE_BYTES,
        });
    }
    Ok(())
}
