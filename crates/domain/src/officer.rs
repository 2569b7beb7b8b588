// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{ComplaintCategory, ComplaintId, OfficerId, OfficerStatus};

/// A field officer who works complaints in a single department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Officer {
    pub id: OfficerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Department; shares the complaint category enumeration.
    pub department: ComplaintCategory,
    /// Availability as last written by a lifecycle operation.
    pub status: OfficerStatus,
}

impl Officer {
    /// Creates a new officer with `Available` status.
    #[must_use]
    pub const fn new(
        id: OfficerId,
        name: String,
        email: String,
        phone: Option<String>,
        department: ComplaintCategory,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            department,
            status: OfficerStatus::Available,
        }
    }

    /// Checks that this officer may take a new assignment for a complaint
    /// in `category`.
    ///
    /// Department is checked before availability.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The department does not match the category
    /// - The officer is not `Available`
    pub fn ensure_assignable(
        &self,
        complaint_id: ComplaintId,
        category: ComplaintCategory,
    ) -> Result<(), DomainError> {
        if self.department != category {
            return Err(DomainError::DepartmentMismatch {
                complaint_id,
                category,
                officer_id: self.id,
                department: self.department,
            });
        }
        if self.status != OfficerStatus::Available {
            return Err(DomainError::OfficerUnavailable {
                officer_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }
}
