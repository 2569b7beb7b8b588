// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_pulse_domain::{AdminId, CitizenId, OfficerId};

/// The party performing a lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Citizen(CitizenId),
    Officer(OfficerId),
    Admin(AdminId),
}

impl Actor {
    /// Returns the kind of actor as a lowercase label.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Citizen(_) => "citizen",
            Self::Officer(_) => "officer",
            Self::Admin(_) => "admin",
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Citizen(id) => write!(f, "citizen:{id}"),
            Self::Officer(id) => write!(f, "officer:{id}"),
            Self::Admin(id) => write!(f, "admin:{id}"),
        }
    }
}
