// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_pulse_domain::{AdminId, CitizenId};
use serde::{Deserialize, Serialize};

/// A registered citizen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenData {
    pub id: CitizenId,
    pub name: String,
    pub email: String,
}

/// A registered admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminData {
    pub id: AdminId,
    pub name: String,
    pub email: String,
}
