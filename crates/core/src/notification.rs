// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_pulse_domain::{AdminId, CitizenId, ComplaintId, OfficerId};
use serde::{Deserialize, Serialize};

/// Where a notification is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Channel {
    /// A single citizen's queue.
    Citizen(CitizenId),
    /// A single officer's queue.
    Officer(OfficerId),
    /// A single admin's queue.
    Admin(AdminId),
    /// The topic every admin listens on.
    AdminBroadcast,
}

impl Channel {
    /// Returns the channel key used by subscribers (`citizen:4`, `admins`, ...).
    #[must_use]
    pub fn key(self) -> String {
        match self {
            Self::Citizen(id) => format!("citizen:{id}"),
            Self::Officer(id) => format!("officer:{id}"),
            Self::Admin(id) => format!("admin:{id}"),
            Self::AdminBroadcast => String::from("admins"),
        }
    }
}

/// A lifecycle event addressed to one channel.
///
/// Notifications are produced by `apply` and published only after the
/// transition has been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub channel: Channel,
    pub complaint_id: ComplaintId,
    pub message: String,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub const fn new(channel: Channel, complaint_id: ComplaintId, message: String) -> Self {
        Self {
            channel,
            complaint_id,
            message,
        }
    }
}
