// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort notification dispatch.
//!
//! Delivery is at-most-once. A failed publish is logged and dropped; it
//! never undoes the committed transition that produced it.

use civic_pulse::Notification;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors a notification publisher may report.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("notification transport is closed")]
    Closed,
    #[error("failed to encode notification: {0}")]
    Encode(String),
}

/// Delivers notifications to subscribers.
pub trait NotificationPublisher: Send + Sync {
    /// Publishes one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be handed to the
    /// transport.
    fn publish(&self, notification: &Notification) -> Result<(), PublishError>;
}

/// A publisher that drops everything. Used where no transport is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPublisher;

impl NotificationPublisher for NullPublisher {
    fn publish(&self, notification: &Notification) -> Result<(), PublishError> {
        debug!(
            channel = %notification.channel.key(),
            complaint_id = %notification.complaint_id,
            "Dropping notification: no publisher configured"
        );
        Ok(())
    }
}

/// Publishes each notification, logging and swallowing failures.
///
/// Returns the number of notifications handed to the publisher.
pub fn dispatch(publisher: &dyn NotificationPublisher, notifications: &[Notification]) -> usize {
    let mut delivered: usize = 0;
    for notification in notifications {
        match publisher.publish(notification) {
            Ok(()) => delivered += 1,
            Err(err) => warn!(
                channel = %notification.channel.key(),
                complaint_id = %notification.complaint_id,
                error = %err,
                "Failed to publish notification"
            ),
        }
    }
    delivered
}
