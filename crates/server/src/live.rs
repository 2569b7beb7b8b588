// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live notification streaming.
//!
//! Committed lifecycle transitions publish their notifications here. Each
//! WebSocket client subscribes to one channel key (`citizen:4`,
//! `officer:7`, `admin:1` or `admins`) and receives only the notifications
//! addressed to it.
//!
//! # Architecture
//!
//! - Delivery is at-most-once; nothing is persisted or replayed
//! - Notifications published before a client subscribes are never seen
//! - No commands are accepted over WebSocket connections
//! - Clients must still query the HTTP API for authoritative complaint data

use axum::{
    extract::{
        Query, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use civic_pulse::Notification;
use civic_pulse_api::{NotificationPublisher, PublishError};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of notifications to buffer in the broadcast channel.
/// Slow clients lose the oldest notifications first.
const EVENT_BUFFER_SIZE: usize = 100;

/// Frames sent to live clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// The channel key the client subscribed to.
        channel: String,
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
    /// A lifecycle notification addressed to the client's channel.
    Notification {
        /// The complaint the notification is about.
        complaint_id: i64,
        /// The notification text.
        message: String,
    },
}

impl LiveEvent {
    fn from_notification(notification: &Notification) -> Self {
        Self::Notification {
            complaint_id: notification.complaint_id.value(),
            message: notification.message.clone(),
        }
    }
}

/// Query parameters for the live endpoint.
#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    /// The channel key to subscribe to.
    pub channel: String,
}

/// Fans committed notifications out to WebSocket subscribers.
#[derive(Clone)]
pub struct LiveNotifier {
    tx: broadcast::Sender<Notification>,
}

impl LiveNotifier {
    /// Creates a new notifier.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Subscribes to every future notification.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for LiveNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPublisher for LiveNotifier {
    fn publish(&self, notification: &Notification) -> Result<(), PublishError> {
        match self.tx.send(notification.clone()) {
            Ok(receivers) => {
                debug!(
                    channel = %notification.channel.key(),
                    complaint_id = %notification.complaint_id,
                    receivers,
                    "Published notification"
                );
            }
            Err(_) => {
                // Nobody is listening, which is fine.
                debug!(
                    channel = %notification.channel.key(),
                    "No subscribers for notification"
                );
            }
        }
        Ok(())
    }
}

/// Handles WebSocket upgrade requests for `/live?channel=...`.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `query` - The channel key to subscribe to
/// * `notifier` - The live notifier from application state
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<LiveQuery>,
    AxumState(notifier): AxumState<Arc<LiveNotifier>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, notifier, query.channel))
}

/// Streams notifications for one channel until the client disconnects.
async fn handle_socket(socket: WebSocket, notifier: Arc<LiveNotifier>, channel: String) {
    info!(channel = %channel, "Client subscribed to live notifications");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<Notification> = notifier.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        channel: channel.clone(),
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!(channel = %channel, "Failed to send connection confirmation");
        return;
    }

    let subscription: String = channel.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            let notification: Notification = match rx.recv().await {
                Ok(notification) => notification,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(channel = %subscription, skipped, "Live client lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            if notification.channel.key() != subscription {
                continue;
            }
            match serde_json::to_string(&LiveEvent::from_notification(&notification)) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live notification");
                }
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from live client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    info!(channel = %channel, "Client disconnected from live notifications");
}
