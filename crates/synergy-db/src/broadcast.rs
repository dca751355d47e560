//! Shared broadcast channel for real-time updates.
//!
//! The web server forwards these to WebSocket clients; the CLI posts them to
//! `/internal/notify` so a running dashboard refreshes after CLI changes.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// WebSocket message types for real-time updates.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    /// A task was created, edited or moved.
    TaskUpdated { task_id: String, status: String },
    /// A task was deleted.
    TaskDeleted { task_id: String },
    /// A project was created or edited.
    ProjectUpdated { project_id: String },
    /// A project and its tasks were deleted.
    ProjectDeleted { project_id: String },
    /// A user record changed (profile edit, ban toggle).
    UserUpdated { user_id: String },
    /// Notifications for a user changed.
    NotificationsChanged { user_id: String },
    /// A discussion thread received a message.
    DiscussionPosted { project_id: String },
    /// The logged-in identity changed.
    SessionChanged,
    /// Request a full dashboard refresh.
    DashboardRefresh,
}

/// Type alias for the broadcast sender.
pub type BroadcastSender = broadcast::Sender<WebSocketMessage>;

/// Type alias for the broadcast receiver.
pub type BroadcastReceiver = broadcast::Receiver<WebSocketMessage>;

/// Create a new broadcast channel with default capacity.
pub fn create_broadcast_channel() -> BroadcastSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_shape() {
        let msg = WebSocketMessage::TaskUpdated {
            task_id: "t1".to_string(),
            status: "done".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "TaskUpdated");
        assert_eq!(json["data"]["task_id"], "t1");

        let refresh: WebSocketMessage =
            serde_json::from_str(r#"{"type":"DashboardRefresh"}"#).unwrap();
        assert_eq!(refresh, WebSocketMessage::DashboardRefresh);
    }
}
