//! Notifications: construction helpers and per-user views.

pub mod model;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use model::{Notification, NotificationKind, ReadFilter};

/// Build an unread notification stamped now.
pub fn new_notification(
    user_id: &str,
    kind: NotificationKind,
    title: &str,
    message: String,
    action_url: Option<String>,
) -> Notification {
    Notification {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        kind,
        title: title.to_string(),
        message,
        timestamp: Utc::now(),
        read: false,
        action_url,
    }
}

/// Notifications addressed to a user, in stored order (newest first).
pub fn for_user<'a>(notifications: &'a [Notification], user_id: &str) -> Vec<&'a Notification> {
    notifications.iter().filter(|n| n.user_id == user_id).collect()
}

/// A user's notifications narrowed by read state.
pub fn filter<'a>(
    notifications: &'a [Notification],
    user_id: &str,
    read_filter: ReadFilter,
) -> Vec<&'a Notification> {
    for_user(notifications, user_id)
        .into_iter()
        .filter(|n| read_filter.matches(n))
        .collect()
}

/// Number of unread notifications for a user.
pub fn unread_count(notifications: &[Notification], user_id: &str) -> usize {
    notifications
        .iter()
        .filter(|n| n.user_id == user_id && !n.read)
        .count()
}

/// Relative age: "Just now", "5m ago", "3h ago", "2d ago", then the date.
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }
    timestamp.format("%Y-%m-%d").to_string()
}
