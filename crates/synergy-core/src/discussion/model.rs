//! Discussion domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project discussion message with nested replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Discussion>,
}

impl Discussion {
    /// Messages in this thread including nested replies.
    pub fn message_count(&self) -> usize {
        1 + self.replies.iter().map(Discussion::message_count).sum::<usize>()
    }

    /// Find a message anywhere in this thread.
    pub fn find(&self, id: &str) -> Option<&Discussion> {
        if self.id == id {
            return Some(self);
        }
        self.replies.iter().find_map(|r| r.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Discussion> {
        if self.id == id {
            return Some(self);
        }
        self.replies.iter_mut().find_map(|r| r.find_mut(id))
    }
}
