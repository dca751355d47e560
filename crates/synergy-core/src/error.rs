//! Centralized error types for SynergySphere.

use thiserror::Error;

/// Main error type for SynergySphere operations.
#[derive(Error, Debug)]
pub enum SynergyError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Discussion not found: {0}")]
    DiscussionNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(#[from] synergy_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for SynergySphere operations.
pub type SynergyResult<T> = Result<T, SynergyError>;

impl SynergyError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a permission error.
    pub fn permission(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Whether the error refers to a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::TaskNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::DiscussionNotFound(_)
        )
    }
}
