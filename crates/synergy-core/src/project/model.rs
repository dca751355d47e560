//! Project domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::Priority;

/// A team project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Percent, 0-100.
    pub progress: u8,
    pub team_members: Vec<String>,
    pub admin_id: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    pub tags: Vec<String>,
}

impl Project {
    /// Apply a partial update.
    pub fn apply(&mut self, update: ProjectUpdate) {
        if let Some(v) = update.name {
            self.name = v;
        }
        if let Some(v) = update.description {
            self.description = v;
        }
        if let Some(v) = update.status {
            self.status = v;
        }
        if let Some(v) = update.start_date {
            self.start_date = v;
        }
        if let Some(v) = update.end_date {
            self.end_date = v;
        }
        if let Some(v) = update.progress {
            self.progress = v.min(100);
        }
        if let Some(v) = update.team_members {
            self.team_members = v;
        }
        if let Some(v) = update.priority {
            self.priority = v;
        }
        if let Some(v) = update.budget {
            self.budget = Some(v);
        }
        if let Some(v) = update.tags {
            self.tags = v;
        }
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "paused" => Some(Self::Paused),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

/// Input for creating a project. Status, progress and owner are set by the
/// workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: Option<u8>,
    pub team_members: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub budget: Option<u64>,
    pub tags: Option<Vec<String>>,
}

/// Filter for the projects view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

/// Task counts shown on a project card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Team member ids that resolve to known users.
    pub members: Vec<String>,
}
