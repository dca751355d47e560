//! Analytics report types.

use serde::{Deserialize, Serialize};

use crate::project::model::Project;
use crate::user::model::User;

/// Workspace-wide analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub totals: Totals,
    pub team_performance: Vec<MemberPerformance>,
    pub projects: Vec<ProjectAnalytics>,
    pub status_distribution: Vec<DistributionEntry>,
    pub priority_distribution: Vec<DistributionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub projects: usize,
    pub active_projects: usize,
    pub tasks: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    pub active_users: usize,
    pub admins: usize,
    /// Whole percent.
    pub completion_rate: u32,
}

/// Task figures for one non-banned member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPerformance {
    pub user: User,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    pub completion_rate: f64,
    /// Tracked over estimated hours, in percent.
    pub efficiency: f64,
    pub time_tracked: f64,
    pub estimated_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalytics {
    pub project: Project,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: f64,
    pub overdue_tasks: usize,
    pub team_size: usize,
}

/// One bar of a distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
    /// Whole percent of all tasks.
    pub percentage: u32,
}
