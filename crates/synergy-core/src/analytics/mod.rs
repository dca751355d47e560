//! Team and project analytics.

pub mod model;

use chrono::NaiveDate;

use crate::common::{percentage, Priority};
use crate::project::model::{Project, ProjectStatus};
use crate::task::{self, model::{Task, TaskStatus}};
use crate::user::model::User;
use crate::workspace::Workspace;
use model::{AnalyticsReport, DistributionEntry, MemberPerformance, ProjectAnalytics, Totals};

/// Completed share of `total` in percent; 0 when there are no tasks.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    percentage(completed as f64, total as f64)
}

fn rounded(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Build the full analytics report as of `today`.
pub fn report(workspace: &Workspace, today: NaiveDate) -> AnalyticsReport {
    let tasks = &workspace.tasks;
    let completed = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();

    let totals = Totals {
        projects: workspace.projects.len(),
        active_projects: workspace
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count(),
        tasks: tasks.len(),
        active_tasks: tasks.len() - completed,
        completed_tasks: completed,
        active_users: workspace.users.iter().filter(|u| !u.banned).count(),
        admins: workspace.users.iter().filter(|u| u.is_admin()).count(),
        completion_rate: rounded(completion_rate(completed, tasks.len())),
    };

    AnalyticsReport {
        totals,
        team_performance: team_performance(&workspace.users, tasks, today),
        projects: workspace
            .projects
            .iter()
            .map(|p| project_analytics(p, tasks, today))
            .collect(),
        status_distribution: status_distribution(tasks),
        priority_distribution: priority_distribution(tasks),
    }
}

/// Per-member figures for every non-banned user.
pub fn team_performance(users: &[User], tasks: &[Task], today: NaiveDate) -> Vec<MemberPerformance> {
    users
        .iter()
        .filter(|u| !u.banned)
        .map(|user| {
            let own: Vec<&Task> = tasks.iter().filter(|t| t.assignee_id == user.id).collect();
            let completed = own.iter().filter(|t| t.status == TaskStatus::Done).count();
            let time_tracked: f64 = own.iter().map(|t| t.time_tracked).sum();
            let estimated_time: f64 = own.iter().map(|t| t.estimated_hours).sum();

            MemberPerformance {
                user: user.clone(),
                total_tasks: own.len(),
                completed_tasks: completed,
                in_progress_tasks: own
                    .iter()
                    .filter(|t| t.status == TaskStatus::InProgress)
                    .count(),
                overdue_tasks: own.iter().filter(|t| task::is_overdue(t, today)).count(),
                completion_rate: completion_rate(completed, own.len()),
                efficiency: percentage(time_tracked, estimated_time),
                time_tracked,
                estimated_time,
            }
        })
        .collect()
}

pub fn project_analytics(project: &Project, tasks: &[Task], today: NaiveDate) -> ProjectAnalytics {
    let own: Vec<&Task> = tasks.iter().filter(|t| t.project_id == project.id).collect();
    let completed = own.iter().filter(|t| t.status == TaskStatus::Done).count();

    ProjectAnalytics {
        project: project.clone(),
        total_tasks: own.len(),
        completed_tasks: completed,
        completion_rate: completion_rate(completed, own.len()),
        overdue_tasks: own.iter().filter(|t| task::is_overdue(t, today)).count(),
        team_size: project.team_members.len(),
    }
}

/// Task counts per status: To Do, In Progress, Completed.
pub fn status_distribution(tasks: &[Task]) -> Vec<DistributionEntry> {
    TaskStatus::ALL
        .iter()
        .map(|status| {
            let count = tasks.iter().filter(|t| t.status == *status).count();
            distribution_entry(status.label(), count, tasks.len())
        })
        .collect()
}

/// Task counts per priority: High, Medium, Low.
pub fn priority_distribution(tasks: &[Task]) -> Vec<DistributionEntry> {
    Priority::ALL
        .iter()
        .map(|priority| {
            let count = tasks.iter().filter(|t| t.priority == *priority).count();
            distribution_entry(priority.label(), count, tasks.len())
        })
        .collect()
}

fn distribution_entry(label: &str, count: usize, total: usize) -> DistributionEntry {
    DistributionEntry {
        label: label.to_string(),
        count,
        percentage: rounded(percentage(count as f64, total as f64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 18).unwrap()
    }

    #[test]
    fn test_completion_rate_zero_tasks() {
        let rate = completion_rate(0, 0);
        assert_eq!(rate, 0.0);
        assert!(!rate.is_nan());
        assert_eq!(completion_rate(1, 4), 25.0);
    }

    #[test]
    fn test_totals() {
        let ws = seed::workspace();
        let report = report(&ws, today());
        assert_eq!(report.totals.projects, 5);
        assert_eq!(report.totals.active_projects, 3);
        assert_eq!(report.totals.tasks, 10);
        assert_eq!(report.totals.completed_tasks, 4);
        assert_eq!(report.totals.active_tasks, 6);
        assert_eq!(report.totals.active_users, 5);
        assert_eq!(report.totals.admins, 1);
        assert_eq!(report.totals.completion_rate, 40);
    }

    #[test]
    fn test_empty_workspace_has_no_nan() {
        let report = report(&Workspace::default(), today());
        assert_eq!(report.totals.completion_rate, 0);
        assert!(report.status_distribution.iter().all(|e| e.percentage == 0));
        assert!(report.team_performance.is_empty());
    }

    #[test]
    fn test_team_performance() {
        let mut ws = seed::workspace();
        ws.toggle_ban("4").unwrap();
        let team = team_performance(&ws.users, &ws.tasks, today());
        assert_eq!(team.len(), 4);
        assert!(team.iter().all(|m| m.user.id != "4"));

        // Sarah has no tasks.
        let sarah = team.iter().find(|m| m.user.id == "1").unwrap();
        assert_eq!(sarah.total_tasks, 0);
        assert_eq!(sarah.completion_rate, 0.0);
        assert_eq!(sarah.efficiency, 0.0);

        // Lisa: tasks 6 (done, 8/10h) and 7 (in progress, 6/12h, overdue).
        let lisa = team.iter().find(|m| m.user.id == "5").unwrap();
        assert_eq!(lisa.total_tasks, 2);
        assert_eq!(lisa.completed_tasks, 1);
        assert_eq!(lisa.in_progress_tasks, 1);
        assert_eq!(lisa.overdue_tasks, 1);
        assert_eq!(lisa.completion_rate, 50.0);
        assert_eq!(lisa.time_tracked, 14.0);
        assert_eq!(lisa.estimated_time, 22.0);
        assert!((lisa.efficiency - 63.636).abs() < 0.01);
    }

    #[test]
    fn test_project_analytics() {
        let ws = seed::workspace();
        let project = ws.project("1").unwrap();
        let analytics = project_analytics(project, &ws.tasks, today());
        assert_eq!(analytics.total_tasks, 3);
        assert_eq!(analytics.completed_tasks, 1);
        assert_eq!(analytics.overdue_tasks, 1);
        assert_eq!(analytics.team_size, 3);
        assert!((analytics.completion_rate - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_distributions() {
        let ws = seed::workspace();
        let status = status_distribution(&ws.tasks);
        let labels: Vec<&str> = status.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["To Do", "In Progress", "Completed"]);
        assert_eq!(status[2].count, 4);
        assert_eq!(status[2].percentage, 40);

        // High: 1, 2, 4, 6, 7, 10.
        let priority = priority_distribution(&ws.tasks);
        assert_eq!(priority[0].label, "High");
        assert_eq!(priority[0].count, 6);
        assert_eq!(priority[0].percentage, 60);
        assert_eq!(priority[2].count, 0);
    }
}
