//! Role-scoped dashboard summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::project::{self, model::ProjectStatus};
use crate::task::{self, model::{DueState, Task, TaskStatus}};
use crate::user::model::User;
use crate::workspace::Workspace;

const RECENT_LIMIT: usize = 5;
const UPCOMING_LIMIT: usize = 5;

/// Dashboard figures for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub todo_tasks: usize,
    pub overdue_tasks: usize,
    pub active_projects: usize,
    pub average_progress: f64,
    /// Admin-only team counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamCounts>,
    pub recent_tasks: Vec<Task>,
    pub upcoming_deadlines: Vec<Deadline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCounts {
    pub active_members: usize,
    pub admins: usize,
}

/// An open task with its due-date state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub task: Task,
    pub due: DueState,
    pub label: String,
}

/// Compute the dashboard for `user` as of `today`.
pub fn dashboard(workspace: &Workspace, user: &User, today: NaiveDate) -> DashboardStats {
    let tasks = task::visible_tasks(&workspace.tasks, user);
    let projects = project::visible_projects(&workspace.projects, user);

    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

    let average_progress = if projects.is_empty() {
        0.0
    } else {
        projects.iter().map(|p| f64::from(p.progress)).sum::<f64>() / projects.len() as f64
    };

    let mut recent: Vec<&Task> = tasks.clone();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    let recent_tasks = recent.into_iter().take(RECENT_LIMIT).cloned().collect();

    let mut open: Vec<&Task> = tasks
        .iter()
        .copied()
        .filter(|t| t.status != TaskStatus::Done)
        .collect();
    open.sort_by_key(|t| t.due_date);
    let upcoming_deadlines = open
        .into_iter()
        .take(UPCOMING_LIMIT)
        .map(|t| Deadline {
            task: t.clone(),
            due: task::due_state(t, today),
            label: task::due_label(t, today),
        })
        .collect();

    let team = user.is_admin().then(|| TeamCounts {
        active_members: workspace.users.iter().filter(|u| !u.banned).count(),
        admins: workspace.users.iter().filter(|u| u.is_admin()).count(),
    });

    DashboardStats {
        total_tasks: tasks.len(),
        completed_tasks: count(TaskStatus::Done),
        in_progress_tasks: count(TaskStatus::InProgress),
        todo_tasks: count(TaskStatus::Todo),
        overdue_tasks: tasks.iter().filter(|t| task::is_overdue(t, today)).count(),
        active_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count(),
        average_progress,
        team,
        recent_tasks,
        upcoming_deadlines,
    }
}
