//! User directory views.

pub mod model;

use chrono::NaiveDate;

use crate::common::{contains_ci, percentage};
use crate::project::model::{Project, ProjectStatus};
use crate::task::{self, model::{Task, TaskStatus}};
use model::{User, UserFilter, UserStats, UserStatusFilter};

pub use model::{Performance, Role, Swot, UserUpdate};

/// Filter users by search term (name, email, title), role and ban status.
pub fn filter_users<'a>(users: &'a [User], filter: &UserFilter) -> Vec<&'a User> {
    users
        .iter()
        .filter(|u| {
            let matches_search = contains_ci(&u.name, &filter.search)
                || contains_ci(&u.email, &filter.search)
                || contains_ci(&u.title, &filter.search);
            let matches_role = filter.role.map_or(true, |r| u.role == r);
            let matches_status = match filter.status {
                UserStatusFilter::All => true,
                UserStatusFilter::Active => !u.banned,
                UserStatusFilter::Banned => u.banned,
            };
            matches_search && matches_role && matches_status
        })
        .collect()
}

/// Find a user by ID.
pub fn find<'a>(users: &'a [User], id: &str) -> Option<&'a User> {
    users.iter().find(|u| u.id == id)
}

/// Task statistics for one user.
pub fn user_stats(user: &User, tasks: &[Task], projects: &[Project], today: NaiveDate) -> UserStats {
    let user_tasks: Vec<&Task> = tasks.iter().filter(|t| t.assignee_id == user.id).collect();
    let completed = user_tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
    let in_progress = user_tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .count();
    let overdue = user_tasks
        .iter()
        .filter(|t| task::is_overdue(t, today))
        .count();
    let active_projects = projects
        .iter()
        .filter(|p| p.team_members.contains(&user.id) && p.status == ProjectStatus::Active)
        .count();

    UserStats {
        total_tasks: user_tasks.len(),
        completed_tasks: completed,
        in_progress_tasks: in_progress,
        overdue_tasks: overdue,
        completion_rate: percentage(completed as f64, user_tasks.len() as f64),
        active_projects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_filter_by_search_role_status() {
        let ws = seed::workspace();

        let filter = UserFilter {
            search: "SYNERGYSPHERE".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_users(&ws.users, &filter).len(), ws.users.len());

        let filter = UserFilter {
            role: Some(Role::Admin),
            ..Default::default()
        };
        let admins = filter_users(&ws.users, &filter);
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].id, "1");

        let filter = UserFilter {
            status: UserStatusFilter::Banned,
            ..Default::default()
        };
        assert!(filter_users(&ws.users, &filter).is_empty());

        let filter = UserFilter {
            search: "designer".to_string(),
            ..Default::default()
        };
        let found = filter_users(&ws.users, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Emily Davis");
    }

    #[test]
    fn test_user_stats() {
        let ws = seed::workspace();
        let john = find(&ws.users, "2").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 4, 18).unwrap();
        let stats = user_stats(john, &ws.tasks, &ws.projects, today);

        // Tasks 1, 3, 4, 8, 10 are John's; 8 is done.
        assert_eq!(stats.total_tasks, 5);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.in_progress_tasks, 2);
        // Due 2024-04-15 (task 1) is overdue; 04-20, 04-30, 05-01 are not.
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.completion_rate, 20.0);
        // Member of projects 1, 2 (active), 4 (completed), 5 (paused).
        assert_eq!(stats.active_projects, 2);
    }

    #[test]
    fn test_user_stats_without_tasks() {
        let ws = seed::workspace();
        let admin = find(&ws.users, "1").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 4, 18).unwrap();
        let stats = user_stats(admin, &ws.tasks, &ws.projects, today);
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }
}
