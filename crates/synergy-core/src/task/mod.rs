//! Task views: visibility, filtering and due-date reporting.

pub mod model;

use chrono::NaiveDate;

use crate::common::contains_ci;
use crate::user::model::User;
use model::{DueState, Task, TaskFilter, TaskStatus};

pub use model::{NewTask, TaskUpdate};

/// Tasks visible to a user: all for admins, own assignments otherwise.
pub fn visible_tasks<'a>(tasks: &'a [Task], user: &User) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| user.is_admin() || t.assignee_id == user.id)
        .collect()
}

/// Filter tasks by search term (title, description), status, priority and
/// project.
pub fn filter_tasks<'a, I>(tasks: I, filter: &TaskFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|t| {
            let matches_search =
                contains_ci(&t.title, &filter.search) || contains_ci(&t.description, &filter.search);
            let matches_status = filter.status.map_or(true, |s| t.status == s);
            let matches_priority = filter.priority.map_or(true, |p| t.priority == p);
            let matches_project = filter
                .project_id
                .as_deref()
                .map_or(true, |id| t.project_id == id);
            matches_search && matches_status && matches_priority && matches_project
        })
        .collect()
}

/// Find a task by ID.
pub fn find<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == id)
}

/// A task is overdue when its due date has passed and it is not done.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date < today && task.status != TaskStatus::Done
}

/// Whole days from `today` until the due date; negative when past.
pub fn days_until_due(task: &Task, today: NaiveDate) -> i64 {
    (task.due_date - today).num_days()
}

/// Classify a task's due date.
pub fn due_state(task: &Task, today: NaiveDate) -> DueState {
    let days = days_until_due(task, today);
    if is_overdue(task, today) {
        DueState::Overdue(days.abs())
    } else if days == 0 {
        DueState::DueToday
    } else if days == 1 {
        DueState::DueTomorrow
    } else {
        DueState::DaysLeft(days)
    }
}

/// Human-readable due label, e.g. "3 days overdue" or "Due tomorrow".
pub fn due_label(task: &Task, today: NaiveDate) -> String {
    match due_state(task, today) {
        DueState::Overdue(days) => format!("{} days overdue", days),
        DueState::DueToday => "Due today".to_string(),
        DueState::DueTomorrow => "Due tomorrow".to_string(),
        DueState::DaysLeft(days) => format!("{} days left", days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Priority;
    use crate::seed;
    use crate::user;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_visible_tasks_by_role() {
        let ws = seed::workspace();
        let admin = user::find(&ws.users, "1").unwrap();
        let emily = user::find(&ws.users, "3").unwrap();

        assert_eq!(visible_tasks(&ws.tasks, admin).len(), ws.tasks.len());
        let ids: Vec<&str> = visible_tasks(&ws.tasks, emily)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "5", "9"]);
    }

    #[test]
    fn test_filter_tasks_combines_criteria() {
        let ws = seed::workspace();
        let filter = TaskFilter {
            search: "DASHBOARD".to_string(),
            ..Default::default()
        };
        let found = filter_tasks(&ws.tasks, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "9");

        let filter = TaskFilter {
            status: Some(TaskStatus::InProgress),
            priority: Some(Priority::High),
            project_id: Some("1".to_string()),
            ..Default::default()
        };
        let found = filter_tasks(&ws.tasks, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
        assert!(!filter.is_empty());
        assert!(TaskFilter::default().is_empty());
    }

    #[test]
    fn test_due_labels() {
        let ws = seed::workspace();
        let mut task = find(&ws.tasks, "1").unwrap().clone();
        task.due_date = day(2024, 4, 15);

        assert_eq!(due_label(&task, day(2024, 4, 18)), "3 days overdue");
        assert_eq!(due_label(&task, day(2024, 4, 15)), "Due today");
        assert_eq!(due_label(&task, day(2024, 4, 14)), "Due tomorrow");
        assert_eq!(due_label(&task, day(2024, 4, 10)), "5 days left");

        task.status = TaskStatus::Done;
        assert!(!is_overdue(&task, day(2024, 4, 18)));
        assert_eq!(due_state(&task, day(2024, 4, 18)), DueState::DaysLeft(-3));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TaskStatus::from_str("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_str("In-Progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_str("review"), None);
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
    }
}
