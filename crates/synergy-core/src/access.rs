//! Role-based permission checks.
//!
//! Admins manage projects and users. Employees work inside the projects
//! they belong to and on the tasks assigned to them.

use crate::error::{SynergyError, SynergyResult};
use crate::project::model::Project;
use crate::task::model::{NewTask, Task};
use crate::user::model::User;

pub fn require_admin(user: &User, action: &str) -> SynergyResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(SynergyError::permission(format!("only admins can {}", action)))
    }
}

pub fn can_view_project(user: &User, project: &Project) -> bool {
    user.is_admin() || project.team_members.contains(&user.id)
}

pub fn can_view_task(user: &User, task: &Task) -> bool {
    user.is_admin() || task.assignee_id == user.id
}

pub fn require_project_access(user: &User, project: &Project) -> SynergyResult<()> {
    if can_view_project(user, project) {
        Ok(())
    } else {
        Err(SynergyError::permission(format!(
            "{} is not a member of {}",
            user.name, project.name
        )))
    }
}

/// Status changes are allowed for the assignee and for admins.
pub fn require_task_update(user: &User, task: &Task) -> SynergyResult<()> {
    if can_view_task(user, task) {
        Ok(())
    } else {
        Err(SynergyError::permission("task is assigned to someone else"))
    }
}

/// Deleting tasks is an admin action.
pub fn require_task_delete(user: &User) -> SynergyResult<()> {
    require_admin(user, "delete tasks")
}

/// Prepare a new task for `user`. Employees always assign to themselves
/// and may only add tasks to projects they belong to.
pub fn prepare_new_task(user: &User, project: &Project, mut input: NewTask) -> SynergyResult<NewTask> {
    if user.is_admin() {
        return Ok(input);
    }
    require_project_access(user, project)?;
    input.assignee_id = user.id.clone();
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Priority;
    use crate::seed;
    use chrono::NaiveDate;

    fn new_task(project_id: &str, assignee_id: &str) -> NewTask {
        NewTask {
            title: "Review copy".to_string(),
            description: String::new(),
            project_id: project_id.to_string(),
            assignee_id: assignee_id.to_string(),
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            estimated_hours: 2.0,
            tags: vec![],
        }
    }

    #[test]
    fn test_admin_only_actions() {
        let ws = seed::workspace();
        assert!(require_admin(ws.user("1").unwrap(), "create projects").is_ok());

        let err = require_admin(ws.user("2").unwrap(), "create projects").unwrap_err();
        assert_eq!(err.to_string(), "Permission denied: only admins can create projects");
        assert!(require_task_delete(ws.user("2").unwrap()).is_err());
    }

    #[test]
    fn test_task_update_rights() {
        let ws = seed::workspace();
        let task = ws.task("1").unwrap(); // John's
        assert!(require_task_update(ws.user("2").unwrap(), task).is_ok());
        assert!(require_task_update(ws.user("1").unwrap(), task).is_ok());
        assert!(require_task_update(ws.user("3").unwrap(), task).is_err());
    }

    #[test]
    fn test_employee_task_is_self_assigned() {
        let ws = seed::workspace();
        let emily = ws.user("3").unwrap();
        let project = ws.project("1").unwrap();

        let prepared = prepare_new_task(emily, project, new_task("1", "2")).unwrap();
        assert_eq!(prepared.assignee_id, "3");

        // Emily is not on project 3.
        let other = ws.project("3").unwrap();
        assert!(prepare_new_task(emily, other, new_task("3", "")).is_err());

        let admin = ws.user("1").unwrap();
        let prepared = prepare_new_task(admin, other, new_task("3", "5")).unwrap();
        assert_eq!(prepared.assignee_id, "5");
    }
}
