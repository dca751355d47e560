//! The in-memory workspace and its mutations.
//!
//! Every mutation is a synchronous transformation of the collections held
//! here. Notification side effects are prepended to `notifications` so the
//! list stays newest-first.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::discussion::{self, model::Discussion};
use crate::error::{SynergyError, SynergyResult};
use crate::notification::{self, model::{Notification, NotificationKind}};
use crate::profile::ProfileUpdate;
use crate::project::model::{NewProject, Project, ProjectStatus, ProjectUpdate};
use crate::task::model::{NewTask, Task, TaskStatus, TaskUpdate};
use crate::user::model::{User, UserUpdate};

/// All dashboard state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub discussions: Vec<Discussion>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Result of deleting a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeletion {
    pub project: Project,
    pub removed_tasks: usize,
}

impl Workspace {
    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn user(&self, id: &str) -> SynergyResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| SynergyError::UserNotFound(id.to_string()))
    }

    pub fn project(&self, id: &str) -> SynergyResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| SynergyError::ProjectNotFound(id.to_string()))
    }

    pub fn task(&self, id: &str) -> SynergyResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SynergyError::TaskNotFound(id.to_string()))
    }

    pub fn notification(&self, id: &str) -> SynergyResult<&Notification> {
        self.notifications
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| SynergyError::NotificationNotFound(id.to_string()))
    }

    pub fn discussion(&self, id: &str) -> SynergyResult<&Discussion> {
        discussion::find(&self.discussions, id)
            .ok_or_else(|| SynergyError::DiscussionNotFound(id.to_string()))
    }

    /// First non-banned user with exactly this email.
    pub fn active_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email && !u.banned)
    }

    /// Unread notifications addressed to a user.
    pub fn unread_count(&self, user_id: &str) -> usize {
        notification::unread_count(&self.notifications, user_id)
    }

    fn push_notification(&mut self, notification: Notification) {
        debug!(
            user_id = %notification.user_id,
            kind = notification.kind.as_str(),
            "Notification created"
        );
        self.notifications.insert(0, notification);
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    /// Create a project owned by `actor`. New projects start active at 0%.
    pub fn create_project(&mut self, actor: &str, input: NewProject) -> SynergyResult<Project> {
        if input.name.trim().is_empty() {
            return Err(SynergyError::validation("Project name is required"));
        }
        if input.end_date < input.start_date {
            return Err(SynergyError::validation(
                "Project end date must not precede its start date",
            ));
        }

        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            status: ProjectStatus::Active,
            start_date: input.start_date,
            end_date: input.end_date,
            progress: 0,
            team_members: input.team_members,
            admin_id: actor.to_string(),
            priority: input.priority,
            budget: input.budget,
            tags: input.tags,
        };

        debug!(project_id = %project.id, name = %project.name, "Project created");
        self.projects.insert(0, project.clone());
        Ok(project)
    }

    /// Merge an update into a project and notify the acting user.
    pub fn update_project(
        &mut self,
        actor: Option<&str>,
        id: &str,
        update: ProjectUpdate,
    ) -> SynergyResult<Project> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SynergyError::ProjectNotFound(id.to_string()))?;

        let previous_name = project.name.clone();
        project.apply(update);
        let updated = project.clone();

        if let Some(actor) = actor {
            self.push_notification(notification::new_notification(
                actor,
                NotificationKind::ProjectUpdate,
                "Project Updated",
                format!("Project \"{}\" has been updated", previous_name),
                Some(format!("/projects/{}", id)),
            ));
        }

        debug!(project_id = %id, "Project updated");
        Ok(updated)
    }

    /// Delete a project together with every task that references it.
    pub fn delete_project(&mut self, id: &str) -> SynergyResult<ProjectDeletion> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SynergyError::ProjectNotFound(id.to_string()))?;
        let project = self.projects.remove(index);

        let before = self.tasks.len();
        self.tasks.retain(|t| t.project_id != id);
        let removed_tasks = before - self.tasks.len();

        debug!(project_id = %id, removed_tasks, "Project deleted");
        Ok(ProjectDeletion {
            project,
            removed_tasks,
        })
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Create a task assigned by `actor`. Notifies the assignee, if any.
    pub fn create_task(&mut self, actor: &str, input: NewTask) -> SynergyResult<Task> {
        if input.title.trim().is_empty() {
            return Err(SynergyError::validation("Task title is required"));
        }
        if input.estimated_hours < 0.0 {
            return Err(SynergyError::validation("Estimated hours must not be negative"));
        }
        self.project(&input.project_id)?;

        let assignee_name = if input.assignee_id.is_empty() {
            None
        } else {
            Some(self.user(&input.assignee_id)?.name.clone())
        };

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            project_id: input.project_id,
            assignee_id: input.assignee_id,
            assigned_by: actor.to_string(),
            status: TaskStatus::Todo,
            priority: input.priority,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            time_tracked: 0.0,
            estimated_hours: input.estimated_hours,
            tags: input.tags,
        };
        self.tasks.insert(0, task.clone());
        debug!(task_id = %task.id, title = %task.title, "Task created");

        if assignee_name.is_some() {
            self.push_notification(notification::new_notification(
                &task.assignee_id,
                NotificationKind::TaskAssigned,
                "New Task Assigned",
                format!("You have been assigned \"{}\"", task.title),
                Some(format!("/tasks/{}", task.id)),
            ));
        }

        Ok(task)
    }

    /// Merge an update into a task and stamp `updatedAt`.
    ///
    /// Moving a task into `done` from any other status notifies the acting
    /// user once, naming the assignee it had before the update.
    pub fn update_task(
        &mut self,
        actor: Option<&str>,
        id: &str,
        update: TaskUpdate,
    ) -> SynergyResult<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SynergyError::TaskNotFound(id.to_string()))?;

        let was_done = task.status == TaskStatus::Done;
        let completes = update.status == Some(TaskStatus::Done) && !was_done;
        let previous_title = task.title.clone();
        let previous_assignee = task.assignee_id.clone();

        task.apply(update);
        task.updated_at = Utc::now();
        let updated = task.clone();

        if completes {
            let assignee = self
                .users
                .iter()
                .find(|u| u.id == previous_assignee)
                .map(|u| u.name.clone());
            if let (Some(assignee), Some(actor)) = (assignee, actor) {
                self.push_notification(notification::new_notification(
                    actor,
                    NotificationKind::TaskCompleted,
                    "Task Completed",
                    format!("\"{}\" has been completed by {}", previous_title, assignee),
                    Some(format!("/tasks/{}", id)),
                ));
            }
        }

        debug!(task_id = %id, status = updated.status.as_str(), "Task updated");
        Ok(updated)
    }

    pub fn delete_task(&mut self, id: &str) -> SynergyResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SynergyError::TaskNotFound(id.to_string()))?;
        debug!(task_id = %id, "Task deleted");
        Ok(self.tasks.remove(index))
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> SynergyResult<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| SynergyError::UserNotFound(id.to_string()))?;
        user.apply(update);
        debug!(user_id = %id, "User updated");
        Ok(user.clone())
    }

    /// Flip a user's ban flag.
    pub fn toggle_ban(&mut self, id: &str) -> SynergyResult<User> {
        let banned = self.user(id)?.banned;
        self.update_user(
            id,
            UserUpdate {
                banned: Some(!banned),
                ..Default::default()
            },
        )
    }

    pub fn delete_user(&mut self, id: &str) -> SynergyResult<User> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| SynergyError::UserNotFound(id.to_string()))?;
        debug!(user_id = %id, "User deleted");
        Ok(self.users.remove(index))
    }

    /// Apply a profile form to the acting user.
    pub fn update_profile(&mut self, actor: &str, profile: ProfileUpdate) -> SynergyResult<User> {
        if profile.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(SynergyError::validation("Name must not be empty"));
        }
        self.update_user(actor, profile.into_user_update())
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn mark_notification_read(&mut self, id: &str) -> SynergyResult<()> {
        let n = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| SynergyError::NotificationNotFound(id.to_string()))?;
        n.read = true;
        Ok(())
    }

    /// Mark every notification of `user_id` read. Returns how many changed.
    pub fn mark_all_notifications_read(&mut self, user_id: &str) -> usize {
        let mut changed = 0;
        for n in self.notifications.iter_mut().filter(|n| n.user_id == user_id) {
            if !n.read {
                n.read = true;
                changed += 1;
            }
        }
        debug!(user_id = %user_id, changed, "Notifications marked read");
        changed
    }

    pub fn delete_notification(&mut self, id: &str) -> SynergyResult<Notification> {
        let index = self
            .notifications
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| SynergyError::NotificationNotFound(id.to_string()))?;
        Ok(self.notifications.remove(index))
    }

    // ------------------------------------------------------------------
    // Discussions
    // ------------------------------------------------------------------

    /// Start a discussion thread on a project.
    pub fn post_discussion(
        &mut self,
        actor: &str,
        project_id: &str,
        message: &str,
    ) -> SynergyResult<Discussion> {
        let message = non_empty_message(message)?;
        self.project(project_id)?;

        let post = Discussion {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            user_id: actor.to_string(),
            message,
            timestamp: Utc::now(),
            replies: Vec::new(),
        };
        self.discussions.insert(0, post.clone());
        self.notify_discussion(actor, project_id);
        Ok(post)
    }

    /// Reply to any message in a thread.
    pub fn reply_to_discussion(
        &mut self,
        actor: &str,
        discussion_id: &str,
        message: &str,
    ) -> SynergyResult<Discussion> {
        let message = non_empty_message(message)?;
        let parent = discussion::find_mut(&mut self.discussions, discussion_id)
            .ok_or_else(|| SynergyError::DiscussionNotFound(discussion_id.to_string()))?;

        let reply = Discussion {
            id: Uuid::new_v4().to_string(),
            project_id: parent.project_id.clone(),
            user_id: actor.to_string(),
            message,
            timestamp: Utc::now(),
            replies: Vec::new(),
        };
        parent.replies.push(reply.clone());

        self.notify_discussion(actor, &reply.project_id);
        Ok(reply)
    }

    /// Tell every team member except the poster about a new message.
    fn notify_discussion(&mut self, actor: &str, project_id: &str) {
        let Ok(project) = self.project(project_id) else {
            return;
        };
        let poster = self
            .users
            .iter()
            .find(|u| u.id == actor)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Someone".to_string());
        let message = format!("{} posted a message in {}", poster, project.name);
        let recipients: Vec<String> = project
            .team_members
            .iter()
            .filter(|id| id.as_str() != actor)
            .cloned()
            .collect();

        for recipient in recipients {
            self.push_notification(notification::new_notification(
                &recipient,
                NotificationKind::Discussion,
                "New Discussion Message",
                message.clone(),
                Some(format!("/projects/{}/discussions", project_id)),
            ));
        }
    }
}

fn non_empty_message(message: &str) -> SynergyResult<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(SynergyError::validation("Message must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Priority;
    use crate::notification::model::ReadFilter;
    use crate::seed;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_task(project_id: &str, assignee_id: &str) -> NewTask {
        NewTask {
            title: "Write release notes".to_string(),
            description: "Summarize the sprint".to_string(),
            project_id: project_id.to_string(),
            assignee_id: assignee_id.to_string(),
            priority: Priority::Low,
            due_date: day(2024, 5, 1),
            estimated_hours: 3.0,
            tags: vec!["docs".to_string()],
        }
    }

    #[test]
    fn test_completing_task_notifies_actor_once() {
        let mut ws = seed::workspace();
        let before = ws.notifications.len();

        // Task 3 is John's, currently todo.
        let task = ws
            .update_task(Some("1"), "3", TaskUpdate::status(TaskStatus::Done))
            .unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(ws.notifications.len(), before + 1);

        let n = &ws.notifications[0];
        assert_eq!(n.user_id, "1");
        assert_eq!(n.kind, NotificationKind::TaskCompleted);
        assert_eq!(
            n.message,
            "\"Optimize database queries\" has been completed by John Smith"
        );
        assert_eq!(n.action_url.as_deref(), Some("/tasks/3"));
        assert!(!n.read);

        // Already done: no second notification.
        ws.update_task(Some("1"), "3", TaskUpdate::status(TaskStatus::Done))
            .unwrap();
        assert_eq!(ws.notifications.len(), before + 1);
    }

    #[test]
    fn test_completion_names_assignee_before_reassignment() {
        let mut ws = seed::workspace();
        let update = TaskUpdate {
            status: Some(TaskStatus::Done),
            assignee_id: Some("5".to_string()),
            ..Default::default()
        };
        let task = ws.update_task(Some("1"), "3", update).unwrap();
        assert_eq!(task.assignee_id, "5");
        assert_eq!(
            ws.notifications[0].message,
            "\"Optimize database queries\" has been completed by John Smith"
        );
    }

    #[test]
    fn test_task_update_without_actor_is_silent() {
        let mut ws = seed::workspace();
        let before = ws.notifications.len();
        ws.update_task(None, "1", TaskUpdate::status(TaskStatus::Done))
            .unwrap();
        assert_eq!(ws.notifications.len(), before);
    }

    #[test]
    fn test_task_update_stamps_updated_at() {
        let mut ws = seed::workspace();
        let old = ws.task("5").unwrap().updated_at;
        let update = TaskUpdate {
            time_tracked: Some(4.5),
            ..Default::default()
        };
        let task = ws.update_task(Some("3"), "5", update).unwrap();
        assert!(task.updated_at > old);
        assert_eq!(task.time_tracked, 4.5);
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_delete_project_cascades_to_tasks() {
        let mut ws = seed::workspace();
        let total = ws.tasks.len();

        let deletion = ws.delete_project("1").unwrap();
        assert_eq!(deletion.project.name, "E-Commerce Platform Redesign");
        assert_eq!(deletion.removed_tasks, 3);
        assert_eq!(ws.tasks.len(), total - 3);
        assert!(ws.tasks.iter().all(|t| t.project_id != "1"));
        assert!(ws.project("1").is_err());
    }

    #[test]
    fn test_mark_all_read_scoped_to_user() {
        let mut ws = seed::workspace();
        let others_before: Vec<(String, bool)> = ws
            .notifications
            .iter()
            .filter(|n| n.user_id != "2")
            .map(|n| (n.id.clone(), n.read))
            .collect();

        let changed = ws.mark_all_notifications_read("2");
        assert_eq!(changed, 1);
        assert!(ws
            .notifications
            .iter()
            .filter(|n| n.user_id == "2")
            .all(|n| n.read));

        let others_after: Vec<(String, bool)> = ws
            .notifications
            .iter()
            .filter(|n| n.user_id != "2")
            .map(|n| (n.id.clone(), n.read))
            .collect();
        assert_eq!(others_before, others_after);
        assert_eq!(ws.unread_count("2"), 0);
        assert_eq!(ws.unread_count("5"), 1);
    }

    #[test]
    fn test_create_task_notifies_assignee() {
        let mut ws = seed::workspace();
        let task = ws.create_task("1", new_task("2", "5")).unwrap();

        assert_eq!(ws.tasks[0].id, task.id);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.time_tracked, 0.0);
        assert_eq!(task.assigned_by, "1");
        assert_eq!(task.created_at, task.updated_at);

        let n = &ws.notifications[0];
        assert_eq!(n.user_id, "5");
        assert_eq!(n.kind, NotificationKind::TaskAssigned);
        assert_eq!(n.message, "You have been assigned \"Write release notes\"");
        assert_eq!(n.action_url, Some(format!("/tasks/{}", task.id)));
    }

    #[test]
    fn test_create_unassigned_task_is_silent() {
        let mut ws = seed::workspace();
        let before = ws.notifications.len();
        ws.create_task("1", new_task("2", "")).unwrap();
        assert_eq!(ws.notifications.len(), before);
    }

    #[test]
    fn test_create_task_rejects_unknown_references() {
        let mut ws = seed::workspace();
        assert!(matches!(
            ws.create_task("1", new_task("404", "2")),
            Err(SynergyError::ProjectNotFound(_))
        ));
        assert!(matches!(
            ws.create_task("1", new_task("2", "404")),
            Err(SynergyError::UserNotFound(_))
        ));
        let mut blank = new_task("2", "2");
        blank.title = "  ".to_string();
        assert!(matches!(
            ws.create_task("1", blank),
            Err(SynergyError::ValidationError(_))
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ws = seed::workspace();
        let a = ws.create_task("1", new_task("2", "")).unwrap();
        let b = ws.create_task("1", new_task("2", "")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_create_and_update_project() {
        let mut ws = seed::workspace();
        let input = NewProject {
            name: "Customer Portal".to_string(),
            description: "Self-service portal".to_string(),
            start_date: day(2024, 4, 1),
            end_date: day(2024, 9, 1),
            priority: Priority::High,
            team_members: vec!["2".to_string(), "3".to_string()],
            budget: Some(90_000),
            tags: vec!["web".to_string()],
        };
        let project = ws.create_project("1", input).unwrap();
        assert_eq!(ws.projects[0].id, project.id);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.progress, 0);
        assert_eq!(project.admin_id, "1");

        let update = ProjectUpdate {
            name: Some("Customer Portal v2".to_string()),
            progress: Some(150),
            ..Default::default()
        };
        let updated = ws.update_project(Some("1"), &project.id, update).unwrap();
        assert_eq!(updated.name, "Customer Portal v2");
        assert_eq!(updated.progress, 100);

        let n = &ws.notifications[0];
        assert_eq!(n.user_id, "1");
        assert_eq!(n.kind, NotificationKind::ProjectUpdate);
        assert_eq!(n.message, "Project \"Customer Portal\" has been updated");
    }

    #[test]
    fn test_create_project_validates_dates() {
        let mut ws = seed::workspace();
        let input = NewProject {
            name: "Backwards".to_string(),
            description: String::new(),
            start_date: day(2024, 9, 1),
            end_date: day(2024, 4, 1),
            priority: Priority::Low,
            team_members: vec![],
            budget: None,
            tags: vec![],
        };
        assert!(ws.create_project("1", input).is_err());
    }

    #[test]
    fn test_missing_ids_leave_state_unchanged() {
        let mut ws = seed::workspace();
        let snapshot = ws.clone();

        assert!(ws.update_project(Some("1"), "404", ProjectUpdate::default()).is_err());
        assert!(ws.update_task(Some("1"), "404", TaskUpdate::default()).is_err());
        assert!(ws.delete_project("404").is_err());
        assert!(ws.delete_task("404").is_err());
        assert!(ws.delete_user("404").is_err());
        assert!(ws.mark_notification_read("404").is_err());
        assert!(ws.delete_notification("404").is_err());

        assert_eq!(ws, snapshot);
    }

    #[test]
    fn test_toggle_ban_and_login_lookup() {
        let mut ws = seed::workspace();
        assert!(ws.active_user_by_email("lisa.brown@synergysphere.com").is_some());

        let lisa = ws.toggle_ban("5").unwrap();
        assert!(lisa.banned);
        assert!(ws.active_user_by_email("lisa.brown@synergysphere.com").is_none());

        let lisa = ws.toggle_ban("5").unwrap();
        assert!(!lisa.banned);
    }

    #[test]
    fn test_notification_read_and_delete() {
        let mut ws = seed::workspace();
        ws.mark_notification_read("1").unwrap();
        assert_eq!(
            notification::filter(&ws.notifications, "2", ReadFilter::Unread).len(),
            0
        );

        let removed = ws.delete_notification("1").unwrap();
        assert_eq!(removed.id, "1");
        assert_eq!(notification::for_user(&ws.notifications, "2").len(), 1);
    }

    #[test]
    fn test_discussion_post_and_reply_notify_team() {
        let mut ws = seed::workspace();
        let before = ws.notifications.len();

        // Project 2 team: John (2) and Lisa (5).
        let post = ws.post_discussion("2", "2", "  Build is green  ").unwrap();
        assert_eq!(post.message, "Build is green");
        assert_eq!(ws.notifications.len(), before + 1);
        assert_eq!(ws.notifications[0].user_id, "5");
        assert_eq!(
            ws.notifications[0].message,
            "John Smith posted a message in Mobile App Development"
        );

        let reply = ws.reply_to_discussion("5", &post.id, "Great").unwrap();
        assert_eq!(reply.project_id, "2");
        assert_eq!(ws.notifications.len(), before + 2);
        assert_eq!(ws.notifications[0].user_id, "2");

        let nested = ws.reply_to_discussion("1", "2-1", "Noted").unwrap();
        assert_eq!(nested.project_id, "2");
        let thread = discussion::threads_for_project(&ws.discussions, "2")
            .into_iter()
            .find(|d| d.id == "2")
            .unwrap();
        assert_eq!(thread.message_count(), 3);

        assert!(ws.post_discussion("2", "2", "   ").is_err());
        assert!(ws.reply_to_discussion("2", "missing", "hi").is_err());
    }
}
