//! Project views.

pub mod model;

use crate::common::contains_ci;
use crate::task::model::{Task, TaskStatus};
use crate::user::model::User;
use model::{Project, ProjectFilter, ProjectSummary};

pub use model::{NewProject, ProjectStatus, ProjectUpdate};

/// Projects visible to a user: all for admins, team memberships otherwise.
pub fn visible_projects<'a>(projects: &'a [Project], user: &User) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| user.is_admin() || p.team_members.contains(&user.id))
        .collect()
}

/// Filter projects by search term (name, description) and status.
pub fn filter_projects<'a, I>(projects: I, filter: &ProjectFilter) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects
        .into_iter()
        .filter(|p| {
            let matches_search =
                contains_ci(&p.name, &filter.search) || contains_ci(&p.description, &filter.search);
            let matches_status = filter.status.map_or(true, |s| p.status == s);
            matches_search && matches_status
        })
        .collect()
}

/// Find a project by ID.
pub fn find<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

/// Task counts and resolved members for a project card.
pub fn project_summary(project: &Project, tasks: &[Task], users: &[User]) -> ProjectSummary {
    let project_tasks: Vec<&Task> = tasks.iter().filter(|t| t.project_id == project.id).collect();
    let members = project
        .team_members
        .iter()
        .filter(|id| users.iter().any(|u| &u.id == *id))
        .cloned()
        .collect();

    ProjectSummary {
        project_id: project.id.clone(),
        total_tasks: project_tasks.len(),
        completed_tasks: project_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count(),
        members,
    }
}
