//! Mock data the workspace starts from.

use crate::error::SynergyResult;
use crate::workspace::Workspace;

const SEED_JSON: &str = include_str!("../data/seed.json");

/// Parse the embedded seed data.
pub fn try_workspace() -> SynergyResult<Workspace> {
    Ok(serde_json::from_str(SEED_JSON)?)
}

/// The seeded workspace. Falls back to an empty workspace if the embedded
/// data cannot be parsed, which the tests below rule out.
pub fn workspace() -> Workspace {
    match try_workspace() {
        Ok(ws) => ws,
        Err(e) => {
            tracing::error!(error = %e, "Embedded seed data is invalid");
            Workspace::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::model::Role;

    #[test]
    fn test_seed_parses() {
        let ws = try_workspace().unwrap();
        assert_eq!(ws.users.len(), 5);
        assert_eq!(ws.projects.len(), 5);
        assert_eq!(ws.tasks.len(), 10);
        assert_eq!(ws.discussions.len(), 3);
        assert_eq!(ws.notifications.len(), 5);
    }

    #[test]
    fn test_single_admin() {
        let ws = workspace();
        let admins: Vec<_> = ws.users.iter().filter(|u| u.role == Role::Admin).collect();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "admin@synergysphere.com");
    }

    #[test]
    fn test_task_references_resolve() {
        let ws = workspace();
        for task in &ws.tasks {
            assert!(ws.project(&task.project_id).is_ok(), "task {}", task.id);
            assert!(ws.user(&task.assignee_id).is_ok(), "task {}", task.id);
        }
    }
}
