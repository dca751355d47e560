//! SWOT review: who may be viewed and the four category lists.

use serde::{Deserialize, Serialize};

use crate::common::contains_ci;
use crate::user::model::User;
use crate::workspace::Workspace;

/// Text shown for a category with no entries.
pub const EMPTY_CATEGORY: &str = "No items identified yet";

/// Users whose SWOT the viewer may open: every non-banned user for admins,
/// only themselves otherwise.
pub fn available_users<'a>(workspace: &'a Workspace, viewer: &'a User) -> Vec<&'a User> {
    if viewer.is_admin() {
        workspace.users.iter().filter(|u| !u.banned).collect()
    } else {
        vec![viewer]
    }
}

/// Narrow a user list by name, title or department.
pub fn search<'a>(users: Vec<&'a User>, term: &str) -> Vec<&'a User> {
    users
        .into_iter()
        .filter(|u| {
            contains_ci(&u.name, term) || contains_ci(&u.title, term) || contains_ci(&u.department, term)
        })
        .collect()
}

/// Resolve the user to display. Admins default to the first user; an
/// employee always sees their own analysis whatever was requested.
pub fn select<'a>(workspace: &'a Workspace, viewer: &'a User, requested: Option<&str>) -> &'a User {
    if !viewer.is_admin() {
        return viewer;
    }
    let wanted = requested.or_else(|| workspace.users.first().map(|u| u.id.as_str()));
    wanted
        .and_then(|id| workspace.users.iter().find(|u| u.id == id))
        .unwrap_or(viewer)
}

/// One SWOT quadrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotCategory {
    pub title: String,
    pub items: Vec<String>,
}

impl SwotCategory {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A user's SWOT, quadrant by quadrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotReport {
    pub user_id: String,
    pub name: String,
    pub title: String,
    pub department: String,
    pub categories: Vec<SwotCategory>,
}

pub fn report(user: &User) -> SwotReport {
    let swot = &user.swot;
    let category = |title: &str, items: &[String]| SwotCategory {
        title: title.to_string(),
        items: items.to_vec(),
    };

    SwotReport {
        user_id: user.id.clone(),
        name: user.name.clone(),
        title: user.title.clone(),
        department: user.department.clone(),
        categories: vec![
            category("Strengths", &swot.strengths),
            category("Weaknesses", &swot.weaknesses),
            category("Opportunities", &swot.opportunities),
            category("Threats", &swot.threats),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::user::model::Swot;

    #[test]
    fn test_available_users_by_role() {
        let mut ws = seed::workspace();
        ws.toggle_ban("4").unwrap();
        let admin = ws.user("1").unwrap().clone();
        let john = ws.user("2").unwrap().clone();

        assert_eq!(available_users(&ws, &admin).len(), 4);
        let own = available_users(&ws, &john);
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, "2");
    }

    #[test]
    fn test_search_by_department() {
        let ws = seed::workspace();
        let admin = ws.user("1").unwrap();
        let hits = search(available_users(&ws, admin), "marketing");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Lisa Brown");
    }

    #[test]
    fn test_select() {
        let ws = seed::workspace();
        let admin = ws.user("1").unwrap();
        let emily = ws.user("3").unwrap();

        assert_eq!(select(&ws, admin, None).id, "1");
        assert_eq!(select(&ws, admin, Some("4")).id, "4");
        assert_eq!(select(&ws, admin, Some("missing")).id, "1");
        assert_eq!(select(&ws, emily, Some("4")).id, "3");
    }

    #[test]
    fn test_report_keeps_empty_categories() {
        let mut ws = seed::workspace();
        let mut user = ws.users.remove(1);
        user.swot = Swot {
            strengths: vec!["Reliable".to_string()],
            ..Default::default()
        };
        let report = report(&user);
        let titles: Vec<&str> = report.categories.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Strengths", "Weaknesses", "Opportunities", "Threats"]);
        assert!(!report.categories[0].is_empty());
        assert!(report.categories[3].is_empty());
    }
}
