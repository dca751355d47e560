//! Sidebar menu.

use serde::{Deserialize, Serialize};

use crate::user::model::User;
use crate::workspace::Workspace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
}

/// Menu plus the header entries and unread badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub items: Vec<MenuItem>,
    pub footer: Vec<MenuItem>,
    pub unread_notifications: usize,
}

fn item(id: &str, label: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        label: label.to_string(),
    }
}

/// Main menu entries for a user. `users` is admin-only.
pub fn menu(user: &User) -> Vec<MenuItem> {
    let mut items = vec![
        item("dashboard", "Dashboard"),
        item("projects", "Projects"),
        item("tasks", "Tasks"),
    ];
    if user.is_admin() {
        items.push(item("users", "Users"));
    }
    items.extend([
        item("discussions", "Discussions"),
        item("analytics", "Analytics"),
        item("swot", "SWOT Analysis"),
    ]);
    items
}

pub fn navigation(workspace: &Workspace, user: &User) -> Navigation {
    Navigation {
        items: menu(user),
        footer: vec![item("notifications", "Notifications"), item("profile", "Profile")],
        unread_notifications: workspace.unread_count(&user.id),
    }
}
