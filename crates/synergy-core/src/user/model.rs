//! User domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub title: String,
    pub department: String,
    pub phone: String,
    pub location: String,
    pub about: String,
    pub skills: Vec<String>,
    pub join_date: NaiveDate,
    pub banned: bool,
    pub performance: Performance,
    pub swot: Swot,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Apply a partial update.
    pub fn apply(&mut self, update: UserUpdate) {
        let UserUpdate {
            email,
            name,
            role,
            avatar,
            title,
            department,
            phone,
            location,
            about,
            skills,
            banned,
            performance,
            swot,
        } = update;

        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = role {
            self.role = v;
        }
        if let Some(v) = avatar {
            self.avatar = Some(v);
        }
        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = department {
            self.department = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = location {
            self.location = v;
        }
        if let Some(v) = about {
            self.about = v;
        }
        if let Some(v) = skills {
            self.skills = v;
        }
        if let Some(v) = banned {
            self.banned = v;
        }
        if let Some(v) = performance {
            self.performance = v;
        }
        if let Some(v) = swot {
            self.swot = v;
        }
    }
}

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }
}

/// Static performance counters shown on the profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub tasks_completed: u32,
    pub tasks_in_progress: u32,
    /// Days.
    pub average_completion_time: f64,
    /// Percent, 0-100.
    pub success_rate: f64,
}

/// Strengths/Weaknesses/Opportunities/Threats lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Swot {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

/// Partial update of a user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub skills: Option<Vec<String>>,
    pub banned: Option<bool>,
    pub performance: Option<Performance>,
    pub swot: Option<Swot>,
}

/// Ban status filter for the users view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatusFilter {
    #[default]
    All,
    Active,
    Banned,
}

impl UserStatusFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "banned" => Some(Self::Banned),
            _ => None,
        }
    }
}

/// Filter for the users view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: UserStatusFilter,
}

/// Per-user task statistics shown in the user detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    pub completion_rate: f64,
    pub active_projects: usize,
}
