//! Dashboard route handlers: the HTML page and its JSON source.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use synergy_core::dashboard::{self, DashboardStats};
use synergy_core::navigation::{self, MenuItem};
use synergy_core::notification;

use super::{api_error, today, ApiResult};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    user_name: String,
    role: String,
    menu: Vec<MenuItem>,
    unread: usize,
    show_team: bool,
    active_members: usize,
    admins: usize,
    stats: DashboardStats,
    recent: Vec<TaskRow>,
    deadlines: Vec<DeadlineRow>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    accounts: Vec<String>,
}

struct TaskRow {
    title: String,
    status: String,
    priority: String,
    assignee: String,
    updated: String,
}

struct DeadlineRow {
    title: String,
    due_date: String,
    label: String,
    overdue: bool,
}

/// GET / - Render the dashboard, or a login hint when signed out.
pub async fn index(State(state): State<AppState>) -> Response {
    let user = match state.current_user().await {
        Ok(user) => user,
        Err(_) => {
            let workspace = state.workspace.read().await;
            let template = LoginTemplate {
                accounts: workspace
                    .users
                    .iter()
                    .filter(|u| !u.banned)
                    .map(|u| u.email.clone())
                    .collect(),
            };
            return render(template);
        }
    };

    let workspace = state.workspace.read().await;
    let today = today();
    let now = chrono::Utc::now();
    let stats = dashboard::dashboard(&workspace, &user, today);

    let recent = stats
        .recent_tasks
        .iter()
        .map(|t| TaskRow {
            title: t.title.clone(),
            status: t.status.label().to_string(),
            priority: t.priority.as_str().to_string(),
            assignee: workspace
                .user(&t.assignee_id)
                .map(|u| u.name.clone())
                .unwrap_or_else(|_| "Unassigned".to_string()),
            updated: notification::format_time_ago(t.updated_at, now),
        })
        .collect();
    let deadlines = stats
        .upcoming_deadlines
        .iter()
        .map(|d| DeadlineRow {
            title: d.task.title.clone(),
            due_date: d.task.due_date.format("%b %-d, %Y").to_string(),
            label: d.label.clone(),
            overdue: matches!(d.due, synergy_core::task::model::DueState::Overdue(_)),
        })
        .collect();

    let (active_members, admins) = stats
        .team
        .as_ref()
        .map_or((0, 0), |t| (t.active_members, t.admins));

    let template = DashboardTemplate {
        user_name: user.name.clone(),
        role: user.role.as_str().to_string(),
        menu: navigation::menu(&user),
        unread: workspace.unread_count(&user.id),
        show_team: stats.team.is_some(),
        active_members,
        admins,
        stats,
        recent,
        deadlines,
    };
    render(template)
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Template error: {}", e)),
        )
            .into_response(),
    }
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;
    Ok(Json(dashboard::dashboard(&workspace, &user, today())))
}
