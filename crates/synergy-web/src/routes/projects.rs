//! Project route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use synergy_core::access;
use synergy_core::project::{
    self,
    model::{NewProject, Project, ProjectFilter, ProjectSummary, ProjectUpdate},
};
use synergy_core::task::model::Task;
use synergy_core::workspace::ProjectDeletion;
use synergy_db::WebSocketMessage;

use super::{api_error, ApiResult};
use crate::state::AppState;

/// A project card: the project plus its task counts.
#[derive(Serialize)]
pub struct ProjectCard {
    pub project: Project,
    pub summary: ProjectSummary,
}

#[derive(Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub summary: ProjectSummary,
    pub tasks: Vec<Task>,
}

/// GET /api/projects?search=&status=
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<Json<Vec<ProjectCard>>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;

    let visible = project::visible_projects(&workspace.projects, &user);
    let cards = project::filter_projects(visible, &filter)
        .into_iter()
        .map(|p| ProjectCard {
            project: p.clone(),
            summary: project::project_summary(p, &workspace.tasks, &workspace.users),
        })
        .collect();
    Ok(Json(cards))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectDetail>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;

    let project = workspace.project(&id).map_err(api_error)?;
    access::require_project_access(&user, project).map_err(api_error)?;

    Ok(Json(ProjectDetail {
        project: project.clone(),
        summary: project::project_summary(project, &workspace.tasks, &workspace.users),
        tasks: workspace
            .tasks
            .iter()
            .filter(|t| t.project_id == id && access::can_view_task(&user, t))
            .cloned()
            .collect(),
    }))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<NewProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let user = state.current_user().await.map_err(api_error)?;
    access::require_admin(&user, "create projects").map_err(api_error)?;

    let project = state
        .mutate(|ws| ws.create_project(&user.id, req))
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::ProjectUpdated {
        project_id: project.id.clone(),
    });
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ProjectUpdate>,
) -> ApiResult<Json<Project>> {
    let user = state.current_user().await.map_err(api_error)?;
    access::require_admin(&user, "edit projects").map_err(api_error)?;

    let project = state
        .mutate(|ws| ws.update_project(Some(&user.id), &id, req))
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::ProjectUpdated {
        project_id: id.clone(),
    });
    state.broadcast(WebSocketMessage::NotificationsChanged {
        user_id: user.id.clone(),
    });
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectDeletion>> {
    let user = state.current_user().await.map_err(api_error)?;
    access::require_admin(&user, "delete projects").map_err(api_error)?;

    let deletion = state
        .mutate(|ws| ws.delete_project(&id))
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::ProjectDeleted { project_id: id });
    Ok(Json(deletion))
}
