//! Task route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use synergy_core::access;
use synergy_core::task::{
    self,
    model::{NewTask, Task, TaskFilter, TaskUpdate},
};
use synergy_db::WebSocketMessage;

use super::{api_error, today, ApiResult};
use crate::state::AppState;

/// A task with its due-date status.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub overdue: bool,
    pub due_label: String,
}

impl TaskView {
    fn new(task: &Task, today: chrono::NaiveDate) -> Self {
        Self {
            task: task.clone(),
            overdue: task::is_overdue(task, today),
            due_label: task::due_label(task, today),
        }
    }
}

/// GET /api/tasks?search=&status=&priority=&projectId=
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Vec<TaskView>>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;
    let today = today();

    let visible = task::visible_tasks(&workspace.tasks, &user);
    let tasks = task::filter_tasks(visible, &filter)
        .into_iter()
        .map(|t| TaskView::new(t, today))
        .collect();
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskView>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;

    let task = workspace.task(&id).map_err(api_error)?;
    access::require_task_update(&user, task).map_err(api_error)?;
    Ok(Json(TaskView::new(task, today())))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let user = state.current_user().await.map_err(api_error)?;

    let task = state
        .mutate(|ws| {
            let input = access::prepare_new_task(&user, ws.project(&req.project_id)?, req)?;
            ws.create_task(&user.id, input)
        })
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::TaskUpdated {
        task_id: task.id.clone(),
        status: task.status.as_str().to_string(),
    });
    if !task.assignee_id.is_empty() {
        state.broadcast(WebSocketMessage::NotificationsChanged {
            user_id: task.assignee_id.clone(),
        });
    }
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    let user = state.current_user().await.map_err(api_error)?;

    let task = state
        .mutate(|ws| {
            access::require_task_update(&user, ws.task(&id)?)?;
            ws.update_task(Some(&user.id), &id, req)
        })
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::TaskUpdated {
        task_id: id,
        status: task.status.as_str().to_string(),
    });
    state.broadcast(WebSocketMessage::NotificationsChanged {
        user_id: user.id.clone(),
    });
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let user = state.current_user().await.map_err(api_error)?;
    access::require_task_delete(&user).map_err(api_error)?;

    let task = state
        .mutate(|ws| ws.delete_task(&id))
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::TaskDeleted { task_id: id });
    Ok(Json(task))
}
