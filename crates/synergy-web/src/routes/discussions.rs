//! Discussion route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use synergy_core::access;
use synergy_core::discussion::{self, model::Discussion};
use synergy_db::WebSocketMessage;

use super::{api_error, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// GET /api/projects/{id}/discussions - Threads, newest first.
pub async fn list_discussions(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<Discussion>>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;

    let project = workspace.project(&project_id).map_err(api_error)?;
    access::require_project_access(&user, project).map_err(api_error)?;

    let threads = discussion::threads_for_project(&workspace.discussions, &project_id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(threads))
}

/// POST /api/projects/{id}/discussions
pub async fn post_discussion(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<(StatusCode, Json<Discussion>)> {
    let user = state.current_user().await.map_err(api_error)?;

    let post = state
        .mutate(|ws| {
            access::require_project_access(&user, ws.project(&project_id)?)?;
            ws.post_discussion(&user.id, &project_id, &req.message)
        })
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::DiscussionPosted { project_id });
    Ok((StatusCode::CREATED, Json(post)))
}

/// POST /api/discussions/{id}/replies
pub async fn reply(
    State(state): State<AppState>,
    Path(discussion_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<(StatusCode, Json<Discussion>)> {
    let user = state.current_user().await.map_err(api_error)?;

    let reply = state
        .mutate(|ws| {
            let project_id = ws.discussion(&discussion_id)?.project_id.clone();
            access::require_project_access(&user, ws.project(&project_id)?)?;
            ws.reply_to_discussion(&user.id, &discussion_id, &req.message)
        })
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::DiscussionPosted {
        project_id: reply.project_id.clone(),
    });
    Ok((StatusCode::CREATED, Json(reply)))
}
