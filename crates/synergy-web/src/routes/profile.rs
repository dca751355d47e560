//! Profile route handlers.

use axum::{extract::State, Json};
use synergy_core::profile::ProfileUpdate;
use synergy_core::user::{self, model::User};
use synergy_db::WebSocketMessage;

use super::{api_error, today, users::UserDetail, ApiResult};
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(State(state): State<AppState>) -> ApiResult<Json<UserDetail>> {
    let current = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;
    let stats = user::user_stats(&current, &workspace.tasks, &workspace.projects, today());
    Ok(Json(UserDetail {
        user: current,
        stats,
    }))
}

/// PATCH /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileUpdate>,
) -> ApiResult<Json<User>> {
    let current = state.current_user().await.map_err(api_error)?;

    let updated = state
        .mutate(|ws| ws.update_profile(&current.id, req))
        .await
        .map_err(api_error)?;
    state.sync_session(&updated).await.map_err(api_error)?;

    state.broadcast(WebSocketMessage::UserUpdated {
        user_id: updated.id.clone(),
    });
    Ok(Json(updated))
}
