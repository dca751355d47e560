//! User management route handlers. Admin only, except reading yourself.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use synergy_core::access;
use synergy_core::user::{
    self,
    model::{User, UserFilter, UserStats, UserUpdate},
};
use synergy_db::WebSocketMessage;

use super::{api_error, today, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct UserDetail {
    pub user: User,
    pub stats: UserStats,
}

/// GET /api/users?search=&role=&status=
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> ApiResult<Json<Vec<User>>> {
    let current = state.current_user().await.map_err(api_error)?;
    access::require_admin(&current, "manage users").map_err(api_error)?;

    let workspace = state.workspace.read().await;
    let users = user::filter_users(&workspace.users, &filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserDetail>> {
    let current = state.current_user().await.map_err(api_error)?;
    if current.id != id {
        access::require_admin(&current, "view other users").map_err(api_error)?;
    }

    let workspace = state.workspace.read().await;
    let found = workspace.user(&id).map_err(api_error)?;
    Ok(Json(UserDetail {
        user: found.clone(),
        stats: user::user_stats(found, &workspace.tasks, &workspace.projects, today()),
    }))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    let current = state.current_user().await.map_err(api_error)?;
    access::require_admin(&current, "manage users").map_err(api_error)?;

    let updated = state
        .mutate(|ws| ws.update_user(&id, req))
        .await
        .map_err(api_error)?;
    state.sync_session(&updated).await.map_err(api_error)?;

    state.broadcast(WebSocketMessage::UserUpdated { user_id: id });
    Ok(Json(updated))
}

/// POST /api/users/{id}/ban - Toggle the ban flag.
pub async fn toggle_ban(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let current = state.current_user().await.map_err(api_error)?;
    access::require_admin(&current, "manage users").map_err(api_error)?;

    let updated = state
        .mutate(|ws| ws.toggle_ban(&id))
        .await
        .map_err(api_error)?;
    state.sync_session(&updated).await.map_err(api_error)?;

    tracing::info!(user_id = %id, banned = updated.banned, "Ban toggled");
    state.broadcast(WebSocketMessage::UserUpdated { user_id: id });
    Ok(Json(updated))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let current = state.current_user().await.map_err(api_error)?;
    access::require_admin(&current, "manage users").map_err(api_error)?;

    let removed = state
        .mutate(|ws| ws.delete_user(&id))
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::UserUpdated { user_id: id });
    Ok(Json(removed))
}
