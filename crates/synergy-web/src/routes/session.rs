//! Session route handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use synergy_core::auth;
use synergy_core::user::model::User;
use synergy_db::WebSocketMessage;

use super::{api_error, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub current_user: Option<User>,
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let current_user = state.current_user().await.ok();
    Json(SessionResponse { current_user })
}

/// POST /api/session/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<User>> {
    // Hold no lock across the login delay.
    let workspace = state.workspace.read().await.clone();
    let user = auth::login(&workspace, &req.email, &req.password, state.login_delay)
        .await
        .map_err(api_error)?;

    let mut session = state.session.write().await;
    session.sign_in(user.clone());
    session.persist(&state.db).map_err(api_error)?;
    drop(session);

    state.broadcast(WebSocketMessage::SessionChanged);
    Ok(Json(user))
}

/// POST /api/session/logout
pub async fn logout(State(state): State<AppState>) -> ApiResult<Json<SessionResponse>> {
    let mut session = state.session.write().await;
    session.logout();
    session.persist(&state.db).map_err(api_error)?;
    drop(session);

    state.broadcast(WebSocketMessage::SessionChanged);
    Ok(Json(SessionResponse { current_user: None }))
}
