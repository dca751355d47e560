//! Navigation route handler.

use axum::{extract::State, Json};
use synergy_core::navigation::{self, Navigation};

use super::{api_error, ApiResult};
use crate::state::AppState;

/// GET /api/navigation
pub async fn get_navigation(State(state): State<AppState>) -> ApiResult<Json<Navigation>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;
    Ok(Json(navigation::navigation(&workspace, &user)))
}
