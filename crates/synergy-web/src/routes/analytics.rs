//! Analytics route handler.

use axum::{extract::State, Json};
use synergy_core::analytics::{self, model::AnalyticsReport};

use super::{api_error, today, ApiResult};
use crate::state::AppState;

/// GET /api/analytics
pub async fn get_analytics(State(state): State<AppState>) -> ApiResult<Json<AnalyticsReport>> {
    state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;
    Ok(Json(analytics::report(&workspace, today())))
}
