//! SWOT route handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use synergy_core::swot::{self, SwotReport};

use super::{api_error, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SwotQuery {
    pub user: Option<String>,
    #[serde(default)]
    pub search: String,
}

#[derive(Serialize)]
pub struct SwotEntry {
    pub id: String,
    pub name: String,
    pub title: String,
    pub department: String,
}

#[derive(Serialize)]
pub struct SwotResponse {
    pub users: Vec<SwotEntry>,
    pub selected: SwotReport,
}

/// GET /api/swot?user=&search=
pub async fn get_swot(
    State(state): State<AppState>,
    Query(query): Query<SwotQuery>,
) -> ApiResult<Json<SwotResponse>> {
    let viewer = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;

    let users = swot::search(swot::available_users(&workspace, &viewer), &query.search)
        .into_iter()
        .map(|u| SwotEntry {
            id: u.id.clone(),
            name: u.name.clone(),
            title: u.title.clone(),
            department: u.department.clone(),
        })
        .collect();
    let selected = swot::report(swot::select(&workspace, &viewer, query.user.as_deref()));

    Ok(Json(SwotResponse { users, selected }))
}
