//! Notification route handlers, scoped to the logged-in user.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use synergy_core::notification::{
    self,
    model::{Notification, ReadFilter},
};
use synergy_core::SynergyError;
use synergy_db::WebSocketMessage;

use super::{api_error, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub filter: ReadFilter,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    pub unread_count: usize,
    pub notifications: Vec<NotificationView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: Notification,
    pub time_ago: String,
}

#[derive(Serialize)]
pub struct ChangedResponse {
    pub changed: usize,
}

/// GET /api/notifications?filter=all|unread|read
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Json<NotificationList>> {
    let user = state.current_user().await.map_err(api_error)?;
    let workspace = state.workspace.read().await;
    let now = chrono::Utc::now();

    let notifications = notification::filter(&workspace.notifications, &user.id, query.filter)
        .into_iter()
        .map(|n| NotificationView {
            notification: n.clone(),
            time_ago: notification::format_time_ago(n.timestamp, now),
        })
        .collect();

    Ok(Json(NotificationList {
        unread_count: workspace.unread_count(&user.id),
        notifications,
    }))
}

fn require_owner(notification: &Notification, user_id: &str) -> Result<(), SynergyError> {
    if notification.user_id == user_id {
        Ok(())
    } else {
        Err(SynergyError::permission("notification belongs to another user"))
    }
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ChangedResponse>> {
    let user = state.current_user().await.map_err(api_error)?;

    state
        .mutate(|ws| {
            require_owner(ws.notification(&id)?, &user.id)?;
            ws.mark_notification_read(&id)
        })
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::NotificationsChanged { user_id: user.id });
    Ok(Json(ChangedResponse { changed: 1 }))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(State(state): State<AppState>) -> ApiResult<Json<ChangedResponse>> {
    let user = state.current_user().await.map_err(api_error)?;

    let changed = state
        .mutate(|ws| Ok(ws.mark_all_notifications_read(&user.id)))
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::NotificationsChanged { user_id: user.id });
    Ok(Json(ChangedResponse { changed }))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Notification>> {
    let user = state.current_user().await.map_err(api_error)?;

    let removed = state
        .mutate(|ws| {
            require_owner(ws.notification(&id)?, &user.id)?;
            ws.delete_notification(&id)
        })
        .await
        .map_err(api_error)?;

    state.broadcast(WebSocketMessage::NotificationsChanged { user_id: user.id });
    Ok(Json(removed))
}
