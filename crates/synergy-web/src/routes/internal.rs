//! Internal notification endpoints.

use axum::{extract::State, http::StatusCode, Json};
use synergy_core::store;
use synergy_db::WebSocketMessage;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Receive a change event from the CLI, reload the saved workspace and
/// broadcast the event to all WebSocket clients.
pub async fn notify(State(state): State<AppState>, Json(msg): Json<WebSocketMessage>) -> StatusCode {
    info!(?msg, "Received internal notification, broadcasting to WebSocket clients");

    match store::load_workspace(&state.db) {
        Ok(workspace) => *state.workspace.write().await = workspace,
        Err(e) => warn!(error = %e, "Could not reload workspace"),
    }
    if msg == WebSocketMessage::SessionChanged {
        match synergy_core::auth::Session::restore(&state.db) {
            Ok(session) => *state.session.write().await = session,
            Err(e) => warn!(error = %e, "Could not reload session"),
        }
    }

    debug!(receiver_count = state.tx.receiver_count(), "Active WebSocket receivers");
    state.broadcast(msg);
    StatusCode::OK
}
