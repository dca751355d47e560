//! `/ws`: pushes workspace change events to open dashboards.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use synergy_db::WebSocketMessage;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let mut events = state.tx.subscribe();
    info!(clients = state.tx.receiver_count(), "Dashboard connected");

    let forward = tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                // Missed events can't be replayed; ask the page to reload instead.
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Dashboard fell behind, forcing refresh");
                    WebSocketMessage::DashboardRefresh
                }
                Err(RecvError::Closed) => break,
            };
            let Ok(json) = serde_json::to_string(&event) else {
                continue;
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Clients only listen; drain the stream until they go away.
    let drain = tokio::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    first_to_finish(forward, drain).await;
    debug!("Dashboard disconnected");
}

/// Wait for either task to end, then cancel the other and wait for it to drop.
async fn first_to_finish(mut a: JoinHandle<()>, mut b: JoinHandle<()>) {
    let a_finished = tokio::select! {
        _ = &mut a => true,
        _ = &mut b => false,
    };
    let loser = if a_finished { b } else { a };
    loser.abort();
    let _ = loser.await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use synergy_db::create_broadcast_channel;

    #[tokio::test]
    async fn test_closed_socket_releases_subscription() {
        let tx = create_broadcast_channel();
        let mut events = tx.subscribe();
        let forward = tokio::spawn(async move {
            while events.recv().await.is_ok() {}
        });
        let drain = tokio::spawn(async {});
        assert_eq!(tx.receiver_count(), 1);

        first_to_finish(forward, drain).await;
        assert_eq!(tx.receiver_count(), 0);
    }
}
