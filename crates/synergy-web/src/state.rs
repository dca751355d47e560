//! Application state.

use std::sync::Arc;
use std::time::Duration;

use synergy_core::auth::Session;
use synergy_core::user::model::User;
use synergy_core::{store, SynergyError, SynergyResult, Workspace};
use synergy_db::{create_broadcast_channel, BroadcastSender, DbPool, WebSocketMessage};
use tokio::sync::RwLock;
use tracing::debug;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub workspace: Arc<RwLock<Workspace>>,
    pub session: Arc<RwLock<Session>>,
    pub tx: BroadcastSender,
    pub login_delay: Duration,
}

impl AppState {
    /// Load the saved workspace and session from `db`.
    pub fn load(db: Arc<DbPool>, login_delay: Duration) -> SynergyResult<Self> {
        let workspace = store::load_workspace(&db)?;
        let session = Session::restore(&db)?;
        Ok(Self::new(db, workspace, session, login_delay))
    }

    pub fn new(db: Arc<DbPool>, workspace: Workspace, session: Session, login_delay: Duration) -> Self {
        Self {
            db,
            workspace: Arc::new(RwLock::new(workspace)),
            session: Arc::new(RwLock::new(session)),
            tx: create_broadcast_channel(),
            login_delay,
        }
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        debug!(?msg, "Broadcasting");
        let _ = self.tx.send(msg);
    }

    /// The logged-in user as currently stored in the workspace.
    pub async fn current_user(&self) -> SynergyResult<User> {
        let id = self.session.read().await.require()?.id.clone();
        let workspace = self.workspace.read().await;
        workspace
            .user(&id)
            .cloned()
            .map_err(|_| SynergyError::NotAuthenticated)
    }

    /// Apply a mutation under the write lock and save a snapshot.
    ///
    /// The mutation runs on a copy; the live workspace only changes once the
    /// snapshot is saved.
    pub async fn mutate<T, F>(&self, f: F) -> SynergyResult<T>
    where
        F: FnOnce(&mut Workspace) -> SynergyResult<T>,
    {
        let mut workspace = self.workspace.write().await;
        let mut next = workspace.clone();
        let result = f(&mut next)?;
        store::save_workspace(&self.db, &next)?;
        *workspace = next;
        Ok(result)
    }

    /// Refresh the session copy after a user record changed.
    pub async fn sync_session(&self, user: &User) -> SynergyResult<()> {
        let mut session = self.session.write().await;
        if session.sync_user(user) {
            session.persist(&self.db)?;
            self.broadcast(WebSocketMessage::SessionChanged);
        }
        Ok(())
    }
}
