//! Shared state for one CLI invocation: the database, the loaded
//! workspace and session, and the notifier for a running server.

use anyhow::Result;
use chrono::NaiveDate;
use synergy_core::auth::Session;
use synergy_core::notifier::WebNotifier;
use synergy_core::user::model::User;
use synergy_core::{store, SynergyError, Workspace};
use synergy_db::{DbPool, WebSocketMessage};

use crate::config::Settings;

pub struct AppContext {
    pub settings: Settings,
    pub db: DbPool,
    pub workspace: Workspace,
    pub session: Session,
    notifier: WebNotifier,
}

impl AppContext {
    pub fn open(settings: Settings) -> Result<Self> {
        let db = synergy_db::init_pool(&settings.database_path())?;
        let workspace = store::load_workspace(&db)?;
        let session = Session::restore(&db)?;
        let notifier = WebNotifier::with_url(&settings.web_url());
        Ok(Self {
            settings,
            db,
            workspace,
            session,
            notifier,
        })
    }

    /// The logged-in user as stored in the workspace.
    pub fn current_user(&self) -> Result<User> {
        let id = &self.session.require()?.id;
        let user = self
            .workspace
            .user(id)
            .map_err(|_| SynergyError::NotAuthenticated)?;
        Ok(user.clone())
    }

    /// Save the workspace and tell a running server about the change.
    pub async fn commit(&self, events: &[WebSocketMessage]) -> Result<()> {
        store::save_workspace(&self.db, &self.workspace)?;
        self.notifier.notify_all(events).await;
        Ok(())
    }

    /// Persist the session and tell a running server.
    pub async fn commit_session(&self) -> Result<()> {
        self.session.persist(&self.db)?;
        self.notifier.notify(&WebSocketMessage::SessionChanged).await;
        Ok(())
    }

    /// Refresh the stored session after a user record changed.
    pub async fn sync_session(&mut self, user: &User) -> Result<()> {
        if self.session.sync_user(user) {
            self.commit_session().await?;
        }
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
