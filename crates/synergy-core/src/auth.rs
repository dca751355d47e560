//! Login session and its persisted `currentUser` record.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use synergy_db::queries::kv;
use synergy_db::DbPool;
use tracing::{info, warn};

use crate::error::{SynergyError, SynergyResult};
use crate::user::model::User;
use crate::workspace::Workspace;

/// Key under which the logged-in user is stored.
pub const SESSION_KEY: &str = "currentUser";

/// Default artificial login delay.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

/// The logged-in identity, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    pub fn current(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The current user, or `NotAuthenticated`.
    pub fn require(&self) -> SynergyResult<&User> {
        self.current_user.as_ref().ok_or(SynergyError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }

    pub fn sign_in(&mut self, user: User) {
        info!(user_id = %user.id, email = %user.email, "Logged in");
        self.current_user = Some(user);
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(user_id = %user.id, "Logged out");
        }
    }

    /// Replace the session copy when `user` is the current user.
    /// Returns whether the session changed.
    pub fn sync_user(&mut self, user: &User) -> bool {
        match self.current_user.as_mut() {
            Some(current) if current.id == user.id => {
                *current = user.clone();
                true
            }
            _ => false,
        }
    }

    /// Write the session to the store; a signed-out session removes the key.
    pub fn persist(&self, db: &DbPool) -> SynergyResult<()> {
        match &self.current_user {
            Some(user) => {
                let json = serde_json::to_string(user)?;
                kv::set_value(db, SESSION_KEY, &json)?;
            }
            None => {
                kv::delete_value(db, SESSION_KEY)?;
            }
        }
        Ok(())
    }

    /// Read the stored session. A corrupt record is treated as absent.
    pub fn restore(db: &DbPool) -> SynergyResult<Session> {
        let Some(row) = kv::get_value(db, SESSION_KEY)? else {
            return Ok(Session::default());
        };

        match serde_json::from_str::<User>(&row.value) {
            Ok(user) => Ok(Session {
                current_user: Some(user),
            }),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session record");
                Ok(Session::default())
            }
        }
    }

    /// Remove the stored session.
    pub fn clear(db: &DbPool) -> SynergyResult<()> {
        kv::delete_value(db, SESSION_KEY)?;
        Ok(())
    }
}

/// Resolve a login attempt: the first non-banned user with this exact email.
/// The password is accepted as-is.
pub fn authenticate(workspace: &Workspace, email: &str, _password: &str) -> SynergyResult<User> {
    workspace
        .active_user_by_email(email)
        .cloned()
        .ok_or(SynergyError::InvalidCredentials)
}

/// Wait `delay`, then authenticate.
pub async fn login(
    workspace: &Workspace,
    email: &str,
    password: &str,
    delay: Duration,
) -> SynergyResult<User> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    authenticate(workspace, email, password)
}
