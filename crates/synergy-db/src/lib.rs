//! SynergySphere Database Layer
//!
//! SQLite persistence for the logged-in session record and workspace
//! snapshots, plus the broadcast channel shared by the web server.

pub mod broadcast;
pub mod migrations;
pub mod pool;
pub mod queries;

use std::path::Path;

pub use broadcast::{
    BroadcastReceiver, BroadcastSender, WebSocketMessage, create_broadcast_channel,
};
pub use pool::{DbError, DbPool, DbResult};

/// Open the database at `path`, creating parent directories and running
/// migrations.
pub fn init_pool(path: &Path) -> DbResult<DbPool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool)?;
    tracing::debug!(path = %path.display(), "Database ready");
    Ok(pool)
}

/// In-memory database with migrations applied. Used by tests.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
