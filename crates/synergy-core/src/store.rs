//! Durable workspace storage on top of the snapshot table.

use synergy_db::queries::snapshots;
use synergy_db::DbPool;
use tracing::{debug, info, warn};

use crate::error::SynergyResult;
use crate::seed;
use crate::workspace::Workspace;

/// Load the latest snapshot, or the seed data when none is usable.
pub fn load_workspace(db: &DbPool) -> SynergyResult<Workspace> {
    match snapshots::latest_snapshot(db)? {
        Some(row) => match serde_json::from_str::<Workspace>(&row.data) {
            Ok(ws) => {
                debug!(snapshot_id = row.id, "Workspace loaded from snapshot");
                Ok(ws)
            }
            Err(e) => {
                warn!(snapshot_id = row.id, error = %e, "Unreadable snapshot, using seed data");
                Ok(seed::workspace())
            }
        },
        None => {
            info!("No saved workspace, starting from seed data");
            Ok(seed::workspace())
        }
    }
}

/// Save the workspace as a new snapshot. Returns the snapshot id.
pub fn save_workspace(db: &DbPool, workspace: &Workspace) -> SynergyResult<i64> {
    let data = serde_json::to_string(workspace)?;
    let id = snapshots::save_snapshot(db, &data)?;
    debug!(snapshot_id = id, "Workspace saved");
    Ok(id)
}

/// Drop every snapshot so the next load starts from seed data.
pub fn reset_workspace(db: &DbPool) -> SynergyResult<usize> {
    let removed = snapshots::clear_snapshots(db)?;
    info!(removed, "Workspace reset to seed data");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::{TaskStatus, TaskUpdate};

    fn test_db() -> DbPool {
        synergy_db::init_memory_pool().unwrap()
    }

    #[test]
    fn test_empty_store_loads_seed() {
        let db = test_db();
        assert_eq!(load_workspace(&db).unwrap(), seed::workspace());
    }

    #[test]
    fn test_save_and_reload() {
        let db = test_db();
        let mut ws = load_workspace(&db).unwrap();
        ws.update_task(Some("1"), "3", TaskUpdate::status(TaskStatus::Done))
            .unwrap();
        ws.delete_project("5").unwrap();
        save_workspace(&db, &ws).unwrap();

        let reloaded = load_workspace(&db).unwrap();
        assert_eq!(reloaded, ws);
        assert_eq!(reloaded.task("3").unwrap().status, TaskStatus::Done);
        assert!(reloaded.project("5").is_err());
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_seed() {
        let db = test_db();
        snapshots::save_snapshot(&db, "[1, 2").unwrap();
        assert_eq!(load_workspace(&db).unwrap(), seed::workspace());
    }

    #[test]
    fn test_reset() {
        let db = test_db();
        let mut ws = seed::workspace();
        ws.delete_task("1").unwrap();
        save_workspace(&db, &ws).unwrap();

        assert_eq!(reset_workspace(&db).unwrap(), 1);
        assert_eq!(load_workspace(&db).unwrap().tasks.len(), 10);
    }
}
