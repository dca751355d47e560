//! Workspace snapshot queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Number of snapshots kept after each save.
const RETAINED_SNAPSHOTS: i64 = 20;

/// Snapshot row from database.
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    pub id: i64,
    pub data: String,
    pub created_at: String,
}

/// Store a new snapshot and prune old ones.
pub fn save_snapshot(pool: &DbPool, data: &str) -> DbResult<i64> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO workspace_snapshots (data) VALUES (?1)",
            params![data],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "DELETE FROM workspace_snapshots WHERE id <= ?1",
            params![id - RETAINED_SNAPSHOTS],
        )?;
        tx.commit()?;
        Ok(id)
    })
}

/// Get the most recent snapshot.
pub fn latest_snapshot(pool: &DbPool) -> DbResult<Option<SnapshotRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, data, created_at FROM workspace_snapshots ORDER BY id DESC LIMIT 1",
            [],
            |row| {
                Ok(SnapshotRow {
                    id: row.get(0)?,
                    data: row.get(1)?,
                    created_at: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// Count stored snapshots.
pub fn count_snapshots(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM workspace_snapshots", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    })
}

/// Delete every snapshot. Returns the number of deleted rows.
pub fn clear_snapshots(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| {
        let n = conn.execute("DELETE FROM workspace_snapshots", [])?;
        Ok(n)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    #[test]
    fn test_latest_snapshot_wins() {
        let pool = init_memory_pool().unwrap();
        assert!(latest_snapshot(&pool).unwrap().is_none());

        save_snapshot(&pool, "{\"v\":1}").unwrap();
        let id = save_snapshot(&pool, "{\"v\":2}").unwrap();

        let latest = latest_snapshot(&pool).unwrap().unwrap();
        assert_eq!(latest.id, id);
        assert_eq!(latest.data, "{\"v\":2}");
    }

    #[test]
    fn test_old_snapshots_pruned() {
        let pool = init_memory_pool().unwrap();
        for i in 0..(RETAINED_SNAPSHOTS + 5) {
            save_snapshot(&pool, &format!("{{\"v\":{}}}", i)).unwrap();
        }
        assert_eq!(count_snapshots(&pool).unwrap(), RETAINED_SNAPSHOTS);

        assert_eq!(clear_snapshots(&pool).unwrap(), RETAINED_SNAPSHOTS as usize);
        assert!(latest_snapshot(&pool).unwrap().is_none());
    }
}
