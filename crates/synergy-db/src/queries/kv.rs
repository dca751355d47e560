//! Key/value queries. The session record lives here under `currentUser`.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Key/value row from database.
#[derive(Debug, Clone)]
pub struct KvRow {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

/// Insert or replace a value.
pub fn set_value(pool: &DbPool, key: &str, value: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    })
}

/// Get a value, `None` when the key is absent.
pub fn get_value(pool: &DbPool, key: &str) -> DbResult<Option<KvRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT key, value, updated_at FROM kv_store WHERE key = ?1",
            params![key],
            |row| {
                Ok(KvRow {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// Remove a key. Returns whether a row was deleted.
pub fn delete_value(pool: &DbPool, key: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let n = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(n > 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    #[test]
    fn test_set_get_overwrite_delete() {
        let pool = init_memory_pool().unwrap();
        assert!(get_value(&pool, "currentUser").unwrap().is_none());

        set_value(&pool, "currentUser", "{\"id\":\"1\"}").unwrap();
        set_value(&pool, "currentUser", "{\"id\":\"2\"}").unwrap();
        let row = get_value(&pool, "currentUser").unwrap().unwrap();
        assert_eq!(row.key, "currentUser");
        assert_eq!(row.value, "{\"id\":\"2\"}");

        assert!(delete_value(&pool, "currentUser").unwrap());
        assert!(!delete_value(&pool, "currentUser").unwrap());
        assert!(get_value(&pool, "currentUser").unwrap().is_none());
    }
}
