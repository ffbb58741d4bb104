//! SQLite access with scoped, read-only connections

use std::collections::BTreeSet;
use std::path::PathBuf;
use rusqlite::{Connection, OpenFlags, Row, ToSql, params_from_iter};
use rusqlite::types::FromSql;
use crate::Result;

/// Marker replaced by the `?` position list in batched queries.
pub const IN_LIST: &str = "{in}";

/// Build a `?,?,?` position list of length `n`.
///
/// Only the count of positions varies per call; values are always bound.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

/// Collect keys into sorted, de-duplicated order.
pub fn unique_keys<K, I>(keys: I) -> Vec<K>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    keys.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Location of one SQLite store.
///
/// Holds no connection: each query acquires one and drops it (statement
/// first, then connection) on every exit path.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    path: PathBuf,
}

impl StoreHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a read-only connection
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(conn)
    }

    /// Run a query with a single bound key and collect the first column.
    pub fn query_column<T: FromSql>(&self, sql: &str, key: &dyn ToSql) -> Result<Vec<T>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;

        let values = stmt
            .query_map([key], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<T>>>()?;

        tracing::debug!(db = %self.path.display(), rows = values.len(), "single-key lookup");
        Ok(values)
    }

    /// Run `template` once per chunk of at most `batch_size` keys, with
    /// [`IN_LIST`] replaced by a position list of the chunk's length.
    ///
    /// An empty key set returns immediately without touching the store.
    pub fn query_in<K, T, F>(
        &self,
        template: &str,
        keys: &[K],
        batch_size: usize,
        mut map: F,
    ) -> Result<Vec<T>>
    where
        K: ToSql,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.connect()?;
        let mut results = Vec::new();
        let mut batches = 0;

        for chunk in keys.chunks(batch_size.max(1)) {
            let sql = template.replace(IN_LIST, &placeholders(chunk.len()));
            let mut stmt = conn.prepare_cached(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), &mut map)?;
            for row in rows {
                results.push(row?);
            }
            batches += 1;
        }

        tracing::debug!(
            db = %self.path.display(),
            keys = keys.len(),
            batches,
            rows = results.len(),
            "batched lookup"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use crate::Error;

    fn numbers_db(dir: &Path) -> StoreHandle {
        let path = dir.join("numbers.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute("CREATE TABLE t (k TEXT PRIMARY KEY, v TEXT)", []).unwrap();
        for k in 1..=5 {
            conn.execute("INSERT INTO t VALUES (?1, ?2)", [k.to_string(), format!("v{}", k)]).unwrap();
        }
        StoreHandle::new(path)
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(0), "");
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?,?,?");
    }

    #[test]
    fn test_unique_keys() {
        assert_eq!(unique_keys(vec!["b", "a", "b", "c", "a"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_keys_skip_store() {
        // Nonexistent path: any connection attempt would fail.
        let handle = StoreHandle::new("/nonexistent/dir/store.db");
        let keys: Vec<String> = Vec::new();
        let rows = handle
            .query_in("SELECT k FROM t WHERE k IN ({in})", &keys, 10, |row| row.get::<_, String>(0))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_query_in_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let handle = numbers_db(dir.path());
        let keys: Vec<String> = ["1", "2", "4", "5", "9"].iter().map(|s| s.to_string()).collect();

        let mut rows = handle
            .query_in("SELECT k, v FROM t WHERE k IN ({in})", &keys, 2, |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .unwrap();
        rows.sort();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], ("1".to_string(), "v1".to_string()));
        assert_eq!(rows[3], ("5".to_string(), "v5".to_string()));
    }

    #[test]
    fn test_values_are_bound_not_interpolated() {
        let dir = tempfile::tempdir().unwrap();
        let handle = numbers_db(dir.path());
        let keys = vec!["1') OR 1=1 --".to_string()];

        let rows = handle
            .query_in("SELECT k FROM t WHERE k IN ({in})", &keys, 10, |row| row.get::<_, String>(0))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_store_is_store_error() {
        let handle = StoreHandle::new("/nonexistent/dir/store.db");
        let res: Result<Vec<String>> = handle.query_column("SELECT k FROM t WHERE k = ?1", &"1");
        assert!(matches!(res, Err(Error::Store(_))));
    }

    #[test]
    fn test_connection_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let handle = numbers_db(dir.path());
        let res: Result<Vec<String>> =
            handle.query_column("INSERT INTO t VALUES (?1, 'x') RETURNING k", &"7");
        assert!(res.is_err());
    }
}
