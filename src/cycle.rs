use std::collections::VecDeque;

use ahash::AHashSet;
use rusqlite::{Connection, params};

use crate::errors::CatalogError;

/// Breadth-first reachability over the committed edge set: can `start`
/// reach `target` by following downstream edges? Runs on the connection of
/// the open insertion transaction, so the answer cannot go stale before the
/// edge is written. `start == target` counts as reached, which is what
/// rejects self-loops without a dedicated check.
pub(crate) fn reaches(conn: &Connection, start: i64, target: i64) -> Result<bool, CatalogError> {
    if start == target {
        return Ok(true);
    }
    let mut seen = AHashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    seen.insert(start);
    while let Some(node) = queue.pop_front() {
        for next in downstream_ids(conn, node)? {
            if next == target {
                return Ok(true);
            }
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    Ok(false)
}

fn downstream_ids(conn: &Connection, id: i64) -> Result<Vec<i64>, CatalogError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT downstream_id FROM lineage_edges WHERE upstream_id=?1 ORDER BY downstream_id",
        )
        .map_err(|e| CatalogError::query(e.to_string()))?;
    let rows = stmt
        .query_map(params![id], |row| row.get(0))
        .map_err(|e| CatalogError::query(e.to_string()))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row.map_err(|e| CatalogError::query(e.to_string()))?);
    }
    Ok(ids)
}
