use ahash::AHashSet;
use rusqlite::{Connection, params};

use crate::{
    catalog::{LineageCatalog, dataset_row},
    errors::CatalogError,
    model::Dataset,
};

// Tier order is fixed: table name beats column name beats schema beats
// database. Within a tier, rows come back in creation order.
const TIER_QUERIES: [&str; 4] = [
    "SELECT id FROM datasets WHERE table_name LIKE ?1 ESCAPE '\\' ORDER BY id",
    "SELECT DISTINCT d.id FROM datasets d \
     JOIN dataset_columns c ON c.dataset_id = d.id \
     WHERE c.name LIKE ?1 ESCAPE '\\' ORDER BY d.id",
    "SELECT id FROM datasets WHERE schema LIKE ?1 ESCAPE '\\' ORDER BY id",
    "SELECT id FROM datasets WHERE database LIKE ?1 ESCAPE '\\' ORDER BY id",
];

impl LineageCatalog {
    /// Prioritized substring search across table name, column name, schema,
    /// and database. A dataset matched by an earlier tier is excluded from
    /// every later tier, so results are distinct by FQN.
    pub fn search_datasets(&self, query: &str) -> Result<Vec<Dataset>, CatalogError> {
        if query.trim().is_empty() {
            return Err(CatalogError::invalid_query("query must not be empty"));
        }
        let pattern = like_pattern(query);
        let conn = self.lock_conn();
        let mut seen = AHashSet::new();
        let mut results = Vec::new();
        for sql in TIER_QUERIES {
            for id in tier_ids(&conn, sql, &pattern)? {
                if seen.insert(id) {
                    results.push(dataset_row(&conn, id)?);
                }
            }
        }
        Ok(results)
    }
}

fn tier_ids(conn: &Connection, sql: &str, pattern: &str) -> Result<Vec<i64>, CatalogError> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| CatalogError::query(e.to_string()))?;
    let rows = stmt
        .query_map(params![pattern], |row| row.get(0))
        .map_err(|e| CatalogError::query(e.to_string()))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row.map_err(|e| CatalogError::query(e.to_string()))?);
    }
    Ok(ids)
}

/// Wraps the term in `%...%`, escaping LIKE metacharacters so the match is
/// a plain substring test. SQLite LIKE is already case-insensitive for
/// ASCII.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
