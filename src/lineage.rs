use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    catalog::{LineageCatalog, dataset_id_by_fqn},
    cycle::reaches,
    errors::CatalogError,
    model::{EdgeInsert, LineageDirection},
    txn::TransactionGuard,
};

impl LineageCatalog {
    /// Inserts the directed edge upstream -> downstream.
    ///
    /// Resolution, the duplicate check, the cycle check, and the insert all
    /// happen inside one IMMEDIATE transaction under the connection mutex:
    /// the read-check-write sequence cannot race another insertion. An
    /// exact duplicate pair is an idempotent success, not an error.
    pub fn add_edge(
        &self,
        upstream_fqn: &str,
        downstream_fqn: &str,
    ) -> Result<EdgeInsert, CatalogError> {
        let conn = self.lock_conn();
        let tx = TransactionGuard::begin(&conn)?;
        let upstream = dataset_id_by_fqn(tx.conn(), upstream_fqn)?
            .ok_or_else(|| CatalogError::not_found(format!("upstream {upstream_fqn}")))?;
        let downstream = dataset_id_by_fqn(tx.conn(), downstream_fqn)?
            .ok_or_else(|| CatalogError::not_found(format!("downstream {downstream_fqn}")))?;
        if edge_exists(tx.conn(), upstream, downstream)? {
            return Ok(EdgeInsert::AlreadyExists);
        }
        // The new edge closes a cycle exactly when its target already
        // reaches its source through the existing DAG.
        if reaches(tx.conn(), downstream, upstream)? {
            log::debug!("rejected lineage {upstream_fqn} -> {downstream_fqn}: cycle");
            return Err(CatalogError::cycle(format!(
                "{upstream_fqn} -> {downstream_fqn}"
            )));
        }
        tx.conn()
            .execute(
                "INSERT INTO lineage_edges(upstream_id, downstream_id) VALUES(?1, ?2)",
                params![upstream, downstream],
            )
            .map_err(|e| {
                CatalogError::query(format!(
                    "insert edge {upstream_fqn} -> {downstream_fqn}: {e}"
                ))
            })?;
        tx.commit()?;
        self.neighbors.clear();
        log::debug!("added lineage {upstream_fqn} -> {downstream_fqn}");
        Ok(EdgeInsert::Inserted)
    }

    /// FQNs of datasets feeding directly into the given one.
    pub fn upstream_of(&self, fqn: &str) -> Result<Vec<String>, CatalogError> {
        self.neighbor_fqns(fqn, LineageDirection::Upstream)
    }

    /// FQNs of datasets fed directly by the given one.
    pub fn downstream_of(&self, fqn: &str) -> Result<Vec<String>, CatalogError> {
        self.neighbor_fqns(fqn, LineageDirection::Downstream)
    }

    /// Whether data can flow from `from_fqn` to `to_fqn` through the
    /// current edge set (transitively).
    pub fn has_path(&self, from_fqn: &str, to_fqn: &str) -> Result<bool, CatalogError> {
        let conn = self.lock_conn();
        let from = dataset_id_by_fqn(&conn, from_fqn)?
            .ok_or_else(|| CatalogError::not_found(from_fqn))?;
        let to =
            dataset_id_by_fqn(&conn, to_fqn)?.ok_or_else(|| CatalogError::not_found(to_fqn))?;
        reaches(&conn, from, to)
    }

    fn neighbor_fqns(
        &self,
        fqn: &str,
        direction: LineageDirection,
    ) -> Result<Vec<String>, CatalogError> {
        let conn = self.lock_conn();
        let id = dataset_id_by_fqn(&conn, fqn)?.ok_or_else(|| CatalogError::not_found(fqn))?;
        let ids = self.cached_neighbor_ids(&conn, id, direction)?;
        fqns_for_ids(&conn, &ids)
    }

    pub(crate) fn cached_neighbor_ids(
        &self,
        conn: &Connection,
        id: i64,
        direction: LineageDirection,
    ) -> Result<Vec<i64>, CatalogError> {
        if let Some(cached) = self.neighbors.get(direction, id) {
            return Ok(cached);
        }
        let ids = neighbor_ids(conn, id, direction)?;
        self.neighbors.insert(direction, id, ids.clone());
        Ok(ids)
    }
}

/// Direct neighbor ids in edge insertion order.
pub(crate) fn neighbor_ids(
    conn: &Connection,
    id: i64,
    direction: LineageDirection,
) -> Result<Vec<i64>, CatalogError> {
    let sql = match direction {
        LineageDirection::Upstream => {
            "SELECT upstream_id FROM lineage_edges WHERE downstream_id=?1 ORDER BY id"
        }
        LineageDirection::Downstream => {
            "SELECT downstream_id FROM lineage_edges WHERE upstream_id=?1 ORDER BY id"
        }
    };
    let mut stmt = conn
        .prepare_cached(sql)
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

pub(crate) fn fqns_for_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<String>, CatalogError> {
    let mut stmt = conn
        .prepare_cached("SELECT fqn FROM datasets WHERE id=?1")
        .map_err(|e| CatalogError::query(e.to_string()))?;
    let mut fqns = Vec::new();
    for &id in ids {
        let fqn = stmt
            .query_row(params![id], |row| row.get(0))
            .map_err(|e| CatalogError::query(format!("resolve dataset {id}: {e}")))?;
        fqns.push(fqn);
    }
    Ok(fqns)
}

fn edge_exists(conn: &Connection, upstream: i64, downstream: i64) -> Result<bool, CatalogError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM lineage_edges WHERE upstream_id=?1 AND downstream_id=?2",
            params![upstream, downstream],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| CatalogError::query(e.to_string()))?;
    Ok(found.is_some())
}
