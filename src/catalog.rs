use std::path::Path;

use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    cache::NeighborCache,
    config::CatalogConfig,
    errors::CatalogError,
    fqn::parse_fqn,
    model::{Dataset, DatasetColumn, DatasetSpec},
    schema::ensure_schema,
    txn::TransactionGuard,
};

pub(crate) const DATASET_COLUMNS: &str = "id, fqn, connection, database, schema, table_name, \
     description, source_system, created_at, updated_at";

/// Embedded SQLite-backed dataset catalog with a cycle-checked lineage DAG.
///
/// The single connection sits behind a mutex, so one instance can be shared
/// across threads; every mutation runs inside an IMMEDIATE transaction and
/// the cycle check can never interleave with a concurrent edge insert.
pub struct LineageCatalog {
    conn: Mutex<Connection>,
    pub(crate) neighbors: NeighborCache,
}

impl LineageCatalog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Self::open_with_config(path, &CatalogConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: &CatalogConfig,
    ) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(|e| CatalogError::connection(e.to_string()))?;
        if config.wal {
            // Fall back to the default journal on filesystems without WAL support.
            let _ = conn.pragma_update(None, "journal_mode", "WAL");
        }
        conn.busy_timeout(std::time::Duration::from_millis(u64::from(
            config.busy_timeout_ms,
        )))
        .map_err(|e| CatalogError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CatalogError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            neighbors: NeighborCache::new(),
        }
    }

    /// Creates a dataset and its columns in one transaction. The positional
    /// FQN components are derived here, and timestamps are assigned by the
    /// store, never by the caller.
    pub fn create_dataset(&self, spec: &DatasetSpec) -> Result<Dataset, CatalogError> {
        validate_spec(spec)?;
        let parts = parse_fqn(&spec.fqn)?;
        let conn = self.conn.lock();
        let tx = TransactionGuard::begin(&conn)?;
        if dataset_id_by_fqn(tx.conn(), &spec.fqn)?.is_some() {
            return Err(CatalogError::duplicate(spec.fqn.clone()));
        }
        tx.conn()
            .execute(
                "INSERT INTO datasets(fqn, connection, database, schema, table_name, \
                 description, source_system, created_at, updated_at) \
                 VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, \
                 strftime('%Y-%m-%dT%H:%M:%fZ','now'), strftime('%Y-%m-%dT%H:%M:%fZ','now'))",
                params![
                    spec.fqn.as_str(),
                    parts.connection.as_deref(),
                    parts.database.as_deref(),
                    parts.schema.as_deref(),
                    parts.table_name.as_deref(),
                    spec.description.as_deref(),
                    spec.source_system.as_deref(),
                ],
            )
            .map_err(|e| CatalogError::query(format!("insert dataset {}: {e}", spec.fqn)))?;
        let id = tx.conn().last_insert_rowid();
        for column in &spec.columns {
            tx.conn()
                .execute(
                    "INSERT INTO dataset_columns(dataset_id, name, column_type) \
                     VALUES(?1, ?2, ?3)",
                    params![id, column.name.as_str(), column.column_type.as_deref()],
                )
                .map_err(|e| CatalogError::query(format!("insert column {}: {e}", column.name)))?;
        }
        let dataset = dataset_row(tx.conn(), id)?;
        tx.commit()?;
        log::debug!("created dataset {} (id {id})", dataset.fqn);
        Ok(dataset)
    }

    pub fn dataset_by_fqn(&self, fqn: &str) -> Result<Dataset, CatalogError> {
        let conn = self.conn.lock();
        dataset_row_by_fqn(&conn, fqn)?.ok_or_else(|| CatalogError::not_found(fqn))
    }

    /// Datasets in creation order. Offsets past the end yield an empty page.
    pub fn list_datasets(&self, offset: usize, limit: usize) -> Result<Vec<Dataset>, CatalogError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {DATASET_COLUMNS} FROM datasets ORDER BY id LIMIT ?1 OFFSET ?2"
            ))
            .map_err(|e| CatalogError::query(e.to_string()))?;
        let rows = stmt
            .query_map(params![limit as i64, offset as i64], row_to_dataset)
            .map_err(|e| CatalogError::query(e.to_string()))?;
        let mut datasets = Vec::new();
        for row in rows {
            datasets.push(row.map_err(|e| CatalogError::query(e.to_string()))?);
        }
        Ok(datasets)
    }

    pub fn columns_of(&self, fqn: &str) -> Result<Vec<DatasetColumn>, CatalogError> {
        let conn = self.conn.lock();
        let id = dataset_id_by_fqn(&conn, fqn)?.ok_or_else(|| CatalogError::not_found(fqn))?;
        fetch_columns(&conn, id)
    }

    /// Removes a dataset together with its columns and every incident
    /// lineage edge, all inside one transaction.
    pub fn delete_dataset(&self, fqn: &str) -> Result<(), CatalogError> {
        let conn = self.conn.lock();
        let tx = TransactionGuard::begin(&conn)?;
        let id =
            dataset_id_by_fqn(tx.conn(), fqn)?.ok_or_else(|| CatalogError::not_found(fqn))?;
        tx.conn()
            .execute(
                "DELETE FROM dataset_columns WHERE dataset_id=?1",
                params![id],
            )
            .map_err(|e| CatalogError::query(format!("delete columns of {fqn}: {e}")))?;
        tx.conn()
            .execute(
                "DELETE FROM lineage_edges WHERE upstream_id=?1 OR downstream_id=?1",
                params![id],
            )
            .map_err(|e| CatalogError::query(format!("delete edges of {fqn}: {e}")))?;
        tx.conn()
            .execute("DELETE FROM datasets WHERE id=?1", params![id])
            .map_err(|e| CatalogError::query(format!("delete dataset {fqn}: {e}")))?;
        tx.commit()?;
        self.neighbors.clear();
        log::debug!("deleted dataset {fqn} (id {id})");
        Ok(())
    }

    pub fn dataset_count(&self) -> Result<i64, CatalogError> {
        let conn = self.conn.lock();
        count_rows(&conn, "SELECT COUNT(*) FROM datasets")
    }

    pub fn edge_count(&self) -> Result<i64, CatalogError> {
        let conn = self.conn.lock();
        count_rows(&conn, "SELECT COUNT(*) FROM lineage_edges")
    }

    pub(crate) fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

pub(crate) fn dataset_id_by_fqn(
    conn: &Connection,
    fqn: &str,
) -> Result<Option<i64>, CatalogError> {
    conn.query_row(
        "SELECT id FROM datasets WHERE fqn=?1",
        params![fqn],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| CatalogError::query(format!("lookup dataset {fqn}: {e}")))
}

pub(crate) fn dataset_row(conn: &Connection, id: i64) -> Result<Dataset, CatalogError> {
    conn.query_row(
        &format!("SELECT {DATASET_COLUMNS} FROM datasets WHERE id=?1"),
        params![id],
        row_to_dataset,
    )
    .map_err(|err| match err {
        rusqlite::Error::QueryReturnedNoRows => CatalogError::not_found(format!("dataset {id}")),
        other => CatalogError::query(other.to_string()),
    })
}

pub(crate) fn dataset_row_by_fqn(
    conn: &Connection,
    fqn: &str,
) -> Result<Option<Dataset>, CatalogError> {
    conn.query_row(
        &format!("SELECT {DATASET_COLUMNS} FROM datasets WHERE fqn=?1"),
        params![fqn],
        row_to_dataset,
    )
    .optional()
    .map_err(|e| CatalogError::query(format!("lookup dataset {fqn}: {e}")))
}

pub(crate) fn fetch_columns(
    conn: &Connection,
    dataset_id: i64,
) -> Result<Vec<DatasetColumn>, CatalogError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name, column_type FROM dataset_columns WHERE dataset_id=?1 ORDER BY id",
        )
        .map_err(|e| CatalogError::query(e.to_string()))?;
    let rows = stmt
        .query_map(params![dataset_id], |row| {
            Ok(DatasetColumn {
                name: row.get(0)?,
                column_type: row.get(1)?,
            })
        })
        .map_err(|e| CatalogError::query(e.to_string()))?;
    let mut columns = Vec::new();
    for row in rows {
        columns.push(row.map_err(|e| CatalogError::query(e.to_string()))?);
    }
    Ok(columns)
}

pub(crate) fn row_to_dataset(row: &rusqlite::Row<'_>) -> Result<Dataset, rusqlite::Error> {
    Ok(Dataset {
        id: row.get(0)?,
        fqn: row.get(1)?,
        connection: row.get(2)?,
        database: row.get(3)?,
        schema: row.get(4)?,
        table_name: row.get(5)?,
        description: row.get(6)?,
        source_system: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn count_rows(conn: &Connection, sql: &str) -> Result<i64, CatalogError> {
    conn.query_row(sql, [], |row| row.get(0))
        .map_err(|e| CatalogError::query(e.to_string()))
}

fn validate_spec(spec: &DatasetSpec) -> Result<(), CatalogError> {
    if spec.fqn.trim().is_empty() {
        return Err(CatalogError::invalid_input("dataset fqn must be set"));
    }
    for column in &spec.columns {
        if column.name.trim().is_empty() {
            return Err(CatalogError::invalid_input("column name must be set"));
        }
    }
    Ok(())
}
