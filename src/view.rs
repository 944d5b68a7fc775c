use serde::Serialize;

use crate::{
    catalog::{LineageCatalog, dataset_id_by_fqn, dataset_row_by_fqn, fetch_columns},
    errors::CatalogError,
    lineage::fqns_for_ids,
    model::{Dataset, DatasetColumn, DatasetSpec, LineageDirection},
};

/// The dataset shape every read surface returns: the row itself, its
/// columns in insertion order, and the FQNs of its direct neighbors.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetView {
    pub id: i64,
    pub fqn: String,
    pub connection: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub table_name: Option<String>,
    pub description: Option<String>,
    pub source_system: Option<String>,
    pub columns: Vec<DatasetColumn>,
    pub upstream: Vec<String>,
    pub downstream: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Direct neighbors of one dataset, both directions.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LineageView {
    pub upstream: Vec<String>,
    pub downstream: Vec<String>,
}

impl LineageCatalog {
    pub fn dataset_view(&self, fqn: &str) -> Result<DatasetView, CatalogError> {
        let conn = self.lock_conn();
        let dataset =
            dataset_row_by_fqn(&conn, fqn)?.ok_or_else(|| CatalogError::not_found(fqn))?;
        self.assemble_view(&conn, dataset)
    }

    pub fn create_dataset_view(&self, spec: &DatasetSpec) -> Result<DatasetView, CatalogError> {
        let dataset = self.create_dataset(spec)?;
        let conn = self.lock_conn();
        self.assemble_view(&conn, dataset)
    }

    pub fn list_dataset_views(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<DatasetView>, CatalogError> {
        let datasets = self.list_datasets(offset, limit)?;
        let conn = self.lock_conn();
        datasets
            .into_iter()
            .map(|dataset| self.assemble_view(&conn, dataset))
            .collect()
    }

    pub fn search_views(&self, query: &str) -> Result<Vec<DatasetView>, CatalogError> {
        let datasets = self.search_datasets(query)?;
        let conn = self.lock_conn();
        datasets
            .into_iter()
            .map(|dataset| self.assemble_view(&conn, dataset))
            .collect()
    }

    pub fn lineage_view(&self, fqn: &str) -> Result<LineageView, CatalogError> {
        let conn = self.lock_conn();
        let id = dataset_id_by_fqn(&conn, fqn)?.ok_or_else(|| CatalogError::not_found(fqn))?;
        let upstream_ids = self.cached_neighbor_ids(&conn, id, LineageDirection::Upstream)?;
        let downstream_ids = self.cached_neighbor_ids(&conn, id, LineageDirection::Downstream)?;
        Ok(LineageView {
            upstream: fqns_for_ids(&conn, &upstream_ids)?,
            downstream: fqns_for_ids(&conn, &downstream_ids)?,
        })
    }

    fn assemble_view(
        &self,
        conn: &rusqlite::Connection,
        dataset: Dataset,
    ) -> Result<DatasetView, CatalogError> {
        let columns = fetch_columns(conn, dataset.id)?;
        let upstream_ids = self.cached_neighbor_ids(conn, dataset.id, LineageDirection::Upstream)?;
        let downstream_ids =
            self.cached_neighbor_ids(conn, dataset.id, LineageDirection::Downstream)?;
        Ok(DatasetView {
            id: dataset.id,
            fqn: dataset.fqn,
            connection: dataset.connection,
            database: dataset.database,
            schema: dataset.schema,
            table_name: dataset.table_name,
            description: dataset.description,
            source_system: dataset.source_system,
            columns,
            upstream: fqns_for_ids(conn, &upstream_ids)?,
            downstream: fqns_for_ids(conn, &downstream_ids)?,
            created_at: dataset.created_at,
            updated_at: dataset.updated_at,
        })
    }
}
