//! Backend trait between the storage engine and higher-level consumers. A
//! transport layer (or the bundled CLI) programs against [`CatalogBackend`]
//! only, so the engine can be swapped or mocked without touching callers.

use crate::{
    catalog::LineageCatalog,
    errors::CatalogError,
    model::{DatasetSpec, EdgeInsert},
    view::{DatasetView, LineageView},
};

/// Abstract persistence surface of the catalog: creation, lookup, listing,
/// cycle-checked edge insertion, neighbor views, and tiered search.
pub trait CatalogBackend {
    fn create_dataset(&self, spec: &DatasetSpec) -> Result<DatasetView, CatalogError>;
    fn dataset(&self, fqn: &str) -> Result<DatasetView, CatalogError>;
    fn list_datasets(&self, offset: usize, limit: usize)
    -> Result<Vec<DatasetView>, CatalogError>;
    fn delete_dataset(&self, fqn: &str) -> Result<(), CatalogError>;
    fn add_edge(
        &self,
        upstream_fqn: &str,
        downstream_fqn: &str,
    ) -> Result<EdgeInsert, CatalogError>;
    fn lineage(&self, fqn: &str) -> Result<LineageView, CatalogError>;
    fn search(&self, query: &str) -> Result<Vec<DatasetView>, CatalogError>;
}

impl CatalogBackend for LineageCatalog {
    fn create_dataset(&self, spec: &DatasetSpec) -> Result<DatasetView, CatalogError> {
        self.create_dataset_view(spec)
    }

    fn dataset(&self, fqn: &str) -> Result<DatasetView, CatalogError> {
        self.dataset_view(fqn)
    }

    fn list_datasets(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<DatasetView>, CatalogError> {
        self.list_dataset_views(offset, limit)
    }

    fn delete_dataset(&self, fqn: &str) -> Result<(), CatalogError> {
        LineageCatalog::delete_dataset(self, fqn)
    }

    fn add_edge(
        &self,
        upstream_fqn: &str,
        downstream_fqn: &str,
    ) -> Result<EdgeInsert, CatalogError> {
        LineageCatalog::add_edge(self, upstream_fqn, downstream_fqn)
    }

    fn lineage(&self, fqn: &str) -> Result<LineageView, CatalogError> {
        self.lineage_view(fqn)
    }

    fn search(&self, query: &str) -> Result<Vec<DatasetView>, CatalogError> {
        self.search_views(query)
    }
}

impl<B> CatalogBackend for &B
where
    B: CatalogBackend + ?Sized,
{
    fn create_dataset(&self, spec: &DatasetSpec) -> Result<DatasetView, CatalogError> {
        (*self).create_dataset(spec)
    }

    fn dataset(&self, fqn: &str) -> Result<DatasetView, CatalogError> {
        (*self).dataset(fqn)
    }

    fn list_datasets(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<DatasetView>, CatalogError> {
        (*self).list_datasets(offset, limit)
    }

    fn delete_dataset(&self, fqn: &str) -> Result<(), CatalogError> {
        (*self).delete_dataset(fqn)
    }

    fn add_edge(
        &self,
        upstream_fqn: &str,
        downstream_fqn: &str,
    ) -> Result<EdgeInsert, CatalogError> {
        (*self).add_edge(upstream_fqn, downstream_fqn)
    }

    fn lineage(&self, fqn: &str) -> Result<LineageView, CatalogError> {
        (*self).lineage(fqn)
    }

    fn search(&self, query: &str) -> Result<Vec<DatasetView>, CatalogError> {
        (*self).search(query)
    }
}
