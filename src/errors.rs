use thiserror::Error;

/// Error type for catalog and lineage operations.
///
/// Domain errors (duplicate, not-found, cycle, invalid query/input) are
/// distinct variants from storage failures so callers can tell a rejected
/// request from a broken backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("transaction error: {0}")]
    TransactionError(String),
    #[error("dataset not found: {0}")]
    NotFound(String),
    #[error("dataset already exists: {0}")]
    DuplicateDataset(String),
    #[error("lineage cycle detected: {0}")]
    CycleDetected(String),
    #[error("invalid search query: {0}")]
    InvalidQuery(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CatalogError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        CatalogError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        CatalogError::SchemaError(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        CatalogError::QueryError(msg.into())
    }

    pub fn transaction<T: Into<String>>(msg: T) -> Self {
        CatalogError::TransactionError(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CatalogError::NotFound(msg.into())
    }

    pub fn duplicate<T: Into<String>>(msg: T) -> Self {
        CatalogError::DuplicateDataset(msg.into())
    }

    pub fn cycle<T: Into<String>>(msg: T) -> Self {
        CatalogError::CycleDetected(msg.into())
    }

    pub fn invalid_query<T: Into<String>>(msg: T) -> Self {
        CatalogError::InvalidQuery(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        CatalogError::InvalidInput(msg.into())
    }

    /// True for failures of the backing store rather than the request.
    /// Front-ends map these to 5xx-equivalents and may retry.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::ConnectionError(_)
                | CatalogError::SchemaError(_)
                | CatalogError::QueryError(_)
                | CatalogError::TransactionError(_)
        )
    }
}
