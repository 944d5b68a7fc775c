use rusqlite::Connection;

use crate::errors::CatalogError;

pub fn ensure_schema(conn: &Connection) -> Result<(), CatalogError> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS datasets (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            fqn           TEXT NOT NULL UNIQUE,
            connection    TEXT,
            database      TEXT,
            schema        TEXT,
            table_name    TEXT,
            description   TEXT,
            source_system TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS dataset_columns (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            dataset_id  INTEGER NOT NULL REFERENCES datasets(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            column_type TEXT
        );
        CREATE TABLE IF NOT EXISTS lineage_edges (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            upstream_id   INTEGER NOT NULL REFERENCES datasets(id) ON DELETE CASCADE,
            downstream_id INTEGER NOT NULL REFERENCES datasets(id) ON DELETE CASCADE,
            UNIQUE(upstream_id, downstream_id)
        );
        CREATE INDEX IF NOT EXISTS idx_datasets_table_name ON datasets(table_name);
        CREATE INDEX IF NOT EXISTS idx_datasets_schema ON datasets(schema);
        CREATE INDEX IF NOT EXISTS idx_datasets_database ON datasets(database);
        CREATE INDEX IF NOT EXISTS idx_columns_dataset ON dataset_columns(dataset_id);
        CREATE INDEX IF NOT EXISTS idx_columns_name ON dataset_columns(name);
        CREATE INDEX IF NOT EXISTS idx_edges_upstream ON lineage_edges(upstream_id);
        CREATE INDEX IF NOT EXISTS idx_edges_downstream ON lineage_edges(downstream_id);
        "#,
    )
    .map_err(|e| CatalogError::schema(e.to_string()))?;
    Ok(())
}
