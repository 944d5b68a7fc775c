use serde::{Deserialize, Serialize};

/// A catalog dataset row. Identity is the globally unique `fqn`; the
/// positional components are derived from it at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub id: i64,
    pub fqn: String,
    pub connection: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub table_name: Option<String>,
    pub description: Option<String>,
    pub source_system: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A column owned by exactly one dataset. Duplicate names within a dataset
/// are permitted and `column_type` is free-form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: Option<String>,
}

/// Payload for dataset creation. Columns are attached atomically with the
/// dataset row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetSpec {
    pub fqn: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_system: Option<String>,
    #[serde(default)]
    pub columns: Vec<DatasetColumn>,
}

impl DatasetSpec {
    pub fn new<T: Into<String>>(fqn: T) -> Self {
        Self {
            fqn: fqn.into(),
            description: None,
            source_system: None,
            columns: Vec::new(),
        }
    }

    pub fn with_description<T: Into<String>>(mut self, description: T) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_source_system<T: Into<String>>(mut self, source_system: T) -> Self {
        self.source_system = Some(source_system.into());
        self
    }

    pub fn with_column<N: Into<String>>(mut self, name: N, column_type: Option<&str>) -> Self {
        self.columns.push(DatasetColumn {
            name: name.into(),
            column_type: column_type.map(|t| t.to_string()),
        });
        self
    }
}

/// Outcome of an edge insertion. Exact duplicates are an idempotent
/// success, reported distinctly from a fresh insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeInsert {
    Inserted,
    AlreadyExists,
}

impl EdgeInsert {
    pub fn message(&self) -> &'static str {
        match self {
            EdgeInsert::Inserted => "lineage added",
            EdgeInsert::AlreadyExists => "lineage already exists",
        }
    }
}

/// Direction of a neighbor lookup relative to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineageDirection {
    Upstream,
    Downstream,
}
