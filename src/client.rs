use crate::{backend::CatalogBackend, errors::CatalogError, model::DatasetColumn};

/// Parsed command-line options for the `lineagedb` binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub database: String,
    pub command: String,
    pub fqn: Option<String>,
    pub upstream: Option<String>,
    pub downstream: Option<String>,
    pub query: Option<String>,
    pub description: Option<String>,
    pub source_system: Option<String>,
    pub columns: Vec<DatasetColumn>,
    pub offset: usize,
    pub limit: usize,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut config = Self {
            database: String::from("memory"),
            command: String::from("status"),
            fqn: None,
            upstream: None,
            downstream: None,
            query: None,
            description: None,
            source_system: None,
            columns: Vec::new(),
            offset: 0,
            limit: 100,
        };
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--db" | "--database" => {
                    config.database = required_value(&mut iter, "--db")?;
                }
                "--command" => {
                    config.command = required_value(&mut iter, "--command")?;
                }
                "--fqn" => {
                    config.fqn = Some(required_value(&mut iter, "--fqn")?);
                }
                "--upstream" => {
                    config.upstream = Some(required_value(&mut iter, "--upstream")?);
                }
                "--downstream" => {
                    config.downstream = Some(required_value(&mut iter, "--downstream")?);
                }
                "--query" | "-q" => {
                    config.query = Some(required_value(&mut iter, "--query")?);
                }
                "--description" => {
                    config.description = Some(required_value(&mut iter, "--description")?);
                }
                "--source-system" => {
                    config.source_system = Some(required_value(&mut iter, "--source-system")?);
                }
                "--column" => {
                    let raw = required_value(&mut iter, "--column")?;
                    config.columns.push(parse_column(&raw));
                }
                "--offset" => {
                    let raw = required_value(&mut iter, "--offset")?;
                    config.offset = raw
                        .parse()
                        .map_err(|_| format!("--offset expects a number, got {raw}"))?;
                }
                "--limit" => {
                    let raw = required_value(&mut iter, "--limit")?;
                    config.limit = raw
                        .parse()
                        .map_err(|_| format!("--limit expects a number, got {raw}"))?;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    config.command = arg.to_string();
                }
            }
        }
        Ok(config)
    }

    pub fn help() -> &'static str {
        "Usage: lineagedb [--db memory|PATH] COMMAND [options]\n\
         Commands:\n\
         \x20 status                                  dataset and edge counts\n\
         \x20 list [--offset N] [--limit N]           paged dataset views\n\
         \x20 get --fqn FQN                           one dataset view\n\
         \x20 create --fqn FQN [--description D] [--source-system S] [--column name:type]...\n\
         \x20 delete --fqn FQN                        remove dataset, columns, incident edges\n\
         \x20 link --upstream FQN --downstream FQN    add a lineage edge (cycle-checked)\n\
         \x20 lineage --fqn FQN                       direct upstream/downstream FQNs\n\
         \x20 search --query TERM                     tiered substring search\n"
    }
}

fn required_value(
    iter: &mut dyn Iterator<Item = &&str>,
    flag: &str,
) -> Result<String, String> {
    iter.next()
        .map(|value| value.to_string())
        .ok_or_else(|| format!("{flag} requires a value"))
}

// "order_id:bigint" -> name + type; a bare name leaves the type unset.
fn parse_column(raw: &str) -> DatasetColumn {
    match raw.split_once(':') {
        Some((name, column_type)) if !column_type.is_empty() => DatasetColumn {
            name: name.to_string(),
            column_type: Some(column_type.to_string()),
        },
        Some((name, _)) => DatasetColumn {
            name: name.to_string(),
            column_type: None,
        },
        None => DatasetColumn {
            name: raw.to_string(),
            column_type: None,
        },
    }
}

/// Thin wrapper giving front-ends a single handle onto any backend.
pub struct CatalogClient<B> {
    backend: B,
}

impl<B> CatalogClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B> CatalogClient<B>
where
    B: CatalogBackend,
{
    pub fn create_dataset(
        &self,
        spec: &crate::model::DatasetSpec,
    ) -> Result<crate::view::DatasetView, CatalogError> {
        self.backend.create_dataset(spec)
    }

    pub fn dataset(&self, fqn: &str) -> Result<crate::view::DatasetView, CatalogError> {
        self.backend.dataset(fqn)
    }

    pub fn list_datasets(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<crate::view::DatasetView>, CatalogError> {
        self.backend.list_datasets(offset, limit)
    }

    pub fn delete_dataset(&self, fqn: &str) -> Result<(), CatalogError> {
        self.backend.delete_dataset(fqn)
    }

    pub fn add_edge(
        &self,
        upstream_fqn: &str,
        downstream_fqn: &str,
    ) -> Result<crate::model::EdgeInsert, CatalogError> {
        self.backend.add_edge(upstream_fqn, downstream_fqn)
    }

    pub fn lineage(&self, fqn: &str) -> Result<crate::view::LineageView, CatalogError> {
        self.backend.lineage(fqn)
    }

    pub fn search(&self, query: &str) -> Result<Vec<crate::view::DatasetView>, CatalogError> {
        self.backend.search(query)
    }
}
