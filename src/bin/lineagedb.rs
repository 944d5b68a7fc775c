use std::{env, process};

use lineagedb::{
    CatalogClient, CatalogError, CommandLineConfig, DatasetSpec, LineageCatalog,
};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let catalog = match open_catalog(&config) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let client = CatalogClient::new(catalog);
    if let Err(err) = run_command(&client, &config) {
        eprintln!("command failed: {err}");
        process::exit(if err.is_storage_failure() { 2 } else { 1 });
    }
}

fn open_catalog(config: &CommandLineConfig) -> Result<LineageCatalog, String> {
    if config.database == "memory" {
        LineageCatalog::open_in_memory().map_err(|e| e.to_string())
    } else {
        LineageCatalog::open(&config.database).map_err(|e| e.to_string())
    }
}

fn run_command(
    client: &CatalogClient<LineageCatalog>,
    config: &CommandLineConfig,
) -> Result<(), CatalogError> {
    match config.command.as_str() {
        "status" => {
            let datasets = client.backend().dataset_count()?;
            let edges = client.backend().edge_count()?;
            println!("datasets={datasets} edges={edges}");
            Ok(())
        }
        "list" => {
            let views = client.list_datasets(config.offset, config.limit)?;
            print_json(&views)
        }
        "get" => {
            let fqn = required(config.fqn.as_deref(), "--fqn")?;
            let view = client.dataset(fqn)?;
            print_json(&view)
        }
        "create" => {
            let fqn = required(config.fqn.as_deref(), "--fqn")?;
            let spec = DatasetSpec {
                fqn: fqn.to_string(),
                description: config.description.clone(),
                source_system: config.source_system.clone(),
                columns: config.columns.clone(),
            };
            let view = client.create_dataset(&spec)?;
            print_json(&view)
        }
        "delete" => {
            let fqn = required(config.fqn.as_deref(), "--fqn")?;
            client.delete_dataset(fqn)?;
            println!("deleted {fqn}");
            Ok(())
        }
        "link" => {
            let upstream = required(config.upstream.as_deref(), "--upstream")?;
            let downstream = required(config.downstream.as_deref(), "--downstream")?;
            let outcome = client.add_edge(upstream, downstream)?;
            println!("{}", outcome.message());
            Ok(())
        }
        "lineage" => {
            let fqn = required(config.fqn.as_deref(), "--fqn")?;
            let view = client.lineage(fqn)?;
            print_json(&view)
        }
        "search" => {
            let query = required(config.query.as_deref(), "--query")?;
            let views = client.search(query)?;
            print_json(&views)
        }
        other => Err(CatalogError::invalid_input(format!(
            "unknown command {other}"
        ))),
    }
}

fn required<'a>(value: Option<&'a str>, flag: &str) -> Result<&'a str, CatalogError> {
    value.ok_or_else(|| CatalogError::invalid_input(format!("{flag} is required")))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CatalogError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CatalogError::invalid_input(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}
