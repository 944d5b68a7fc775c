use lineagedb::{CatalogError, DatasetSpec, LineageCatalog};

fn orders_spec() -> DatasetSpec {
    DatasetSpec::new("snowflake_prod.bi_team.bronze.orders_raw")
        .with_description("raw order events")
        .with_source_system("snowflake")
        .with_column("order_id", Some("bigint"))
        .with_column("amount", Some("numeric"))
}

#[test]
fn test_create_and_get_dataset_roundtrip() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let created = catalog.create_dataset(&orders_spec()).expect("create");
    assert_eq!(created.fqn, "snowflake_prod.bi_team.bronze.orders_raw");
    assert_eq!(created.connection.as_deref(), Some("snowflake_prod"));
    assert_eq!(created.database.as_deref(), Some("bi_team"));
    assert_eq!(created.schema.as_deref(), Some("bronze"));
    assert_eq!(created.table_name.as_deref(), Some("orders_raw"));

    let fetched = catalog
        .dataset_by_fqn("snowflake_prod.bi_team.bronze.orders_raw")
        .expect("get");
    assert_eq!(fetched, created);
}

#[test]
fn test_create_assigns_timestamps() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let created = catalog.create_dataset(&orders_spec()).expect("create");
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.updated_at);
}

#[test]
fn test_short_fqn_leaves_leading_parts_unset() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let created = catalog
        .create_dataset(&DatasetSpec::new("staging.orders"))
        .expect("create");
    assert_eq!(created.connection, None);
    assert_eq!(created.database, None);
    assert_eq!(created.schema.as_deref(), Some("staging"));
    assert_eq!(created.table_name.as_deref(), Some("orders"));
}

#[test]
fn test_duplicate_fqn_rejected_and_catalog_unchanged() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    catalog.create_dataset(&orders_spec()).expect("create");
    let err = catalog.create_dataset(&orders_spec()).expect_err("duplicate");
    assert!(matches!(err, CatalogError::DuplicateDataset(_)));
    assert_eq!(catalog.dataset_count().expect("count"), 1);
}

#[test]
fn test_columns_preserved_in_insertion_order() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    catalog.create_dataset(&orders_spec()).expect("create");
    let columns = catalog
        .columns_of("snowflake_prod.bi_team.bronze.orders_raw")
        .expect("columns");
    let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["order_id", "amount"]);
    assert_eq!(columns[0].column_type.as_deref(), Some("bigint"));
}

#[test]
fn test_duplicate_column_names_permitted() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let spec = DatasetSpec::new("warehouse.dupes")
        .with_column("value", Some("text"))
        .with_column("value", Some("int"));
    catalog.create_dataset(&spec).expect("create");
    let columns = catalog.columns_of("warehouse.dupes").expect("columns");
    assert_eq!(columns.len(), 2);
}

#[test]
fn test_blank_column_name_leaves_no_partial_dataset() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let spec = DatasetSpec::new("warehouse.broken")
        .with_column("good", Some("text"))
        .with_column("  ", None);
    let err = catalog.create_dataset(&spec).expect_err("invalid");
    assert!(matches!(err, CatalogError::InvalidInput(_)));
    assert_eq!(catalog.dataset_count().expect("count"), 0);
}

#[test]
fn test_get_missing_dataset_returns_not_found() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let err = catalog.dataset_by_fqn("no.such.table").expect_err("missing");
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[test]
fn test_list_pages_in_creation_order() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    for name in ["a.one", "a.two", "a.three"] {
        catalog
            .create_dataset(&DatasetSpec::new(name))
            .expect("create");
    }
    let page = catalog.list_datasets(0, 2).expect("page");
    let fqns: Vec<_> = page.iter().map(|d| d.fqn.as_str()).collect();
    assert_eq!(fqns, vec!["a.one", "a.two"]);

    let rest = catalog.list_datasets(2, 10).expect("rest");
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].fqn, "a.three");
}

#[test]
fn test_list_past_the_end_is_empty_not_an_error() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    catalog
        .create_dataset(&DatasetSpec::new("a.only"))
        .expect("create");
    let page = catalog.list_datasets(10, 5).expect("page");
    assert!(page.is_empty());
}

#[test]
fn test_delete_cascades_to_columns_and_edges() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    catalog.create_dataset(&orders_spec()).expect("create");
    catalog
        .create_dataset(&DatasetSpec::new("snowflake_prod.bi_team.silver.orders_clean"))
        .expect("create");
    catalog
        .add_edge(
            "snowflake_prod.bi_team.bronze.orders_raw",
            "snowflake_prod.bi_team.silver.orders_clean",
        )
        .expect("edge");

    catalog
        .delete_dataset("snowflake_prod.bi_team.bronze.orders_raw")
        .expect("delete");
    assert_eq!(catalog.dataset_count().expect("datasets"), 1);
    assert_eq!(catalog.edge_count().expect("edges"), 0);
    let remaining = catalog
        .lineage_view("snowflake_prod.bi_team.silver.orders_clean")
        .expect("lineage");
    assert!(remaining.upstream.is_empty());
}

#[test]
fn test_delete_missing_dataset_returns_not_found() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let err = catalog.delete_dataset("no.such.table").expect_err("missing");
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[test]
fn test_fresh_dataset_view_has_empty_lineage() {
    let catalog = LineageCatalog::open_in_memory().expect("catalog");
    let view = catalog.create_dataset_view(&orders_spec()).expect("view");
    assert!(view.upstream.is_empty());
    assert!(view.downstream.is_empty());
    assert_eq!(view.columns.len(), 2);
}
