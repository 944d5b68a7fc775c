use assert_cmd::Command;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lineagedb"))
}

#[test]
fn test_cli_exits_with_success_on_help() {
    cli().arg("--help").assert().success();
}

#[test]
fn test_cli_status_on_empty_memory_db() {
    cli()
        .args(["--command", "status"])
        .assert()
        .success()
        .stdout("datasets=0 edges=0\n");
}

#[test]
fn test_cli_create_link_and_lineage_roundtrip() {
    let dir = TempDir::new().expect("tempdir");
    let db = dir.path().join("catalog.db");
    let db = db.to_str().expect("path");

    cli()
        .args([
            "--db", db, "create", "--fqn", "prod.bi.bronze.orders",
            "--column", "order_id:bigint",
        ])
        .assert()
        .success();
    cli()
        .args(["--db", db, "create", "--fqn", "prod.bi.silver.orders_clean"])
        .assert()
        .success();
    cli()
        .args([
            "--db", db, "link",
            "--upstream", "prod.bi.bronze.orders",
            "--downstream", "prod.bi.silver.orders_clean",
        ])
        .assert()
        .success()
        .stdout("lineage added\n");
    // Idempotent duplicate.
    cli()
        .args([
            "--db", db, "link",
            "--upstream", "prod.bi.bronze.orders",
            "--downstream", "prod.bi.silver.orders_clean",
        ])
        .assert()
        .success()
        .stdout("lineage already exists\n");

    let output = cli()
        .args(["--db", db, "lineage", "--fqn", "prod.bi.silver.orders_clean"])
        .output()
        .expect("lineage");
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(view["upstream"][0], "prod.bi.bronze.orders");
}

#[test]
fn test_cli_cycle_rejection_fails_with_client_error() {
    let dir = TempDir::new().expect("tempdir");
    let db = dir.path().join("catalog.db");
    let db = db.to_str().expect("path");

    for fqn in ["prod.a", "prod.b"] {
        cli()
            .args(["--db", db, "create", "--fqn", fqn])
            .assert()
            .success();
    }
    cli()
        .args([
            "--db", db, "link", "--upstream", "prod.a", "--downstream", "prod.b",
        ])
        .assert()
        .success();
    cli()
        .args([
            "--db", db, "link", "--upstream", "prod.b", "--downstream", "prod.a",
        ])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_cli_search_orders_results() {
    let dir = TempDir::new().expect("tempdir");
    let db = dir.path().join("catalog.db");
    let db = db.to_str().expect("path");

    cli()
        .args(["--db", db, "create", "--fqn", "prod.bi.sales.orders_raw"])
        .assert()
        .success();
    cli()
        .args([
            "--db", db, "create", "--fqn", "prod.bi.sales.shipments",
            "--column", "order_id",
        ])
        .assert()
        .success();

    let output = cli()
        .args(["--db", db, "search", "--query", "order"])
        .output()
        .expect("search");
    assert!(output.status.success());
    let views: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(views[0]["fqn"], "prod.bi.sales.orders_raw");
    assert_eq!(views[1]["fqn"], "prod.bi.sales.shipments");
}

#[test]
fn test_cli_unknown_command_fails() {
    cli()
        .args(["--command", "bogus"])
        .assert()
        .failure()
        .code(1);
}
