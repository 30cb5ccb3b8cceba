//! Integration tests for the rowgraph CLI.
//!
//! These run the compiled binary against files in a temporary directory.

use rstest::{fixture, rstest};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

mod common;
use common::run_rowgraph_in_dir;

const ROWS: &str = r#"[
  {"service": "api", "store": "orders", "disk": "ssd1", "tier": "gold"},
  {"service": "api", "store": "users", "disk": "ssd1"},
  {"service": "batch", "store": "orders", "disk": "ssd2"},
  {"service": "batch", "store": null, "disk": "ssd2"}
]"#;

const MAPPING: &str = "\
classes:
  - id: service
    sourceColumn: service
    metadataColumns: [tier]
  - id: store
    sourceColumn: store
  - id: disk
    sourceColumn: disk
    color: '#000000'
relationships:
  - id: uses
    sourceClass: service
    targetClass: store
    sourceColumn: service
    targetColumn: store
  - id: lives-on
    sourceClass: store
    targetClass: disk
    sourceColumn: store
    targetColumn: disk
";

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory with rows, a mapping and a built
/// `dataset.json`.
#[fixture]
fn built_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp.path().join("rows.json"), ROWS).unwrap();
    fs::write(temp.path().join("mapping.yaml"), MAPPING).unwrap();

    let output = run_rowgraph_in_dir(
        temp.path(),
        &[
            "build",
            "--data",
            "rows.json",
            "--mapping",
            "mapping.yaml",
            "--out",
            "dataset.json",
        ],
    );
    assert!(
        output.status.success(),
        "Failed to build dataset: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    temp
}

fn stdout_json(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn id_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[rstest]
fn help_lists_all_commands(temp_dir: TempDir) {
    let output = run_rowgraph_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["build", "paths", "impact", "filter", "reachable"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[rstest]
fn build_reports_counts_legend_and_skips(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &["build", "--data", "rows.json", "--mapping", "mapping.yaml"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("6 entities"));
    assert!(stdout.contains("6 relationships"));
    assert!(stdout.contains("#000000"));
    assert!(stdout.contains("missing_value"));
}

#[rstest]
fn build_json_includes_report_and_metadata(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &["--json", "build", "--data", "rows.json", "--mapping", "mapping.yaml"],
    );

    let json = stdout_json(&output);
    assert_eq!(json["report"]["entitiesCreated"], 6);
    assert_eq!(json["legend"]["disk"], "#000000");
    assert_eq!(json["dataset"]["entities"][0]["id"], "service:api");
    assert_eq!(json["dataset"]["entities"][0]["metadata"]["tier"], "gold");
}

#[rstest]
fn written_dataset_is_loadable(built_dir: TempDir) {
    let dataset = rowgraph::Dataset::load(&built_dir.path().join("dataset.json")).unwrap();

    assert_eq!(dataset.entities.len(), 6);
    assert!(dataset.dangling_relationships().is_empty());
}

#[rstest]
fn paths_json_lists_every_route(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "--json",
            "paths",
            "--dataset",
            "dataset.json",
            "--from",
            "service:api",
            "--to",
            "disk:ssd1,disk:ssd2",
        ],
    );

    let json = stdout_json(&output);
    assert_eq!(json["metrics"]["totalPaths"], 3);
    assert_eq!(json["metrics"]["shortestPathLength"], 3);
    assert_eq!(
        id_list(&json["paths"][0]["nodes"]),
        vec!["service:api", "store:orders", "disk:ssd1"]
    );
    assert_eq!(json["truncated"], false);
}

#[rstest]
fn paths_text_output_shows_routes(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "paths",
            "--dataset",
            "dataset.json",
            "--from",
            "service:batch",
            "--to",
            "disk:ssd2",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("service:batch -> store:orders -> disk:ssd2"));
}

#[rstest]
fn impact_depth_one_is_direct_only(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "--json",
            "impact",
            "--dataset",
            "dataset.json",
            "--from",
            "service:api",
            "--max-depth",
            "1",
        ],
    );

    let json = stdout_json(&output);
    assert_eq!(
        id_list(&json["directImpact"]),
        vec!["store:orders", "store:users"]
    );
    assert!(id_list(&json["indirectImpact"]).is_empty());
}

#[rstest]
fn settings_file_supplies_default_depth(built_dir: TempDir) {
    fs::write(
        built_dir.path().join("rowgraph.yaml"),
        "analysis:\n  max-depth: 1\n",
    )
    .unwrap();

    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "--json",
            "impact",
            "--dataset",
            "dataset.json",
            "--from",
            "service:batch",
        ],
    );

    let json = stdout_json(&output);
    assert_eq!(id_list(&json["directImpact"]), vec!["store:orders"]);
    assert!(id_list(&json["indirectImpact"]).is_empty());
}

#[rstest]
fn filter_by_type_writes_subset(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "filter",
            "--dataset",
            "dataset.json",
            "--from",
            "service:batch",
            "--to-type",
            "disk",
            "--out",
            "filtered.json",
        ],
    );

    assert!(output.status.success());
    let filtered = rowgraph::Dataset::load(&built_dir.path().join("filtered.json")).unwrap();
    let ids: Vec<&str> = filtered.entities.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["service:batch", "store:orders", "disk:ssd1", "disk:ssd2"]
    );
}

#[rstest]
fn filter_uses_settings_budget_and_warns_when_partial(built_dir: TempDir) {
    fs::write(
        built_dir.path().join("rowgraph.yaml"),
        "analysis:\n  max-path-expansions: 1\n",
    )
    .unwrap();

    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "--json",
            "filter",
            "--dataset",
            "dataset.json",
            "--from",
            "service:batch",
            "--to",
            "disk:ssd2",
        ],
    );

    let json = stdout_json(&output);
    assert!(json["entities"].as_array().unwrap().is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("filtered dataset is partial"));
}

#[rstest]
fn filter_without_budget_pressure_stays_quiet(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "--json",
            "filter",
            "--dataset",
            "dataset.json",
            "--from",
            "service:batch",
            "--to",
            "disk:ssd2",
        ],
    );

    let json = stdout_json(&output);
    assert_eq!(json["entities"].as_array().unwrap().len(), 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("partial"));
}

#[rstest]
fn reachable_prints_subgraph_json(built_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "--json",
            "reachable",
            "--dataset",
            "dataset.json",
            "--from",
            "store:users",
        ],
    );

    let json = stdout_json(&output);
    let entities = json["entities"].as_array().unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(json["relationships"].as_array().unwrap().len(), 1);
}

#[rstest]
#[case::zero("0")]
#[case::above_limit("21")]
#[case::not_a_number("deep")]
fn out_of_range_depth_is_rejected(built_dir: TempDir, #[case] depth: &str) {
    let output = run_rowgraph_in_dir(
        built_dir.path(),
        &[
            "impact",
            "--dataset",
            "dataset.json",
            "--from",
            "service:api",
            "--max-depth",
            depth,
        ],
    );

    assert!(!output.status.success());
}

#[rstest]
fn missing_dataset_fails_with_error_message(temp_dir: TempDir) {
    let output = run_rowgraph_in_dir(
        temp_dir.path(),
        &["impact", "--dataset", "nope.json", "--from", "a"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
}

#[rstest]
fn invalid_mapping_reports_mapping_error(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("rows.json"), ROWS).unwrap();
    fs::write(temp_dir.path().join("mapping.yaml"), "classes: [oops").unwrap();

    let output = run_rowgraph_in_dir(
        temp_dir.path(),
        &["build", "--data", "rows.json", "--mapping", "mapping.yaml"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mapping error"));
}
