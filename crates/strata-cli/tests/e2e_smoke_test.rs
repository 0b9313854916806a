use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use strata::{StrataError, export::RenderFormat, relationship::RelationshipScope};
use strata_cli::{
    Args, UNIQUE_NAMES_FILE,
    args::{Command, InventoryArgs, RelationshipArgs},
};

fn sample(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../samples")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("config.toml");
    fs::write(&path, "[style]\nicon_dir = \"\"\n").expect("Failed to write config");
    path.to_string_lossy().to_string()
}

fn inventory_args(dir: &Path, input: String, xref: Option<String>) -> Args {
    Args {
        command: Command::Inventory(InventoryArgs {
            input,
            xref,
            output: dir.join("graphviz_output").to_string_lossy().to_string(),
            render: None,
        }),
        config: Some(write_config(dir)),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_inventory_sample() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("graphviz_output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("Retired.dot"), "digraph {}").unwrap();

    let args = inventory_args(
        temp_dir.path(),
        sample("inventory.csv"),
        Some(sample("xref.csv")),
    );
    strata_cli::run(&args).expect("Inventory sample failed");

    let payroll = fs::read_to_string(output.join("Payroll.dot")).unwrap();
    assert!(payroll.starts_with("digraph \"Payroll\""));
    assert!(payroll.contains("https://payroll.example"));
    assert!(!payroll.contains("appweb01-dev-01"));

    let hr = fs::read_to_string(output.join("HR.dot")).unwrap();
    assert!(hr.contains("https://hr.example"));

    assert!(!output.join("Retired.dot").exists());

    let unique_names = fs::read_to_string(output.join(UNIQUE_NAMES_FILE)).unwrap();
    assert!(unique_names.starts_with("AppName,type,name,UniqueName"));
    assert!(unique_names.contains("appweb01-prd-01"));
}

#[test]
fn e2e_smoke_test_inventory_is_repeatable() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("graphviz_output");
    let args = inventory_args(temp_dir.path(), sample("inventory.csv"), None);

    strata_cli::run(&args).unwrap();
    let first = fs::read_to_string(output.join("Payroll.dot")).unwrap();
    strata_cli::run(&args).unwrap();
    let second = fs::read_to_string(output.join("Payroll.dot")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn e2e_smoke_test_relationship_sample() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("bmp_output");

    let args = Args {
        command: Command::Relationships(RelationshipArgs {
            input: sample("relationships.csv"),
            app: RelationshipScope::All,
            legend: true,
            output: output.to_string_lossy().to_string(),
            render: None,
        }),
        config: Some(write_config(temp_dir.path())),
        log_level: "off".to_string(),
    };
    strata_cli::run(&args).expect("Relationship sample failed");

    let dot = fs::read_to_string(output.join("relationship_map_all_legend.dot")).unwrap();
    assert!(dot.starts_with("digraph \"Relationships\""));
    assert!(dot.contains("Payroll"));
    assert!(dot.contains("cluster_legend"));
}

#[test]
fn e2e_smoke_test_render_failure_keeps_run_going() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("graphviz_output");
    // A directory where the image belongs makes rendering Payroll fail.
    fs::create_dir_all(output.join("Payroll.svg")).unwrap();

    let mut args = inventory_args(temp_dir.path(), sample("inventory.csv"), None);
    if let Command::Inventory(cmd) = &mut args.command {
        cmd.render = Some(RenderFormat::Svg);
    }
    strata_cli::run(&args).expect("Render failure ended the run");

    assert!(output.join("Payroll.svg").is_dir());
    assert!(output.join("Payroll.dot").is_file());
    assert!(output.join("HR.dot").is_file());
    let unique_names = fs::read_to_string(output.join(UNIQUE_NAMES_FILE)).unwrap();
    assert!(unique_names.starts_with("AppName,type,name,UniqueName"));
}

#[test]
fn e2e_smoke_test_missing_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.csv");
    let args = inventory_args(
        temp_dir.path(),
        missing.to_string_lossy().to_string(),
        None,
    );

    let err = strata_cli::run(&args).unwrap_err();

    assert!(matches!(err, StrataError::Io(_)));
}

#[test]
fn e2e_smoke_test_malformed_inventory() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("inventory.csv");
    fs::write(&input, "AppName,type,name\nPayroll,vm,app01\n").unwrap();
    let args = inventory_args(temp_dir.path(), input.to_string_lossy().to_string(), None);

    let err = strata_cli::run(&args).unwrap_err();

    assert!(matches!(err, StrataError::Inventory { .. }));
    assert!(!strata_cli::error_adapter::to_reportables(&err).is_empty());
}
