//! End-to-end tests for Palmer CLI commands.
//!
//! These tests verify that the CLI produces expected output
//! for the bundled sample and for user-provided CSV files.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin for tests

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// A temporary directory holding a penguin CSV.
struct TestData {
    temp_dir: TempDir,
    csv_path: PathBuf,
}

impl TestData {
    fn new(source: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let csv_path = temp_dir.path().join("penguins.csv");
        fs::write(&csv_path, source).expect("Failed to write CSV");

        Self { temp_dir, csv_path }
    }

    fn path(&self) -> &PathBuf {
        &self.csv_path
    }

    fn dir(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}

fn three_rows() -> String {
    "\
species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
Adelie,Biscoe,37.8,18.3,174,3400,female,2007
Gentoo,Dream,46.1,13.2,211,4500,female,2007
Chinstrap,Torgersen,46.5,17.9,192,3500,female,2007
"
    .to_string()
}

fn palmer() -> Command {
    Command::cargo_bin("palmer").expect("binary builds")
}

// =============================================================================
// inputs
// =============================================================================

#[test]
fn inputs_lists_every_input() {
    palmer()
        .arg("inputs")
        .assert()
        .success()
        .stdout(predicate::str::contains("selected_attribute"))
        .stdout(predicate::str::contains("plotly_bin_count"))
        .stdout(predicate::str::contains("seaborn_bin_count"))
        .stdout(predicate::str::contains("selected_species_list"))
        .stdout(predicate::str::contains("selected_island_list"))
        .stdout(predicate::str::contains("slider 5..=50 step 1 (default 20)"));
}

#[test]
fn inputs_as_json() {
    let output = palmer().args(["inputs", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let inputs = json.as_array().unwrap();
    assert_eq!(inputs.len(), 5);
    assert_eq!(inputs[3]["type"], "checkbox_group");
}

// =============================================================================
// show
// =============================================================================

#[test]
fn show_filters_by_species() {
    palmer()
        .args(["show", "--output", "penguins_datatable", "--species", "Gentoo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14 of 64 rows selected"))
        .stdout(predicate::str::contains("(14 rows)"))
        .stdout(predicate::str::contains("Adelie").not());
}

#[test]
fn show_with_empty_selection() {
    palmer()
        .args(["show", "--output", "penguins_datagrid", "--island"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 rows)"));
}

#[test]
fn show_three_row_file() {
    let data = TestData::new(&three_rows());

    palmer()
        .arg("show")
        .arg("--data")
        .arg(data.path())
        .args(["--species", "Adelie,Gentoo", "--output", "penguins_datatable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 3 rows selected"))
        .stdout(predicate::str::contains("Chinstrap").not());
}

#[test]
fn show_histogram_as_json() {
    let output = palmer()
        .args([
            "show",
            "--output",
            "histogram_plot",
            "--format",
            "json",
            "--attribute",
            "body_mass_g",
            "--plotly-bins",
            "7",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], "histogram_plot");
    assert_eq!(json["data"]["layout"]["barmode"], "stack");
    assert_eq!(json["data"]["layout"]["xaxis"]["title"]["text"], "Body Mass G");
    assert_eq!(json["data"]["data"][0]["x"].as_array().unwrap().len(), 7);
}

#[test]
fn show_every_output_by_default() {
    palmer()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("(penguins_datatable)"))
        .stdout(predicate::str::contains("(penguins_datagrid)"))
        .stdout(predicate::str::contains("Penguin Attribute Histogram"))
        .stdout(predicate::str::contains("Penguin Attribute vs Body Mass"))
        .stdout(predicate::str::contains("Distribution of Bill Length Mm"));
}

#[test]
fn show_unknown_output_fails_with_hint() {
    palmer()
        .args(["show", "--output", "pie_chart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output: pie_chart"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn show_invalid_attribute_fails_with_hint() {
    palmer()
        .args(["show", "--attribute", "wingspan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a measurement column"))
        .stderr(predicate::str::contains("palmer inputs"));
}

#[test]
fn show_missing_data_file_fails() {
    let dir = TempDir::new().unwrap();
    palmer()
        .arg("show")
        .arg("--data")
        .arg(dir.path().join("missing.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn show_malformed_csv_fails() {
    let data = TestData::new("species,island\nAdelie,Biscoe\n");
    palmer()
        .arg("show")
        .arg("--data")
        .arg(data.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bill_length_mm"));
}

// =============================================================================
// export
// =============================================================================

#[test]
fn export_writes_standalone_page() {
    let data = TestData::new(&three_rows());
    let out = data.dir().join("dashboard.html");

    palmer()
        .arg("export")
        .arg("--data")
        .arg(data.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<title>Palmer Penguins</title>"));
    assert!(html.contains("cdn.plot.ly"));
    assert!(html.contains("id=\"histogram_plot\""));
    assert!(html.contains("id=\"distribution_plot\""));
    assert!(html.contains("Chinstrap"));
}
