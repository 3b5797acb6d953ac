//! End-to-end integration tests: JSON artifacts + CSV -> score -> CSV -> report.

use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use forestdrift_core::{ForestError, TreeError, VotePolicy};
use forestdrift_io::{
    AgreementReport, ForestReader, IoError, ScalerReader, ScoringDriver, TableReader, TableWriter,
};
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load the fixture artifacts, score `data`, and write the result to `out`.
fn run(data: &Path, out: &Path) -> Result<Option<AgreementReport>, IoError> {
    let forest = ForestReader::new(&fixture_path("rf_model.json")).read()?;
    let scaler = ScalerReader::new(&fixture_path("scaler.json")).read()?;
    let mut table = TableReader::new(data).read()?;
    ScoringDriver::new(&forest, &scaler).score_into(&mut table)?;
    TableWriter::new(out).write(&table)?;
    Ok(AgreementReport::from_table(&table, "python_label"))
}

#[test]
fn score_round_trip() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("test.csv");

    let report = run(&fixture_path("test.csv"), &out)
        .expect("fixture pipeline should succeed")
        .expect("fixture has a python_label column");

    let table = TableReader::new(&out).read().unwrap();
    assert_eq!(
        table.header(),
        &["x0", "x1", "label", "python_label", "go_label", "fixed_go_label"]
    );
    assert_eq!(table.column("go_label").unwrap(), vec!["1", "1", "0", "0"]);
    assert_eq!(table.column("fixed_go_label").unwrap(), vec!["1", "0", "0", "1"]);
    // Input columns survive byte-for-byte.
    assert_eq!(table.column("x0").unwrap(), vec!["2.0", "0.5", "-1.0", "3.0"]);

    assert_eq!(report.n_rows, 4);
    assert_eq!(report.vs_reference[0].matches, 2);
    assert_abs_diff_eq!(report.vs_reference[0].percent, 50.0);
    assert_eq!(report.vs_reference[1].matches, 4);
    assert_abs_diff_eq!(report.vs_reference[1].percent, 100.0);
    assert_eq!(report.vs_truth.len(), 2);
    assert_eq!(report.n_policy_disagreements, Some(2));
}

#[test]
fn rescoring_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    run(&fixture_path("test.csv"), &first).unwrap();
    run(&first, &second).unwrap();

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn in_place_overwrite() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("test.csv");
    fs::copy(fixture_path("test.csv"), &data).unwrap();

    run(&data, &data).unwrap();
    run(&data, &data).unwrap();

    let table = TableReader::new(&data).read().unwrap();
    assert_eq!(table.header().len(), 6);
    assert_eq!(table.n_rows(), 4);
}

#[test]
fn single_stale_output_column_is_refreshed() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("stale.csv");
    fs::write(
        &data,
        "x0,go_label,x1,python_label\n2.0,9,3.0,1\n0.5,9,0.5,0\n-1.0,9,2.0,0\n3.0,9,-1.0,1\n",
    )
    .unwrap();

    run(&data, &data).unwrap();

    let table = TableReader::new(&data).read().unwrap();
    assert_eq!(
        table.header(),
        &["x0", "go_label", "x1", "python_label", "fixed_go_label"]
    );
    assert_eq!(table.column("go_label").unwrap(), vec!["1", "1", "0", "0"]);
    assert_eq!(table.column("fixed_go_label").unwrap(), vec!["1", "0", "0", "1"]);
}

#[test]
fn missing_reference_column_skips_report() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("plain.csv");
    fs::write(&data, "x0,x1\n2.0,3.0\n0.5,0.5\n").unwrap();

    let report = run(&data, &data).unwrap();
    assert!(report.is_none());

    let table = TableReader::new(&data).read().unwrap();
    assert_eq!(table.column("fixed_go_label").unwrap(), vec!["1", "0"]);
}

#[test]
fn narrow_table_aborts_without_writing() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("narrow.csv");
    let original = "x0,python_label\n2.0,1\n";
    fs::write(&data, original).unwrap();

    let err = run(&data, &data).unwrap_err();
    match err {
        IoError::RowPrediction {
            row_index,
            policy,
            source,
        } => {
            assert_eq!(row_index, 0);
            assert_eq!(policy, VotePolicy::MajorityHardVote);
            assert_eq!(
                source,
                ForestError::Tree {
                    tree_index: 1,
                    source: TreeError::OutOfRange {
                        feature_index: 1,
                        sample_len: 1
                    }
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_to_string(&data).unwrap(), original);
}
