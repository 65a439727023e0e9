//! Tests for CSV grid parsing.

use contour_common::ContourError;
use csv_grid_parser::{parse_grid_csv, read_grid_csv};
use std::io::Write;
use test_utils::{BAD_STEP_CSV, CLIFF_CSV, ELEVATION_CSV, PLATEAU_CSV, RAGGED_CSV};

// ============================================================================
// Valid input
// ============================================================================

#[test]
fn test_parse_cliff() {
    let parsed = parse_grid_csv(CLIFF_CSV).unwrap();
    assert_eq!(parsed.step, 5.0);
    assert_eq!(parsed.grid.cols(), 4);
    assert_eq!(parsed.grid.rows(), 2);
    assert_eq!(parsed.grid.row(0), &[0.0, 0.0, 10.0, 10.0]);
}

#[test]
fn test_parse_elevation_whitespace() {
    let parsed = parse_grid_csv(ELEVATION_CSV).unwrap();
    assert_eq!(parsed.step, 0.5);
    assert_eq!(parsed.grid.cols(), 5);
    assert_eq!(parsed.grid.rows(), 5);

    let range = parsed.grid.value_range();
    assert_eq!(range.min, -1.0);
    assert_eq!(range.max, 3.0);
}

#[test]
fn test_parse_plateau() {
    let parsed = parse_grid_csv(PLATEAU_CSV).unwrap();
    assert!(parsed.grid.data().iter().all(|&v| v == 7.0));
}

#[test]
fn test_parse_skips_blank_lines() {
    let parsed = parse_grid_csv("\n\n3\n\n1,2\n\n3,4\n\n").unwrap();
    assert_eq!(parsed.step, 3.0);
    assert_eq!(parsed.grid.rows(), 2);
}

#[test]
fn test_parse_negative_and_exponent() {
    let parsed = parse_grid_csv("1e-1\n-2.5,1e2\n").unwrap();
    assert!((parsed.step - 0.1).abs() < 1e-7);
    assert_eq!(parsed.grid.row(0), &[-2.5, 100.0]);
}

// ============================================================================
// Invalid input
// ============================================================================

#[test]
fn test_parse_empty() {
    let err = parse_grid_csv("").unwrap_err();
    assert!(matches!(err, ContourError::Parse { line: 1, .. }));

    let err = parse_grid_csv("   \n\n").unwrap_err();
    assert!(matches!(err, ContourError::Parse { .. }));
}

#[test]
fn test_parse_bad_step() {
    let err = parse_grid_csv(BAD_STEP_CSV).unwrap_err();
    match err {
        ContourError::Parse { line, message } => {
            assert_eq!(line, 1);
            assert!(message.contains("step"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parse_bad_value_reports_line_and_column() {
    let err = parse_grid_csv("1\n1,2\n3,x\n").unwrap_err();
    match err {
        ContourError::Parse { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("column 2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parse_ragged() {
    let err = parse_grid_csv(RAGGED_CSV).unwrap_err();
    assert!(matches!(err, ContourError::Parse { line: 3, .. }));
}

#[test]
fn test_parse_no_rows() {
    let err = parse_grid_csv("1\n").unwrap_err();
    assert!(matches!(err, ContourError::InvalidGrid(_)));
}

#[test]
fn test_parse_trailing_comma() {
    let with = parse_grid_csv("1\n1,2,\n3,4,\n").unwrap();
    let without = parse_grid_csv("1\n1,2\n3,4\n").unwrap();
    assert_eq!(with, without);
    assert_eq!(with.grid.row(0), &[1.0, 2.0]);
}

#[test]
fn test_parse_empty_inner_field_rejected() {
    // Only trailing empties are dropped
    assert!(parse_grid_csv("1\n1,,2\n").is_err());
    assert!(parse_grid_csv("1\n,\n").is_err());
}

#[test]
fn test_parse_nan_rejected() {
    let err = parse_grid_csv("1\n1,NaN\n").unwrap_err();
    assert!(matches!(err, ContourError::InvalidGrid(_)));
}

// ============================================================================
// File input
// ============================================================================

#[test]
fn test_read_grid_csv() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CLIFF_CSV.as_bytes()).unwrap();

    let parsed = read_grid_csv(file.path()).unwrap();
    assert_eq!(parsed.grid.cols(), 4);
}

#[test]
fn test_read_grid_csv_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_grid_csv(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, ContourError::Io(_)));
    assert!(!err.is_input_error());
}
