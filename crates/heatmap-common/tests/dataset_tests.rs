//! Tests for dataset parsing and statistics.

use heatmap_common::{DataPoint, Dataset, HeatmapError};
use std::io::Write;

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_wire_format() {
    let json = r#"{
        "baseTemperature": 8.66,
        "monthlyVariance": [
            { "year": 1753, "month": 1, "variance": -1.366 },
            { "year": 1753, "month": 2, "variance": -2.223 }
        ]
    }"#;

    let dataset = Dataset::from_json(json).unwrap();
    assert_eq!(dataset.base_temperature, 8.66);
    assert_eq!(dataset.len(), 2);
    assert_eq!(
        dataset.points[1],
        DataPoint {
            year: 1753,
            month: 2,
            variance: -2.223
        }
    );
}

#[test]
fn test_parse_ignores_unknown_fields() {
    let json = r#"{
        "baseTemperature": 8.0,
        "source": "somewhere",
        "monthlyVariance": [ { "year": 1900, "month": 3, "variance": 1.5, "flag": true } ]
    }"#;

    let dataset = Dataset::from_json(json).unwrap();
    assert_eq!(dataset.points[0].month, 3);
}

#[test]
fn test_parse_malformed_json() {
    let err = Dataset::from_json("{ \"baseTemperature\": 8.0, ").unwrap_err();
    assert!(matches!(err, HeatmapError::Parse(_)));
    assert!(err.is_load_error());
}

#[test]
fn test_parse_missing_field() {
    let err = Dataset::from_json(r#"{ "baseTemperature": 8.0 }"#).unwrap_err();
    assert!(matches!(err, HeatmapError::Parse(_)));
}

#[test]
fn test_parse_empty_variance_list() {
    let json = r#"{ "baseTemperature": 8.0, "monthlyVariance": [] }"#;
    let err = Dataset::from_json(json).unwrap_err();
    assert!(matches!(err, HeatmapError::EmptyDataset));
}

#[test]
fn test_month_not_validated() {
    let json = r#"{ "baseTemperature": 8.0,
        "monthlyVariance": [ { "year": 1900, "month": 13, "variance": 0.0 } ] }"#;
    let dataset = Dataset::from_json(json).unwrap();
    assert_eq!(dataset.points[0].month, 13);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "baseTemperature": 8.0, "monthlyVariance": [ {{ "year": 1900, "month": 1, "variance": 0.25 }} ] }}"#
    )
    .unwrap();

    let dataset = Dataset::from_file(file.path()).unwrap();
    assert_eq!(dataset.len(), 1);
}

#[test]
fn test_from_missing_file() {
    let err = Dataset::from_file("/nonexistent/heatmap/data.json").unwrap_err();
    assert!(matches!(err, HeatmapError::Io(_)));
    assert!(!err.is_load_error());
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_temperature_is_base_plus_variance() {
    let dataset = Dataset::from_json(
        r#"{ "baseTemperature": 8.0,
             "monthlyVariance": [ { "year": 1900, "month": 3, "variance": 1.5 } ] }"#,
    )
    .unwrap();

    assert_eq!(dataset.temperature(&dataset.points[0]), 9.5);
}

#[test]
fn test_variance_extent_linear_scan() {
    let points = vec![
        DataPoint { year: 1850, month: 1, variance: 0.4 },
        DataPoint { year: 1850, month: 2, variance: -6.5 },
        DataPoint { year: 1851, month: 1, variance: 3.2 },
        DataPoint { year: 1851, month: 2, variance: 1.0 },
    ];
    let dataset = Dataset::new(8.66, points).unwrap();

    assert_eq!(dataset.variance_extent(), (-6.5, 3.2));
}

#[test]
fn test_distinct_years_collapses_duplicates() {
    let points = (0..36)
        .map(|i| DataPoint {
            year: 1900 + i / 12,
            month: (i % 12) as u32 + 1,
            variance: 0.0,
        })
        .collect();
    let dataset = Dataset::new(8.66, points).unwrap();

    assert_eq!(dataset.distinct_years(), vec![1900, 1901, 1902]);
}

#[test]
fn test_error_messages() {
    let err = HeatmapError::HttpStatus {
        url: "http://localhost/data.json".to_string(),
        status: 404,
    };
    assert_eq!(
        err.to_string(),
        "Dataset request to http://localhost/data.json returned HTTP 404"
    );
    assert!(err.is_load_error());
}
