//! Dataset fixtures with hand-checked statistics.

use heatmap_common::{DataPoint, Dataset};

/// A small document in the published wire format.
///
/// Three years, six records, variance range [-2.223, 0.75].
pub const SAMPLE_JSON: &str = r#"{
  "baseTemperature": 8.66,
  "monthlyVariance": [
    { "year": 1753, "month": 1, "variance": -1.366 },
    { "year": 1753, "month": 2, "variance": -2.223 },
    { "year": 1753, "month": 3, "variance": 0.211 },
    { "year": 1754, "month": 1, "variance": -1.5 },
    { "year": 1754, "month": 6, "variance": 0.75 },
    { "year": 1755, "month": 12, "variance": -0.038 }
  ]
}"#;

/// Minimum variance in [`SAMPLE_JSON`].
pub const SAMPLE_MIN_VARIANCE: f64 = -2.223;

/// Maximum variance in [`SAMPLE_JSON`].
pub const SAMPLE_MAX_VARIANCE: f64 = 0.75;

/// Base temperature used by [`hover_dataset`].
pub const HOVER_BASE_TEMPERATURE: f64 = 8.0;

fn point(year: i32, month: u32, variance: f64) -> DataPoint {
    DataPoint {
        year,
        month,
        variance,
    }
}

/// Parsed [`SAMPLE_JSON`].
pub fn sample_dataset() -> Dataset {
    Dataset::from_json(SAMPLE_JSON).expect("sample fixture must parse")
}

/// A single March 1900 record with variance 1.5 over a base of 8.0.
pub fn hover_dataset() -> Dataset {
    Dataset::new(HOVER_BASE_TEMPERATURE, vec![point(1900, 3, 1.5)])
        .expect("hover fixture is non-empty")
}

/// Records spanning variance -6.5 to 3.2.
pub fn extreme_dataset() -> Dataset {
    Dataset::new(
        8.66,
        vec![
            point(1850, 1, 0.4),
            point(1850, 2, -6.5),
            point(1851, 7, 1.1),
            point(1852, 8, 3.2),
            point(1852, 9, -0.9),
        ],
    )
    .expect("extreme fixture is non-empty")
}

/// Every record has the same variance.
pub fn constant_dataset() -> Dataset {
    Dataset::new(
        9.0,
        vec![point(2000, 1, 0.5), point(2000, 2, 0.5), point(2001, 1, 0.5)],
    )
    .expect("constant fixture is non-empty")
}
