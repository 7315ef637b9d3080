//! Synthetic dataset generators.
//!
//! These create predictable, verifiable datasets so tests can check
//! scale and layout output without the published document.

use heatmap_common::{DataPoint, Dataset};

/// Creates a full calendar dataset: every month of `years` consecutive years.
///
/// Variance for a record is `(year_offset % 7) * 0.5 - 1.5 + month * 0.01`,
/// so the range is known in advance: min is -1.49 (offset 0, January) and
/// max is 1.62 (offset 6, December) once at least seven years are present.
///
/// # Example
///
/// ```
/// use test_utils::create_calendar_dataset;
///
/// let dataset = create_calendar_dataset(1900, 3, 8.0);
/// assert_eq!(dataset.points.len(), 36);
/// assert_eq!(dataset.points[0].year, 1900);
/// assert_eq!(dataset.points[12].month, 1);
/// ```
pub fn create_calendar_dataset(start_year: i32, years: usize, base_temperature: f64) -> Dataset {
    let mut points = Vec::with_capacity(years * 12);
    for offset in 0..years {
        for month in 1..=12u32 {
            let variance = (offset % 7) as f64 * 0.5 - 1.5 + month as f64 * 0.01;
            points.push(DataPoint {
                year: start_year + offset as i32,
                month,
                variance,
            });
        }
    }
    Dataset::new(base_temperature, points).expect("years must be non-zero")
}

/// Serializes a dataset into the published wire format.
pub fn dataset_to_json(dataset: &Dataset) -> String {
    serde_json::to_string(dataset).expect("dataset always serializes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_dataset_extent() {
        let dataset = create_calendar_dataset(1800, 10, 8.66);
        let (min, max) = dataset.variance_extent();
        assert!((min - -1.49).abs() < 1e-9);
        assert!((max - 1.62).abs() < 1e-9);
        assert_eq!(dataset.distinct_years().len(), 10);
    }

    #[test]
    fn test_wire_format_field_names() {
        let json = dataset_to_json(&create_calendar_dataset(1800, 1, 8.66));
        assert!(json.contains("\"baseTemperature\""));
        assert!(json.contains("\"monthlyVariance\""));
    }
}
