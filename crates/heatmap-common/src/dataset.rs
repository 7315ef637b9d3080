//! Monthly global temperature variance dataset.
//!
//! The wire shape is:
//!
//! ```json
//! { "baseTemperature": 8.66,
//!   "monthlyVariance": [ { "year": 1753, "month": 1, "variance": -1.366 } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{HeatmapError, HeatmapResult};

/// One (year, month) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub year: i32,
    /// 1-based calendar month. Not validated.
    pub month: u32,
    /// Deviation in °C from the dataset's base temperature.
    pub variance: f64,
}

/// The full dataset as published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "baseTemperature")]
    pub base_temperature: f64,

    #[serde(rename = "monthlyVariance")]
    pub points: Vec<DataPoint>,
}

impl Dataset {
    /// Build a dataset, rejecting an empty point list.
    pub fn new(base_temperature: f64, points: Vec<DataPoint>) -> HeatmapResult<Self> {
        let dataset = Self {
            base_temperature,
            points,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parse a dataset from a JSON document.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parse a dataset from raw response bytes.
    pub fn from_slice(bytes: &[u8]) -> HeatmapResult<Self> {
        let dataset: Dataset = serde_json::from_slice(bytes)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load a dataset from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> HeatmapResult<()> {
        if self.points.is_empty() {
            return Err(HeatmapError::EmptyDataset);
        }
        Ok(())
    }

    /// Absolute temperature of a point in °C.
    pub fn temperature(&self, point: &DataPoint) -> f64 {
        self.base_temperature + point.variance
    }

    /// Minimum and maximum variance over all points.
    pub fn variance_extent(&self) -> (f64, f64) {
        self.points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), p| (min.min(p.variance), max.max(p.variance)),
        )
    }

    /// Years in encounter order with duplicates removed.
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut seen = HashSet::new();
        self.points
            .iter()
            .map(|p| p.year)
            .filter(|year| seen.insert(*year))
            .collect()
    }

    /// First and last year present, by value.
    pub fn year_span(&self) -> (i32, i32) {
        self.points.iter().fold((i32::MAX, i32::MIN), |(lo, hi), p| {
            (lo.min(p.year), hi.max(p.year))
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
