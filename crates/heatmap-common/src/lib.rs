//! Common types shared by the heatmap renderer and service.

pub mod dataset;
pub mod error;
pub mod month;

pub use dataset::{DataPoint, Dataset};
pub use error::{HeatmapError, HeatmapResult};
pub use month::{month_name, MONTHS};
