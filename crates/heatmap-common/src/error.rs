//! Error types for the heatmap crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for loading and rendering.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Load Errors ===
    #[error("Failed to fetch dataset from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Dataset request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed dataset: {0}")]
    Parse(String),

    #[error("Dataset contains no monthly variance records")]
    EmptyDataset,

    #[error("I/O error: {0}")]
    Io(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),
}

impl HeatmapError {
    /// Whether the error happened before any rendering started.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            HeatmapError::Fetch { .. }
                | HeatmapError::HttpStatus { .. }
                | HeatmapError::Parse(_)
                | HeatmapError::EmptyDataset
        )
    }
}

impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::Parse(err.to_string())
    }
}
