//! Path utilities for locating test data files.

use std::path::PathBuf;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the workspace-level `testdata/` directory.
pub fn testdata_dir() -> PathBuf {
    workspace_root().join("testdata")
}

/// Path to the checked-in two-year dataset (1753-1754, 24 records, base 8.66).
pub fn sample_dataset_path() -> PathBuf {
    testdata_dir().join("global-temperature-sample.json")
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("heatmap_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}
