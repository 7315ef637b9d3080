//! Chart configuration loading.
//!
//! The chart config is optional. Without a file every value takes its
//! default; a YAML file only needs the values it overrides.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use renderer::ChartConfig;

/// Parse and validate a YAML chart config.
pub fn parse_chart_config(yaml: &str) -> Result<ChartConfig> {
    // An empty document is valid and means "all defaults".
    if yaml.trim().is_empty() {
        return Ok(ChartConfig::default());
    }
    let config: ChartConfig =
        serde_yaml::from_str(yaml).context("Failed to parse chart config")?;
    config.validate().context("Invalid chart config")?;
    Ok(config)
}

/// Load the chart config from `path`, or the defaults when no path is given.
pub fn load_chart_config(path: Option<&Path>) -> Result<ChartConfig> {
    let Some(path) = path else {
        return Ok(ChartConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart config: {}", path.display()))?;
    let config = parse_chart_config(&content)
        .with_context(|| format!("Failed to load chart config: {}", path.display()))?;

    info!(
        path = %path.display(),
        width = config.width,
        height = config.height,
        "Loaded chart config"
    );
    Ok(config)
}
