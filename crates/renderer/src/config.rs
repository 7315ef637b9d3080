//! Chart dimensions and styling.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```yaml
//! width: 1000
//! margin:
//!   left: 80
//! legend:
//!   tick_count: 6
//! ```

use serde::{Deserialize, Serialize};

use heatmap_common::{HeatmapError, HeatmapResult};

use crate::palette::PaletteConfig;

/// Space reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 50.0,
            bottom: 100.0,
            left: 50.0,
        }
    }
}

/// Legend strip configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub width: f64,
    pub height: f64,
    /// Requested number of ticks; the actual count follows the round-number
    /// spacing of the color domain.
    pub tick_count: usize,
    /// Font size of the value labels.
    pub font_size: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 20.0,
            tick_count: 4,
            font_size: 10.0,
        }
    }
}

/// Full chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Inner and outer band padding for both axes.
    pub padding: f64,
    /// Only years divisible by this get an x-axis tick.
    pub year_tick_interval: i32,
    /// Tooltip placement relative to the pointer.
    pub tooltip_offset: f64,
    pub font_size: f64,
    pub legend: LegendConfig,
    pub palette: PaletteConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: Margin::default(),
            cell_width: 20.0,
            cell_height: 20.0,
            padding: 0.1,
            year_tick_interval: 10,
            tooltip_offset: 10.0,
            font_size: 10.0,
            legend: LegendConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Horizontal pixel range available to the year bands.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width - self.margin.right)
    }

    /// Vertical pixel range available to the month bands.
    pub fn y_range(&self) -> (f64, f64) {
        (self.margin.top, self.height - self.margin.bottom)
    }

    /// Check that the configuration describes a drawable chart.
    pub fn validate(&self) -> HeatmapResult<()> {
        let invalid = |msg: String| Err(HeatmapError::Render(msg));

        if !(self.width > 0.0 && self.height > 0.0) {
            return invalid(format!(
                "chart size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();
        if x1 <= x0 || y1 <= y0 {
            return invalid("margins leave no room for the plot area".to_string());
        }
        if !(self.cell_width > 0.0 && self.cell_height > 0.0) {
            return invalid("cell size must be positive".to_string());
        }
        if !(0.0..1.0).contains(&self.padding) {
            return invalid(format!("padding must be in [0, 1), got {}", self.padding));
        }
        if self.year_tick_interval <= 0 {
            return invalid("year_tick_interval must be positive".to_string());
        }
        if !(self.legend.width > 0.0 && self.legend.height > 0.0) {
            return invalid("legend size must be positive".to_string());
        }
        if self.legend.tick_count == 0 {
            return invalid("legend tick_count must be positive".to_string());
        }
        Ok(())
    }
}
