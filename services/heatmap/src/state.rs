//! Application state for the heatmap server.

use tokio::sync::Mutex;

use heatmap_common::{Dataset, HeatmapResult};
use renderer::{render_legend_svg, ChartConfig, Heatmap, HoverController};

/// Shared application state.
///
/// The layout is immutable after startup. The single tooltip sits behind a
/// mutex so pointer events are applied one at a time.
pub struct AppState {
    pub heatmap: Heatmap,

    /// Legend document, rendered once since it never changes.
    pub legend_svg: String,

    pub hover: Mutex<HoverController>,
}

impl AppState {
    /// Lay out the chart for `dataset`.
    pub fn new(dataset: &Dataset, config: &ChartConfig) -> HeatmapResult<Self> {
        Self::from_heatmap(Heatmap::build(dataset, config)?)
    }

    /// Wrap an already laid-out chart.
    pub fn from_heatmap(heatmap: Heatmap) -> HeatmapResult<Self> {
        let legend_svg = render_legend_svg(&heatmap)?;
        let hover = Mutex::new(HoverController::new(heatmap.config().tooltip_offset));

        Ok(Self {
            heatmap,
            legend_svg,
            hover,
        })
    }
}
