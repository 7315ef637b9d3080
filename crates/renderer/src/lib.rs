//! Heatmap rendering for monthly temperature variance.
//!
//! - Scales: band (year, month), sequential color, linear legend
//! - Layout: cells, axes and legend computed once per dataset
//! - Hover: a single tooltip driven by pointer events
//! - Output: SVG through the [`surface::DrawingSurface`] trait, PNG via resvg

pub mod chart;
pub mod color;
pub mod config;
pub mod legend;
pub mod numbers;
pub mod palette;
pub mod png;
pub mod raster;
pub mod scale;
pub mod surface;
pub mod svg;
pub mod tooltip;

pub use chart::{Axis, AxisOrient, AxisTick, Cell, Heatmap, Scales};
pub use color::Color;
pub use config::{ChartConfig, LegendConfig, Margin};
pub use legend::{Legend, Swatch};
pub use numbers::format_value_with_decimals;
pub use palette::{Interpolation, Palette, PaletteConfig};
pub use scale::{ticks, BandScale, LinearScale, SequentialScale};
pub use surface::DrawingSurface;
pub use svg::{render_chart_svg, render_legend_svg, SvgSurface};
pub use tooltip::{HoverController, HoverTransition, PointerEvent, Tooltip};
