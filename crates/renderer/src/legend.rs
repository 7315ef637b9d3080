//! Discrete color legend.
//!
//! The legend samples the color scale at its round-number ticks and draws
//! one equal-width swatch per tick with the value printed beneath it.

use heatmap_common::HeatmapResult;

use crate::color::Color;
use crate::config::LegendConfig;
use crate::numbers::format_value_with_decimals;
use crate::scale::{LinearScale, SequentialScale};
use crate::surface::{DrawingSurface, RectElement, TextAnchor, TextElement};

/// Gap between the swatch strip and the baseline of its labels.
const LABEL_OFFSET: f64 = 10.0;

/// One colored swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub value: f64,
    pub x: f64,
    pub width: f64,
    pub fill: Color,
}

impl Swatch {
    /// Value to two decimals.
    pub fn label(&self) -> String {
        format_value_with_decimals(self.value, 2)
    }
}

/// Laid-out legend.
#[derive(Debug, Clone)]
pub struct Legend {
    width: f64,
    height: f64,
    font_size: f64,
    swatches: Vec<Swatch>,
    scale: LinearScale,
}

impl Legend {
    /// Lay out the legend for a color scale.
    pub fn build(color: &SequentialScale, config: &LegendConfig) -> Self {
        let ticks = color.ticks(config.tick_count);

        let domain = match (ticks.first(), ticks.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => color.domain(),
        };
        let scale = LinearScale::new(domain, (0.0, config.width));

        let swatch_width = if ticks.is_empty() {
            0.0
        } else {
            config.width / ticks.len() as f64
        };
        let swatches = ticks
            .iter()
            .enumerate()
            .map(|(i, &value)| Swatch {
                value,
                x: i as f64 * swatch_width,
                width: swatch_width,
                fill: color.map(value),
            })
            .collect();

        Self {
            width: config.width,
            height: config.height,
            font_size: config.font_size,
            swatches,
            scale,
        }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Maps legend values onto the strip, first tick at 0 and last at the
    /// full width.
    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Draw swatches, then labels in a group beneath the strip.
    pub fn draw<S: DrawingSurface>(&self, surface: &mut S) -> HeatmapResult<()> {
        for swatch in &self.swatches {
            let mut rect = RectElement::new(swatch.x, 0.0, swatch.width, self.height, swatch.fill);
            rect.class = Some("legend-swatch");
            rect.data.push(("value", swatch.value.to_string()));
            surface.draw_rect(&rect)?;
        }

        surface.begin_group(None, (0.0, self.height))?;
        for swatch in &self.swatches {
            surface.draw_text(&TextElement {
                x: swatch.x,
                y: LABEL_OFFSET,
                content: swatch.label(),
                anchor: TextAnchor::Middle,
                font_size: self.font_size,
            })?;
        }
        surface.end_group()
    }
}
