//! Color palettes for sequential scales.
//!
//! A palette maps a normalized position `t` in `[0, 1]` to a color. The
//! default is the 9-class yellow-orange-red ramp interpolated with a uniform
//! cubic B-spline through the stops, which keeps the endpoints exact while
//! smoothing the transitions between classes.

use serde::{Deserialize, Serialize};

use crate::color::{interpolate_color, Color};

/// The 9-class YlOrRd scheme, light to dark.
pub const YL_OR_RD: [&str; 9] = [
    "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
    "#800026",
];

/// How to blend between palette stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Uniform cubic B-spline through all stops.
    #[default]
    Basis,
    /// Piecewise linear between neighbouring stops.
    Linear,
}

/// Palette configuration as it appears in a chart config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Hex color stops, low to high.
    #[serde(default = "default_stops")]
    pub stops: Vec<String>,
    #[serde(default)]
    pub interpolation: Interpolation,
}

fn default_stops() -> Vec<String> {
    YL_OR_RD.iter().map(|s| s.to_string()).collect()
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            stops: default_stops(),
            interpolation: Interpolation::default(),
        }
    }
}

/// A resolved palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    stops: Vec<Color>,
    interpolation: Interpolation,
}

impl Palette {
    /// Build a palette from at least two colors.
    pub fn new(stops: Vec<Color>, interpolation: Interpolation) -> Result<Self, String> {
        if stops.len() < 2 {
            return Err(format!(
                "palette needs at least 2 stops, got {}",
                stops.len()
            ));
        }
        Ok(Self {
            stops,
            interpolation,
        })
    }

    /// The default yellow-orange-red ramp.
    pub fn yl_or_rd() -> Self {
        let stops = YL_OR_RD
            .iter()
            .filter_map(|hex| Color::from_hex(hex))
            .collect();
        Self {
            stops,
            interpolation: Interpolation::Basis,
        }
    }

    /// Resolve hex stops from configuration.
    pub fn from_config(config: &PaletteConfig) -> Result<Self, String> {
        let stops = config
            .stops
            .iter()
            .map(|hex| Color::from_hex(hex).ok_or_else(|| format!("invalid color stop '{}'", hex)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stops, config.interpolation)
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at position `t`; values outside `[0, 1]` clamp to the endpoints.
    pub fn interpolate(&self, t: f64) -> Color {
        match self.interpolation {
            Interpolation::Basis => self.interpolate_basis(t),
            Interpolation::Linear => self.interpolate_linear(t),
        }
    }

    fn interpolate_linear(&self, t: f64) -> Color {
        let n = self.stops.len() - 1;
        let t = t.clamp(0.0, 1.0);
        let i = ((t * n as f64).floor() as usize).min(n - 1);
        let local = t * n as f64 - i as f64;
        interpolate_color(self.stops[i], self.stops[i + 1], local)
    }

    fn interpolate_basis(&self, t: f64) -> Color {
        let reds: Vec<f64> = self.stops.iter().map(|c| c.r as f64).collect();
        let greens: Vec<f64> = self.stops.iter().map(|c| c.g as f64).collect();
        let blues: Vec<f64> = self.stops.iter().map(|c| c.b as f64).collect();
        Color::from_channels(
            basis_spline(&reds, t),
            basis_spline(&greens, t),
            basis_spline(&blues, t),
        )
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::yl_or_rd()
    }
}

/// Evaluate a uniform cubic B-spline through `values` at `t`.
///
/// Phantom end points (`2*v1 - v2`) make the curve pass exactly through the
/// first and last values.
fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (i, t) = if t <= 0.0 {
        (0, 0.0)
    } else if t >= 1.0 {
        (n - 1, 1.0)
    } else {
        ((t * n as f64).floor() as usize, t)
    };

    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };

    basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}
