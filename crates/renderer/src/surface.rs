//! Abstract drawing surface.
//!
//! Charts describe themselves as a sequence of primitive drawing calls so
//! the same layout can be emitted as SVG, recorded in tests, or sent to any
//! other backend.

use heatmap_common::HeatmapResult;

use crate::color::Color;
use crate::tooltip::Tooltip;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A filled rectangle carrying inspectable data attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub class: Option<&'static str>,
    /// `data-*` attributes without the prefix, in output order.
    pub data: Vec<(&'static str, String)>,
    /// Hover text for viewers that support native titles.
    pub title: Option<String>,
}

impl RectElement {
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
            class: None,
            data: Vec::new(),
            title: None,
        }
    }
}

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub anchor: TextAnchor,
    pub font_size: f64,
}

/// A straight stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Color,
}

/// Backend receiving drawing calls.
pub trait DrawingSurface {
    /// Open a group translated by `(dx, dy)`; groups nest.
    fn begin_group(&mut self, id: Option<&str>, translate: (f64, f64)) -> HeatmapResult<()>;

    fn end_group(&mut self) -> HeatmapResult<()>;

    fn draw_rect(&mut self, rect: &RectElement) -> HeatmapResult<()>;

    fn draw_text(&mut self, text: &TextElement) -> HeatmapResult<()>;

    fn draw_line(&mut self, line: &LineElement) -> HeatmapResult<()>;

    /// Show or hide the tooltip overlay, depending on its visibility.
    fn draw_overlay(&mut self, tooltip: &Tooltip) -> HeatmapResult<()>;
}
