//! SVG output.
//!
//! [`SvgSurface`] implements [`DrawingSurface`] by streaming elements through
//! a `quick-xml` writer. Cells keep their `data-*` attributes so the output
//! can be inspected with any XML tool.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use heatmap_common::{HeatmapError, HeatmapResult};

use crate::chart::Heatmap;
use crate::surface::{DrawingSurface, LineElement, RectElement, TextElement};
use crate::tooltip::Tooltip;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Tooltip box styling.
const TOOLTIP_LINE_HEIGHT: f64 = 14.0;
const TOOLTIP_PADDING: f64 = 6.0;
const TOOLTIP_WIDTH: f64 = 150.0;

fn xml_err(err: quick_xml::Error) -> HeatmapError {
    HeatmapError::Render(format!("SVG write failed: {}", err))
}

/// Shortest round-trip form, so `50.0` is written as `50`.
fn num(value: f64) -> String {
    value.to_string()
}

/// An in-memory SVG document.
pub struct SvgSurface {
    writer: Writer<Vec<u8>>,
    open_groups: usize,
}

impl SvgSurface {
    /// Start a document of the given pixel size.
    pub fn new(id: &str, width: f64, height: f64) -> HeatmapResult<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NS));
        root.push_attribute(("id", id));
        root.push_attribute(("width", num(width).as_str()));
        root.push_attribute(("height", num(height).as_str()));
        root.push_attribute(("viewBox", format!("0 0 {} {}", num(width), num(height)).as_str()));
        root.push_attribute(("overflow", "visible"));
        root.push_attribute(("font-family", "sans-serif"));
        writer.write_event(Event::Start(root)).map_err(xml_err)?;

        Ok(Self {
            writer,
            open_groups: 0,
        })
    }

    /// Close any open groups and the root element.
    pub fn finish(mut self) -> HeatmapResult<String> {
        while self.open_groups > 0 {
            self.end_group()?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(xml_err)?;

        String::from_utf8(self.writer.into_inner())
            .map_err(|e| HeatmapError::Render(format!("SVG is not UTF-8: {}", e)))
    }

    fn write_text_element(&mut self, start: BytesStart<'_>, content: &str) -> HeatmapResult<()> {
        self.writer.write_event(Event::Start(start)).map_err(xml_err)?;
        self.writer
            .write_event(Event::Text(BytesText::new(content)))
            .map_err(xml_err)?;
        self.writer
            .write_event(Event::End(BytesEnd::new("text")))
            .map_err(xml_err)
    }
}

impl DrawingSurface for SvgSurface {
    fn begin_group(&mut self, id: Option<&str>, translate: (f64, f64)) -> HeatmapResult<()> {
        let mut group = BytesStart::new("g");
        if let Some(id) = id {
            group.push_attribute(("id", id));
        }
        if translate != (0.0, 0.0) {
            let transform = format!("translate({},{})", num(translate.0), num(translate.1));
            group.push_attribute(("transform", transform.as_str()));
        }
        self.writer.write_event(Event::Start(group)).map_err(xml_err)?;
        self.open_groups += 1;
        Ok(())
    }

    fn end_group(&mut self) -> HeatmapResult<()> {
        if self.open_groups == 0 {
            return Err(HeatmapError::Render("unbalanced end_group".to_string()));
        }
        self.writer
            .write_event(Event::End(BytesEnd::new("g")))
            .map_err(xml_err)?;
        self.open_groups -= 1;
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectElement) -> HeatmapResult<()> {
        let mut start = BytesStart::new("rect");
        if let Some(class) = rect.class {
            start.push_attribute(("class", class));
        }
        start.push_attribute(("x", num(rect.x).as_str()));
        start.push_attribute(("y", num(rect.y).as_str()));
        start.push_attribute(("width", num(rect.width).as_str()));
        start.push_attribute(("height", num(rect.height).as_str()));
        for (name, value) in &rect.data {
            let key = format!("data-{}", name);
            start.push_attribute((key.as_str(), value.as_str()));
        }
        start.push_attribute(("fill", rect.fill.to_string().as_str()));

        match &rect.title {
            Some(title) => {
                self.writer.write_event(Event::Start(start)).map_err(xml_err)?;
                self.writer
                    .write_event(Event::Start(BytesStart::new("title")))
                    .map_err(xml_err)?;
                self.writer
                    .write_event(Event::Text(BytesText::new(title)))
                    .map_err(xml_err)?;
                self.writer
                    .write_event(Event::End(BytesEnd::new("title")))
                    .map_err(xml_err)?;
                self.writer
                    .write_event(Event::End(BytesEnd::new("rect")))
                    .map_err(xml_err)
            }
            None => self.writer.write_event(Event::Empty(start)).map_err(xml_err),
        }
    }

    fn draw_text(&mut self, text: &TextElement) -> HeatmapResult<()> {
        let mut start = BytesStart::new("text");
        start.push_attribute(("x", num(text.x).as_str()));
        start.push_attribute(("y", num(text.y).as_str()));
        start.push_attribute(("text-anchor", text.anchor.as_str()));
        start.push_attribute(("font-size", num(text.font_size).as_str()));
        self.write_text_element(start, &text.content)
    }

    fn draw_line(&mut self, line: &LineElement) -> HeatmapResult<()> {
        let mut start = BytesStart::new("line");
        start.push_attribute(("x1", num(line.x1).as_str()));
        start.push_attribute(("y1", num(line.y1).as_str()));
        start.push_attribute(("x2", num(line.x2).as_str()));
        start.push_attribute(("y2", num(line.y2).as_str()));
        start.push_attribute(("stroke", line.stroke.to_string().as_str()));
        self.writer.write_event(Event::Empty(start)).map_err(xml_err)
    }

    fn draw_overlay(&mut self, tooltip: &Tooltip) -> HeatmapResult<()> {
        let mut group = BytesStart::new("g");
        group.push_attribute(("id", "tooltip"));
        group.push_attribute((
            "visibility",
            if tooltip.visible { "visible" } else { "hidden" },
        ));
        if let Some(year) = tooltip.year {
            group.push_attribute(("data-year", year.to_string().as_str()));
        }
        let transform = format!("translate({},{})", num(tooltip.left), num(tooltip.top));
        group.push_attribute(("transform", transform.as_str()));
        self.writer.write_event(Event::Start(group)).map_err(xml_err)?;

        let box_height = tooltip.lines.len() as f64 * TOOLTIP_LINE_HEIGHT + TOOLTIP_PADDING * 2.0;
        let mut background = BytesStart::new("rect");
        background.push_attribute(("width", num(TOOLTIP_WIDTH).as_str()));
        background.push_attribute(("height", num(box_height).as_str()));
        background.push_attribute(("rx", "4"));
        background.push_attribute(("fill", "rgba(0, 0, 0, 0.8)"));
        self.writer.write_event(Event::Empty(background)).map_err(xml_err)?;

        for (i, line) in tooltip.lines.iter().enumerate() {
            let y = TOOLTIP_PADDING + (i as f64 + 1.0) * TOOLTIP_LINE_HEIGHT - 3.0;
            let mut start = BytesStart::new("text");
            start.push_attribute(("x", num(TOOLTIP_PADDING).as_str()));
            start.push_attribute(("y", num(y).as_str()));
            start.push_attribute(("fill", "white"));
            start.push_attribute(("font-size", "12"));
            self.write_text_element(start, line)?;
        }

        self.writer
            .write_event(Event::End(BytesEnd::new("g")))
            .map_err(xml_err)
    }
}

/// Render the chart surface, with the tooltip overlay if one is given.
pub fn render_chart_svg(heatmap: &Heatmap, tooltip: Option<&Tooltip>) -> HeatmapResult<String> {
    let config = heatmap.config();
    let mut surface = SvgSurface::new("heatmap", config.width, config.height)?;
    heatmap.draw(&mut surface)?;
    if let Some(tooltip) = tooltip {
        surface.draw_overlay(tooltip)?;
    }
    surface.finish()
}

/// Render the legend surface.
pub fn render_legend_svg(heatmap: &Heatmap) -> HeatmapResult<String> {
    let legend = heatmap.legend();
    let mut surface = SvgSurface::new("legend", legend.width(), legend.height())?;
    legend.draw(&mut surface)?;
    surface.finish()
}
