//! Tests for SVG output.
//!
//! Documents are parsed back with quick-xml so assertions work on elements
//! and attributes rather than on formatting.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use renderer::{
    render_chart_svg, render_legend_svg, ChartConfig, DrawingSurface, Heatmap, HoverController,
    PointerEvent, SvgSurface,
};
use test_utils::{extreme_dataset, hover_dataset, sample_dataset};

// ============================================================================
// Helper functions
// ============================================================================

#[derive(Debug)]
struct Element {
    name: String,
    attrs: HashMap<String, String>,
}

impl Element {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

fn element(start: &BytesStart<'_>) -> Element {
    let attrs = start
        .attributes()
        .map(|attr| {
            let attr = attr.unwrap();
            (
                String::from_utf8(attr.key.as_ref().to_vec()).unwrap(),
                attr.unescape_value().unwrap().into_owned(),
            )
        })
        .collect();
    Element {
        name: String::from_utf8(start.name().as_ref().to_vec()).unwrap(),
        attrs,
    }
}

/// All elements in document order, plus all text nodes.
fn parse(svg: &str) -> (Vec<Element>, Vec<String>) {
    let mut reader = Reader::from_str(svg);
    reader.trim_text(true);

    let mut elements = Vec::new();
    let mut texts = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => elements.push(element(&e)),
            Event::Text(t) => texts.push(t.unescape().unwrap().into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }
    (elements, texts)
}

fn by_class<'a>(elements: &'a [Element], class: &str) -> Vec<&'a Element> {
    elements
        .iter()
        .filter(|e| e.attr("class") == Some(class))
        .collect()
}

fn by_id<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    elements.iter().find(|e| e.attr("id") == Some(id))
}

// ============================================================================
// Chart surface
// ============================================================================

#[test]
fn test_chart_root_attributes() {
    let heatmap = Heatmap::build(&sample_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_chart_svg(&heatmap, None).unwrap();
    let (elements, _) = parse(&svg);

    let root = &elements[0];
    assert_eq!(root.name, "svg");
    assert_eq!(root.attr("id"), Some("heatmap"));
    assert_eq!(root.attr("width"), Some("800"));
    assert_eq!(root.attr("height"), Some("600"));
    assert_eq!(root.attr("viewBox"), Some("0 0 800 600"));
    assert_eq!(root.attr("xmlns"), Some("http://www.w3.org/2000/svg"));
}

#[test]
fn test_one_rect_per_cell() {
    let heatmap = Heatmap::build(&sample_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_chart_svg(&heatmap, None).unwrap();
    let (elements, _) = parse(&svg);

    let cells = by_class(&elements, "cell");
    assert_eq!(cells.len(), 6);
    for cell in &cells {
        assert_eq!(cell.name, "rect");
        assert_eq!(cell.attr("width"), Some("20"));
        assert_eq!(cell.attr("height"), Some("20"));
        assert!(cell.attr("fill").unwrap().starts_with("rgb("));
    }
}

#[test]
fn test_cell_data_attributes() {
    let heatmap = Heatmap::build(&hover_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_chart_svg(&heatmap, None).unwrap();
    let (elements, texts) = parse(&svg);

    let cell = by_class(&elements, "cell")[0];
    assert_eq!(cell.attr("data-month"), Some("2"));
    assert_eq!(cell.attr("data-year"), Some("1900"));
    assert_eq!(cell.attr("data-temp"), Some("9.5"));
    assert!(texts.iter().any(|t| t.contains("Temperature: 9.50°C")));
}

#[test]
fn test_axis_groups_present() {
    let heatmap = Heatmap::build(&sample_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_chart_svg(&heatmap, None).unwrap();
    let (elements, texts) = parse(&svg);

    let x_axis = by_id(&elements, "x-axis").unwrap();
    assert_eq!(x_axis.attr("transform"), Some("translate(0,500)"));
    let y_axis = by_id(&elements, "y-axis").unwrap();
    assert_eq!(y_axis.attr("transform"), Some("translate(50,0)"));

    for name in ["January", "June", "December", "1753", "1755"] {
        assert!(texts.iter().any(|t| t == name), "missing label {}", name);
    }
}

#[test]
fn test_extreme_fills() {
    let heatmap = Heatmap::build(&extreme_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_chart_svg(&heatmap, None).unwrap();
    let (elements, _) = parse(&svg);
    let cells = by_class(&elements, "cell");

    let coldest = cells.iter().find(|c| c.attr("data-year") == Some("1850") && c.attr("data-month") == Some("1")).unwrap();
    let hottest = cells.iter().find(|c| c.attr("data-year") == Some("1852") && c.attr("data-month") == Some("7")).unwrap();
    assert_eq!(coldest.attr("fill"), Some("rgb(255, 255, 204)"));
    assert_eq!(hottest.attr("fill"), Some("rgb(128, 0, 38)"));
}

// ============================================================================
// Tooltip overlay
// ============================================================================

#[test]
fn test_no_overlay_without_tooltip() {
    let heatmap = Heatmap::build(&hover_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_chart_svg(&heatmap, None).unwrap();
    let (elements, _) = parse(&svg);

    assert!(by_id(&elements, "tooltip").is_none());
}

#[test]
fn test_overlay_visible_on_hover() {
    let heatmap = Heatmap::build(&hover_dataset(), &ChartConfig::default()).unwrap();
    let mut hover = HoverController::new(10.0);
    let cell = &heatmap.cells()[0];
    hover.handle(
        &heatmap,
        PointerEvent::Move {
            x: cell.x + 2.0,
            y: cell.y + 2.0,
        },
    );

    let svg = render_chart_svg(&heatmap, Some(hover.tooltip())).unwrap();
    let (elements, texts) = parse(&svg);

    let tooltip = by_id(&elements, "tooltip").unwrap();
    assert_eq!(tooltip.attr("visibility"), Some("visible"));
    assert_eq!(tooltip.attr("data-year"), Some("1900"));
    for line in ["Year: 1900", "Month: March", "Temperature: 9.50°C"] {
        assert!(texts.iter().any(|t| t == line), "missing line {}", line);
    }
}

#[test]
fn test_overlay_hidden_after_leave() {
    let heatmap = Heatmap::build(&hover_dataset(), &ChartConfig::default()).unwrap();
    let mut hover = HoverController::new(10.0);
    let cell = &heatmap.cells()[0];
    hover.handle(&heatmap, PointerEvent::Move { x: cell.x, y: cell.y });
    hover.handle(&heatmap, PointerEvent::Leave);

    let svg = render_chart_svg(&heatmap, Some(hover.tooltip())).unwrap();
    let (elements, _) = parse(&svg);

    let tooltip = by_id(&elements, "tooltip").unwrap();
    assert_eq!(tooltip.attr("visibility"), Some("hidden"));
}

// ============================================================================
// Legend surface
// ============================================================================

#[test]
fn test_legend_document() {
    let heatmap = Heatmap::build(&extreme_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_legend_svg(&heatmap).unwrap();
    let (elements, texts) = parse(&svg);

    let root = &elements[0];
    assert_eq!(root.attr("id"), Some("legend"));
    assert_eq!(root.attr("width"), Some("200"));
    assert_eq!(root.attr("height"), Some("20"));

    let swatches = by_class(&elements, "legend-swatch");
    assert_eq!(swatches.len(), 5);
    assert_eq!(swatches[1].attr("x"), Some("40"));
    assert_eq!(swatches[1].attr("width"), Some("40"));
    assert_eq!(swatches[1].attr("data-value"), Some("-4"));

    assert_eq!(texts, vec!["-6.00", "-4.00", "-2.00", "0.00", "2.00"]);
}

#[test]
fn test_legend_labels_below_strip() {
    let heatmap = Heatmap::build(&extreme_dataset(), &ChartConfig::default()).unwrap();
    let svg = render_legend_svg(&heatmap).unwrap();
    let (elements, _) = parse(&svg);

    let group = elements.iter().find(|e| e.name == "g").unwrap();
    assert_eq!(group.attr("transform"), Some("translate(0,20)"));
}

// ============================================================================
// Surface
// ============================================================================

#[test]
fn test_unbalanced_end_group() {
    let mut surface = SvgSurface::new("test", 10.0, 10.0).unwrap();
    assert!(surface.end_group().is_err());
}

#[test]
fn test_finish_closes_open_groups() {
    let mut surface = SvgSurface::new("test", 10.0, 10.0).unwrap();
    surface.begin_group(Some("outer"), (0.0, 0.0)).unwrap();
    surface.begin_group(None, (1.5, 2.0)).unwrap();
    let svg = surface.finish().unwrap();
    let (elements, _) = parse(&svg);

    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(by_id(&elements, "outer").unwrap().attr("transform"), None);
    assert_eq!(elements[2].attr("transform"), Some("translate(1.5,2)"));
}
