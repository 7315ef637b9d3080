//! Tests for hover tooltip behaviour.

use heatmap_common::{DataPoint, Dataset};
use renderer::{ChartConfig, Heatmap, HoverController, HoverTransition, PointerEvent, Tooltip};
use test_utils::{create_calendar_dataset, hover_dataset};

fn hover_chart() -> Heatmap {
    Heatmap::build(&hover_dataset(), &ChartConfig::default()).unwrap()
}

fn inside(heatmap: &Heatmap, index: usize) -> (f64, f64) {
    let cell = &heatmap.cells()[index];
    (cell.x + 5.0, cell.y + 5.0)
}

// ============================================================================
// Enter / leave
// ============================================================================

#[test]
fn test_initially_hidden() {
    let hover = HoverController::new(10.0);
    assert!(!hover.tooltip().visible);
    assert_eq!(hover.hovered(), None);
    assert_eq!(*hover.tooltip(), Tooltip::default());
}

#[test]
fn test_hover_shows_year_month_temperature() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(heatmap.config().tooltip_offset);
    let (x, y) = inside(&heatmap, 0);

    let transition = hover.handle(&heatmap, PointerEvent::Move { x, y });

    assert_eq!(transition, HoverTransition::Entered(0));
    let tooltip = hover.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.year, Some(1900));
    assert_eq!(tooltip.text(), "Year: 1900\nMonth: March\nTemperature: 9.50°C");
}

#[test]
fn test_temperature_tie_rounds_up() {
    let dataset = Dataset::new(
        8.0,
        vec![DataPoint { year: 1900, month: 3, variance: 1.125 }],
    )
    .unwrap();
    let heatmap = Heatmap::build(&dataset, &ChartConfig::default()).unwrap();
    let mut hover = HoverController::new(heatmap.config().tooltip_offset);
    let (x, y) = inside(&heatmap, 0);

    hover.handle(&heatmap, PointerEvent::Move { x, y });

    assert_eq!(hover.tooltip().text(), "Year: 1900\nMonth: March\nTemperature: 9.13°C");
    assert_eq!(heatmap.cells()[0].temperature, 9.125);
}

#[test]
fn test_tooltip_offset_from_pointer() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(10.0);
    let (x, y) = inside(&heatmap, 0);

    hover.handle(&heatmap, PointerEvent::Move { x, y });

    assert_eq!(hover.tooltip().left, x + 10.0);
    assert_eq!(hover.tooltip().top, y + 10.0);
}

#[test]
fn test_leave_hides_tooltip() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(10.0);
    let (x, y) = inside(&heatmap, 0);

    hover.handle(&heatmap, PointerEvent::Move { x, y });
    let transition = hover.handle(&heatmap, PointerEvent::Leave);

    assert_eq!(transition, HoverTransition::Left);
    assert!(!hover.tooltip().visible);
    assert_eq!(hover.hovered(), None);
}

#[test]
fn test_moving_off_cell_hides_tooltip() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(10.0);
    let (x, y) = inside(&heatmap, 0);

    hover.handle(&heatmap, PointerEvent::Move { x, y });
    let transition = hover.handle(&heatmap, PointerEvent::Move { x: 1.0, y: 1.0 });

    assert_eq!(transition, HoverTransition::Left);
    assert!(!hover.tooltip().visible);
}

#[test]
fn test_leave_without_hover_is_noop() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(10.0);

    assert_eq!(
        hover.handle(&heatmap, PointerEvent::Leave),
        HoverTransition::Unchanged
    );
    assert_eq!(
        hover.handle(&heatmap, PointerEvent::Move { x: 1.0, y: 1.0 }),
        HoverTransition::Unchanged
    );
    assert!(!hover.tooltip().visible);
}

#[test]
fn test_moving_within_cell_keeps_position() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(10.0);
    let (x, y) = inside(&heatmap, 0);

    hover.handle(&heatmap, PointerEvent::Move { x, y });
    let before = hover.tooltip().clone();
    let transition = hover.handle(&heatmap, PointerEvent::Move { x: x + 1.0, y: y + 1.0 });

    assert_eq!(transition, HoverTransition::Unchanged);
    assert_eq!(*hover.tooltip(), before);
}

// ============================================================================
// Single tooltip
// ============================================================================

#[test]
fn test_entering_another_cell_overwrites_content() {
    let dataset = create_calendar_dataset(1900, 1, 8.0);
    let heatmap = Heatmap::build(&dataset, &ChartConfig::default()).unwrap();
    let mut hover = HoverController::new(10.0);

    let (x, y) = inside(&heatmap, 0);
    hover.handle(&heatmap, PointerEvent::Move { x, y });
    assert_eq!(hover.tooltip().lines[1], "Month: January");

    let (x, y) = inside(&heatmap, 6);
    let transition = hover.handle(&heatmap, PointerEvent::Move { x, y });

    assert_eq!(transition, HoverTransition::Entered(6));
    assert!(hover.tooltip().visible);
    assert_eq!(hover.tooltip().lines[1], "Month: July");
    assert_eq!(hover.tooltip().lines.len(), 3);
}

#[test]
fn test_hide_keeps_last_content() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(10.0);
    hover.pointer_enter(0, &heatmap.cells()[0], (0.0, 0.0));
    hover.pointer_leave();

    assert!(!hover.tooltip().visible);
    assert_eq!(hover.tooltip().year, Some(1900));
}

#[test]
fn test_tooltip_serializes() {
    let heatmap = hover_chart();
    let mut hover = HoverController::new(10.0);
    hover.pointer_enter(0, &heatmap.cells()[0], (100.0, 200.0));

    let json = serde_json::to_value(hover.tooltip()).unwrap();
    assert_eq!(json["visible"], true);
    assert_eq!(json["left"], 110.0);
    assert_eq!(json["top"], 210.0);
    assert_eq!(json["year"], 1900);
    assert_eq!(json["lines"][2], "Temperature: 9.50°C");
}
