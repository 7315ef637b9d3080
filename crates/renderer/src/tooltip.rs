//! Hover tooltip state.
//!
//! There is exactly one tooltip per chart. Entering a cell overwrites its
//! content and position; leaving hides it. Events are applied one at a time
//! through [`HoverController::handle`].

use serde::Serialize;
use tracing::trace;

use crate::chart::{Cell, Heatmap};

/// The floating tooltip overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub visible: bool,
    /// Position of the top-left corner in chart pixels.
    pub left: f64,
    pub top: f64,
    /// Year of the hovered cell, exposed as `data-year`.
    pub year: Option<i32>,
    pub lines: Vec<String>,
}

impl Tooltip {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            left: 0.0,
            top: 0.0,
            year: None,
            lines: Vec::new(),
        }
    }

    /// Populate from a cell and make visible next to the pointer.
    pub fn show(&mut self, cell: &Cell, pointer: (f64, f64), offset: f64) {
        self.visible = true;
        self.left = pointer.0 + offset;
        self.top = pointer.1 + offset;
        self.year = Some(cell.year);
        self.lines = cell.tooltip_lines();
    }

    /// Hide without clearing the last content.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Content as plain text, one line per field.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Pointer input in chart pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
}

/// What a pointer event did to the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    /// The pointer entered the cell at this index.
    Entered(usize),
    /// The pointer left the previously hovered cell.
    Left,
    /// Nothing changed.
    Unchanged,
}

/// Converts pointer positions into enter/leave transitions on one tooltip.
#[derive(Debug, Clone)]
pub struct HoverController {
    tooltip: Tooltip,
    hovered: Option<usize>,
    offset: f64,
}

impl HoverController {
    pub fn new(offset: f64) -> Self {
        Self {
            tooltip: Tooltip::hidden(),
            hovered: None,
            offset,
        }
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Index of the cell under the pointer, if any.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer entered `cell`.
    pub fn pointer_enter(&mut self, index: usize, cell: &Cell, pointer: (f64, f64)) {
        self.hovered = Some(index);
        self.tooltip.show(cell, pointer, self.offset);
    }

    /// Pointer left whatever cell it was over.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
        self.tooltip.hide();
    }

    /// Apply one pointer event against the laid-out chart.
    pub fn handle(&mut self, heatmap: &Heatmap, event: PointerEvent) -> HoverTransition {
        let (x, y) = match event {
            PointerEvent::Leave => {
                if self.hovered.is_none() {
                    return HoverTransition::Unchanged;
                }
                self.pointer_leave();
                return HoverTransition::Left;
            }
            PointerEvent::Move { x, y } => (x, y),
        };

        match heatmap.cell_index_at(x, y) {
            Some(index) if self.hovered == Some(index) => HoverTransition::Unchanged,
            Some(index) => {
                let cell = &heatmap.cells()[index];
                trace!(year = cell.year, month = cell.month, "pointer entered cell");
                self.pointer_enter(index, cell, (x, y));
                HoverTransition::Entered(index)
            }
            None if self.hovered.is_some() => {
                self.pointer_leave();
                HoverTransition::Left
            }
            None => HoverTransition::Unchanged,
        }
    }
}
