//! Heatmap layout: scales, cells and axes.
//!
//! Layout is computed once from a [`Dataset`] and is immutable afterwards.
//! Drawing walks the layout and issues calls against a [`DrawingSurface`]:
//! axes first, then one rectangle per record in dataset order.

use tracing::{debug, warn};

use heatmap_common::{month_name, DataPoint, Dataset, HeatmapError, HeatmapResult, MONTHS};

use crate::color::Color;
use crate::config::ChartConfig;
use crate::legend::Legend;
use crate::numbers::format_value_with_decimals;
use crate::palette::Palette;
use crate::scale::{BandScale, SequentialScale};
use crate::surface::{DrawingSurface, LineElement, RectElement, TextAnchor, TextElement};

/// Tick mark length in pixels.
const TICK_SIZE: f64 = 6.0;
/// Gap between tick mark and label.
const TICK_PADDING: f64 = 3.0;

const AXIS_COLOR: Color = Color::rgb(0, 0, 0);

/// The positional and color scales derived from a dataset.
#[derive(Debug, Clone)]
pub struct Scales {
    /// Year to band start.
    pub x: BandScale<i32>,
    /// Month (1-12) to band start.
    pub y: BandScale<u32>,
    /// Variance to fill color.
    pub color: SequentialScale,
}

impl Scales {
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> HeatmapResult<Self> {
        let palette = Palette::from_config(&config.palette).map_err(HeatmapError::Render)?;

        let x = BandScale::new(dataset.points.iter().map(|p| p.year), config.x_range())
            .with_padding(config.padding);
        let y = BandScale::new(MONTHS, config.y_range()).with_padding(config.padding);
        let color = SequentialScale::new(dataset.variance_extent(), palette);

        Ok(Self { x, y, color })
    }
}

/// One plotted record.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
    pub variance: f64,
    /// Base temperature plus variance.
    pub temperature: f64,
}

impl Cell {
    /// Zero-based month, as exposed in `data-month`.
    pub fn month_index(&self) -> u32 {
        self.month - 1
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Tooltip content for this cell.
    pub fn tooltip_lines(&self) -> Vec<String> {
        vec![
            format!("Year: {}", self.year),
            format!("Month: {}", month_name(self.month).unwrap_or("Unknown")),
            format!(
                "Temperature: {}°C",
                format_value_with_decimals(self.temperature, 2)
            ),
        ]
    }

    fn element(&self) -> RectElement {
        let mut rect = RectElement::new(self.x, self.y, self.width, self.height, self.fill);
        rect.class = Some("cell");
        rect.data = vec![
            ("month", self.month_index().to_string()),
            ("year", self.year.to_string()),
            ("temp", self.temperature.to_string()),
        ];
        rect.title = Some(self.tooltip_lines().join("\n"));
        rect
    }
}

/// Which side of the plot an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

/// A labelled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Offset along the axis, in the axis group's coordinates.
    pub position: f64,
    pub label: String,
}

/// A laid-out axis.
#[derive(Debug, Clone)]
pub struct Axis {
    pub id: &'static str,
    pub orient: AxisOrient,
    pub translate: (f64, f64),
    pub range: (f64, f64),
    pub ticks: Vec<AxisTick>,
    font_size: f64,
}

impl Axis {
    fn years(scale: &BandScale<i32>, config: &ChartConfig) -> Self {
        let every = config.year_tick_interval;
        let mut selected: Vec<i32> = scale
            .domain()
            .iter()
            .copied()
            .filter(|year| year.rem_euclid(every) == 0)
            .collect();
        if selected.is_empty() {
            selected = scale.domain().to_vec();
        }

        let ticks = selected
            .iter()
            .filter_map(|year| {
                scale.center(year).map(|position| AxisTick {
                    position,
                    label: year.to_string(),
                })
            })
            .collect();

        Self {
            id: "x-axis",
            orient: AxisOrient::Bottom,
            translate: (0.0, config.height - config.margin.bottom),
            range: scale.range(),
            ticks,
            font_size: config.font_size,
        }
    }

    fn months(scale: &BandScale<u32>, config: &ChartConfig) -> Self {
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|month| {
                let position = scale.center(month)?;
                let label = month_name(*month)?.to_string();
                Some(AxisTick { position, label })
            })
            .collect();

        Self {
            id: "y-axis",
            orient: AxisOrient::Left,
            translate: (config.margin.left, 0.0),
            range: scale.range(),
            ticks,
            font_size: config.font_size,
        }
    }

    pub fn draw<S: DrawingSurface>(&self, surface: &mut S) -> HeatmapResult<()> {
        surface.begin_group(Some(self.id), self.translate)?;

        let (r0, r1) = self.range;
        let domain_line = match self.orient {
            AxisOrient::Bottom => LineElement { x1: r0, y1: 0.0, x2: r1, y2: 0.0, stroke: AXIS_COLOR },
            AxisOrient::Left => LineElement { x1: 0.0, y1: r0, x2: 0.0, y2: r1, stroke: AXIS_COLOR },
        };
        surface.draw_line(&domain_line)?;

        for tick in &self.ticks {
            let p = tick.position;
            let (line, text) = match self.orient {
                AxisOrient::Bottom => (
                    LineElement { x1: p, y1: 0.0, x2: p, y2: TICK_SIZE, stroke: AXIS_COLOR },
                    TextElement {
                        x: p,
                        y: TICK_SIZE + TICK_PADDING + self.font_size,
                        content: tick.label.clone(),
                        anchor: TextAnchor::Middle,
                        font_size: self.font_size,
                    },
                ),
                AxisOrient::Left => (
                    LineElement { x1: -TICK_SIZE, y1: p, x2: 0.0, y2: p, stroke: AXIS_COLOR },
                    TextElement {
                        x: -(TICK_SIZE + TICK_PADDING),
                        y: p + self.font_size * 0.32,
                        content: tick.label.clone(),
                        anchor: TextAnchor::End,
                        font_size: self.font_size,
                    },
                ),
            };
            surface.draw_line(&line)?;
            surface.draw_text(&text)?;
        }

        surface.end_group()
    }
}

/// A fully laid-out heatmap.
#[derive(Debug, Clone)]
pub struct Heatmap {
    config: ChartConfig,
    scales: Scales,
    cells: Vec<Cell>,
    x_axis: Axis,
    y_axis: Axis,
    legend: Legend,
    skipped: usize,
}

impl Heatmap {
    /// Compute scales and lay out every record.
    ///
    /// Records whose month has no slot are skipped with a warning.
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> HeatmapResult<Self> {
        config.validate()?;
        let scales = Scales::build(dataset, config)?;

        let mut cells = Vec::with_capacity(dataset.len());
        let mut skipped = 0;
        for point in &dataset.points {
            match place(point, dataset, &scales, config) {
                Some(cell) => cells.push(cell),
                None => {
                    skipped += 1;
                    warn!(
                        year = point.year,
                        month = point.month,
                        "record falls outside the month domain, not plotted"
                    );
                }
            }
        }

        let x_axis = Axis::years(&scales.x, config);
        let y_axis = Axis::months(&scales.y, config);
        let legend = Legend::build(&scales.color, &config.legend);

        let (min, max) = scales.color.domain();
        let (first_year, last_year) = dataset.year_span();
        debug!(
            cells = cells.len(),
            skipped,
            years = scales.x.domain().len(),
            first_year,
            last_year,
            min_variance = min,
            max_variance = max,
            legend_swatches = legend.swatches().len(),
            "heatmap laid out"
        );

        Ok(Self {
            config: config.clone(),
            scales,
            cells,
            x_axis,
            y_axis,
            legend,
            skipped,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Number of records that could not be placed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Topmost cell under a point; later cells paint over earlier ones.
    pub fn cell_index_at(&self, x: f64, y: f64) -> Option<usize> {
        self.cells.iter().rposition(|cell| cell.contains(x, y))
    }

    pub fn cell_at(&self, x: f64, y: f64) -> Option<&Cell> {
        self.cell_index_at(x, y).map(|i| &self.cells[i])
    }

    /// Draw axes and cells.
    pub fn draw<S: DrawingSurface>(&self, surface: &mut S) -> HeatmapResult<()> {
        self.x_axis.draw(surface)?;
        self.y_axis.draw(surface)?;
        for cell in &self.cells {
            surface.draw_rect(&cell.element())?;
        }
        Ok(())
    }
}

fn place(point: &DataPoint, dataset: &Dataset, scales: &Scales, config: &ChartConfig) -> Option<Cell> {
    let x = scales.x.map(&point.year)?;
    let y = scales.y.map(&point.month)?;
    Some(Cell {
        x,
        y,
        width: config.cell_width,
        height: config.cell_height,
        fill: scales.color.map(point.variance),
        year: point.year,
        month: point.month,
        variance: point.variance,
        temperature: dataset.temperature(point),
    })
}
