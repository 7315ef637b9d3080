//! One-shot rendering to files.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, warn};

use heatmap_common::{HeatmapError, HeatmapResult};
use renderer::raster::svg_to_png;
use renderer::{
    render_chart_svg, render_legend_svg, Heatmap, HoverController, HoverTransition, PointerEvent,
};

/// Which files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Svg,
    Png,
    Both,
}

impl OutputFormat {
    fn svg(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Both)
    }

    fn png(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Both)
    }
}

/// Pointer position in chart pixels, parsed from `X,Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl FromStr for Pointer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate '{}': {}", v, e))
        };
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

/// Options for [`write_outputs`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Render the tooltip as it would appear with the pointer here.
    pub hover: Option<Pointer>,
}

/// Render the chart and legend and write them to the output directory.
///
/// Returns the written paths, chart before legend.
pub async fn write_outputs(heatmap: &Heatmap, options: &RenderOptions) -> HeatmapResult<Vec<PathBuf>> {
    let tooltip = options.hover.map(|pointer| {
        let mut hover = HoverController::new(heatmap.config().tooltip_offset);
        let event = PointerEvent::Move {
            x: pointer.x,
            y: pointer.y,
        };
        if hover.handle(heatmap, event) == HoverTransition::Unchanged {
            warn!(x = pointer.x, y = pointer.y, "hover position is not over any cell");
        }
        hover.tooltip().clone()
    });

    let chart_svg = render_chart_svg(heatmap, tooltip.as_ref())?;
    let legend_svg = render_legend_svg(heatmap)?;

    let documents = [("heatmap", chart_svg), ("legend", legend_svg)];
    let written = write_documents(&options.output_dir, options.format, &documents).await?;

    info!(files = written.len(), dir = %options.output_dir.display(), "Render complete");
    Ok(written)
}

/// Encode every requested file, then write them in order. Nothing touches
/// the disk if any document fails to rasterize.
async fn write_documents(
    dir: &Path,
    format: OutputFormat,
    documents: &[(&str, String)],
) -> HeatmapResult<Vec<PathBuf>> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = Vec::new();
    for (name, svg) in documents {
        if format.svg() {
            files.push((dir.join(format!("{}.svg", name)), svg.as_bytes().to_vec()));
        }
        if format.png() {
            files.push((dir.join(format!("{}.png", name)), svg_to_png(svg)?));
        }
    }

    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(files.len());
    for (path, bytes) in files {
        write_file(&path, &bytes).await?;
        written.push(path);
    }
    Ok(written)
}

async fn write_file(path: &Path, bytes: &[u8]) -> HeatmapResult<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| HeatmapError::Io(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}
