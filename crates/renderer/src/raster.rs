//! Rasterize SVG documents to PNG.
//!
//! Uses resvg with an empty font database: shapes render exactly, text is
//! only drawn when fonts are made available to usvg.

use tracing::debug;

use heatmap_common::{HeatmapError, HeatmapResult};

use crate::png::create_png_auto;

/// Rasterize an SVG document to straight-alpha RGBA at its own size.
///
/// Returns `(pixels, width, height)`.
pub fn rasterize_svg(svg: &str) -> HeatmapResult<(Vec<u8>, usize, usize)> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| HeatmapError::Render(format!("SVG parse failed: {}", e)))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        HeatmapError::Render(format!("cannot allocate {}x{} pixmap", width, height))
    })?;

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        pixels.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    debug!(width, height, "rasterized SVG");
    Ok((pixels, width as usize, height as usize))
}

/// Rasterize and encode as PNG.
pub fn svg_to_png(svg: &str) -> HeatmapResult<Vec<u8>> {
    let (pixels, width, height) = rasterize_svg(svg)?;
    create_png_auto(&pixels, width, height)
}
