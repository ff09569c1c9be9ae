/// Rendering pipeline: BarChartSpec / swatch color → PNG bytes via plotters and image.

use crate::mix::PixelColor;
use crate::plot::types::*;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbImage};
use plotters::prelude::*;
use thiserror::Error;

/// Background color (Catppuccin Mocha base).
const BG_COLOR: RGBColor = RGBColor(30, 30, 46);
/// Axis / grid color.
const AXIS_COLOR: RGBColor = RGBColor(88, 91, 112);
/// Horizontal grid every this many y units.
const GRID_STEP: f64 = 20.0;
/// Fraction of a slot left empty on each side of a bar.
const BAR_GAP: f64 = 0.15;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("draw: {0}")]
    Draw(String),
    #[error("PNG encode: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render a bar chart to a PNG image.
///
/// Only bars, baseline and grid are rasterized; the title and labels are drawn by the
/// caller around the image.
pub fn render_bar_chart(spec: &BarChartSpec) -> Result<RenderedPlot, PlotError> {
    let width = CHART_WIDTH;
    let height = CHART_HEIGHT;
    let mut buf = vec![0u8; (width * height * 3) as usize];
    let slots = spec.bars.len().max(1) as f64;

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BG_COLOR).map_err(|e| PlotError::Draw(format!("fill: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(0.0..slots, spec.y_min..spec.y_max)
            .map_err(|e| PlotError::Draw(format!("chart build: {}", e)))?;

        let grid = grid_levels(spec.y_min, spec.y_max);
        chart
            .draw_series(grid.iter().map(|y| {
                PathElement::new(vec![(0.0, *y), (slots, *y)], AXIS_COLOR.mix(0.3))
            }))
            .map_err(|e| PlotError::Draw(format!("grid: {}", e)))?;

        chart
            .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
                let (r, g, b) = bar.color;
                let top = bar.value.clamp(spec.y_min, spec.y_max);
                Rectangle::new(
                    [(i as f64 + BAR_GAP, spec.y_min), (i as f64 + 1.0 - BAR_GAP, top)],
                    RGBColor(r, g, b).filled(),
                )
            }))
            .map_err(|e| PlotError::Draw(format!("bars: {}", e)))?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, spec.y_min), (slots, spec.y_min)],
                AXIS_COLOR.stroke_width(2),
            )))
            .map_err(|e| PlotError::Draw(format!("baseline: {}", e)))?;

        root.present().map_err(|e| PlotError::Draw(format!("present: {}", e)))?;
    }

    let png_bytes = encode_rgb_to_png(&buf, width, height)?;
    Ok(RenderedPlot {
        png_bytes,
        width,
        height,
    })
}

/// Render a `size` x `size` image uniformly filled with `color`.
pub fn render_swatch(color: PixelColor, size: u32) -> Result<RenderedPlot, PlotError> {
    let size = size.max(1);
    let img = RgbImage::from_pixel(size, size, color.into());
    let png_bytes = encode_rgb_to_png(img.as_raw(), size, size)?;
    Ok(RenderedPlot {
        png_bytes,
        width: size,
        height: size,
    })
}

/// Grid levels strictly inside (y_min, y_max).
fn grid_levels(y_min: f64, y_max: f64) -> Vec<f64> {
    let mut levels = Vec::new();
    let mut y = (y_min / GRID_STEP).floor() * GRID_STEP + GRID_STEP;
    while y < y_max {
        if y > y_min {
            levels.push(y);
        }
        y += GRID_STEP;
    }
    levels
}

/// Encode a raw RGB pixel buffer to PNG.
fn encode_rgb_to_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder.write_image(rgb, width, height, image::ExtendedColorType::Rgb8)?;
    Ok(png)
}
