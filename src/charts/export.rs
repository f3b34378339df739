//! Static Chart Export
//! Paints a finished `Figure` with plotters into PNG or SVG images.

use crate::charts::figure::{Figure, TextAnchor};
use crate::charts::SeriesColor;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Unsupported output format: {0} (expected .png or .svg)")]
    UnsupportedFormat(PathBuf),
    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ExportError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ExportError::Drawing(err.to_string())
    }
}

/// Output format chosen from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            _ => Err(ExportError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

pub struct StaticChartExporter;

impl StaticChartExporter {
    /// Write the figure to `path`, as PNG or SVG depending on its extension.
    pub fn save(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<(), ExportError> {
        match ImageFormat::from_path(path)? {
            ImageFormat::Png => {
                let bytes = Self::render_png_bytes(figure, size)?;
                std::fs::write(path, bytes).map_err(|source| ExportError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::paint(figure, &root)?;
                root.present()?;
            }
        }
        info!(path = %path.display(), width = size.0, height = size.1, "exported chart");
        Ok(())
    }

    /// Render the figure to PNG bytes without touching the filesystem.
    pub fn render_png_bytes(figure: &Figure, size: (u32, u32)) -> Result<Vec<u8>, ExportError> {
        let (width, height) = size;
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
            Self::paint(figure, &root)?;
            root.present()?;
        }

        let img = image::RgbImage::from_raw(width, height, pixels)
            .ok_or(ExportError::BufferSize { width, height })?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    fn paint<DB: DrawingBackend>(
        figure: &Figure,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), ExportError> {
        root.fill(&WHITE)?;

        let (x_min, x_max) = figure.x_range();
        let (y_min, y_max) = figure.y_range();

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60);
        if let Some(title) = &figure.title {
            builder.caption(title, (FONT, 28));
        }
        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        // Category names go under the axis at the tick positions, not at numeric key points
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc(figure.y_label.clone().unwrap_or_default())
            .label_style((FONT, 14))
            .draw()?;

        let tick_style = (FONT, 14)
            .into_font()
            .color(&BLACK)
            .pos(text_pos(TextAnchor::CenterTop));
        for tick in &figure.x_ticks {
            let (px, py) = chart.backend_coord(&(tick.position, y_min));
            root.draw(&Text::new(
                tick.label.clone(),
                (px, py + 8),
                tick_style.clone(),
            ))?;
        }

        for group in &figure.bar_groups {
            let fill = to_rgb(group.color).filled();
            chart.draw_series(group.bars.iter().map(|bar| {
                Rectangle::new([(bar.x, 0.0), (bar.x + bar.width, bar.height)], fill)
            }))?;
        }

        chart.draw_series(figure.labels.iter().map(|label| {
            Text::new(
                label.text.clone(),
                (label.x, label.y),
                (FONT, 14).into_font().color(&BLACK).pos(text_pos(label.anchor)),
            )
        }))?;

        if !figure.legend.is_empty() {
            for entry in &figure.legend {
                let color = to_rgb(entry.color);
                chart
                    .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                    .label(entry.name.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                    });
            }
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font((FONT, 14))
                .draw()?;
        }

        Ok(())
    }
}

fn to_rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn text_pos(anchor: TextAnchor) -> Pos {
    match anchor {
        TextAnchor::CenterBottom => Pos::new(HPos::Center, VPos::Bottom),
        TextAnchor::CenterTop => Pos::new(HPos::Center, VPos::Top),
    }
}
