//! Static Chart Renderer
//! Renders `ChartData` to a PNG file with plotters, for viewing outside the app.
//!
//! Layout mirrors the embedded charts:
//! - Bar: one bar per product, stock on Y, row position on X
//! - Line: price per product with circle markers
//! - Pie: stock share per product, name labels and percentages

use crate::charts::{ChartData, ChartKind};
use plotters::element::Pie;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

pub const IMAGE_WIDTH: u32 = 800;
pub const IMAGE_HEIGHT: u32 = 600;

const SERIES_COLOR: RGBColor = RGBColor(52, 152, 219);

const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];

#[derive(ThisError, Debug)]
pub enum RenderError {
    #[error("Failed to render {path}: {message}")]
    Draw { path: String, message: String },
    #[error("Failed to open chart viewer: {0}")]
    Open(#[from] std::io::Error),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// `<dir>/chart_<kind>.png`
    pub fn image_path(dir: &Path, kind: ChartKind) -> PathBuf {
        dir.join(format!("chart_{}.png", kind.file_stem()))
    }

    /// Render the chart to `path` as PNG, overwriting any previous image.
    pub fn render_png(data: &ChartData, path: &Path) -> Result<(), RenderError> {
        Self::draw(data, path, IMAGE_WIDTH, IMAGE_HEIGHT).map_err(|e| RenderError::Draw {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), kind = ?data.kind, "Chart image rendered");
        Ok(())
    }

    /// Render to PNG then hand the file to the system image viewer.
    pub fn render_and_open(data: &ChartData, path: &Path) -> Result<(), RenderError> {
        Self::render_png(data, path)?;
        open::that(path)?;
        Ok(())
    }

    fn draw(data: &ChartData, path: &Path, width: u32, height: u32) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        match data.kind {
            ChartKind::Bar => Self::draw_bar(&root, data)?,
            ChartKind::Line => Self::draw_line(&root, data)?,
            ChartKind::Pie => Self::draw_pie(&root, data)?,
        }

        root.present()?;
        Ok(())
    }

    fn draw_bar(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        data: &ChartData,
    ) -> Result<(), Box<dyn Error>> {
        let mut chart = ChartBuilder::on(root)
            .caption(data.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(Self::x_range(data), Self::y_range(data))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(data.x_label)
            .y_desc(data.y_label)
            .draw()?;

        chart.draw_series(data.points.iter().map(|&[x, y]| {
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], SERIES_COLOR.mix(0.85).filled())
        }))?;

        Ok(())
    }

    fn draw_line(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        data: &ChartData,
    ) -> Result<(), Box<dyn Error>> {
        let mut chart = ChartBuilder::on(root)
            .caption(data.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(Self::x_range(data), Self::y_range(data))?;

        chart
            .configure_mesh()
            .x_desc(data.x_label)
            .y_desc(data.y_label)
            .draw()?;

        chart.draw_series(LineSeries::new(
            data.points.iter().map(|&[x, y]| (x, y)),
            SERIES_COLOR.stroke_width(2),
        ))?;
        chart.draw_series(
            data.points
                .iter()
                .map(|&[x, y]| Circle::new((x, y), 4, SERIES_COLOR.filled())),
        )?;

        Ok(())
    }

    fn draw_pie(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        data: &ChartData,
    ) -> Result<(), Box<dyn Error>> {
        let area = root.titled(data.title, ("sans-serif", 24))?;
        if data.slices.is_empty() {
            return Ok(());
        }

        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        // Equal radius both ways keeps the pie circular
        let radius = (w.min(h) as f64 / 2.0 - 60.0).max(10.0);

        let sizes: Vec<f64> = data.slices.iter().map(|s| s.value).collect();
        let labels: Vec<&str> = data.slices.iter().map(|s| s.label.as_str()).collect();
        let colors: Vec<RGBColor> = (0..sizes.len())
            .map(|i| PALETTE[i % PALETTE.len()])
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        // plotters measures angles clockwise from 3 o'clock; start at 12 o'clock
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 14).into_font().color(&WHITE));
        area.draw(&pie)?;

        Ok(())
    }

    fn x_range(data: &ChartData) -> Range<f64> {
        let n = data.points.len().max(1) as f64;
        -0.5..(n - 0.5)
    }

    /// Always includes zero, padded by 10%.
    fn y_range(data: &ChartData) -> Range<f64> {
        let (min, max) = data
            .points
            .iter()
            .fold((0.0f64, 0.0f64), |(lo, hi), &[_, y]| (lo.min(y), hi.max(y)));
        if max - min <= f64::EPSILON {
            return min..(max + 1.0);
        }
        let pad = (max - min) * 0.1;
        let low = if min < 0.0 { min - pad } else { 0.0 };
        low..(max + pad)
    }
}
