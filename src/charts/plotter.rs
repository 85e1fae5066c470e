//! Chart Plotter Module
//! Builds chart data from the product store and draws it with egui_plot.

use crate::charts::ChartKind;
use crate::data::{Product, ProductStore, StoreError};
use egui::{Align2, Color32, FontId, Pos2, RichText, Shape, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Series color for bar and line charts
pub const SERIES_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Slice colors for the pie chart
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const PLOT_HEIGHT: f32 = 360.0;
/// Angle of the first pie slice edge (12 o'clock), counter-clockwise like a unit circle
const PIE_START_ANGLE: f64 = FRAC_PI_2;

/// One pie wedge
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the whole pie, 0..=1
    pub fraction: f64,
}

impl PieSlice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// Everything needed to draw one chart, independent of the drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Bar and line charts: `[row position, value]`
    pub points: Vec<[f64; 2]>,
    /// Pie chart only
    pub slices: Vec<PieSlice>,
}

impl ChartData {
    /// Query the store with the ordering the chart kind needs.
    pub fn build(store: &ProductStore, kind: ChartKind) -> Result<Self, StoreError> {
        let products = store.list_products(kind.order())?;
        Ok(Self::from_products(kind, &products))
    }

    /// Products must already be in `kind.order()`.
    pub fn from_products(kind: ChartKind, products: &[Product]) -> Self {
        match kind {
            ChartKind::Bar => Self {
                kind,
                title: "Product Stock - Bar Chart",
                x_label: "ID",
                y_label: "Stock",
                points: positional(products.iter().map(|p| p.stock as f64)),
                slices: Vec::new(),
            },
            ChartKind::Line => Self {
                kind,
                title: "Product Prices - Line Chart",
                x_label: "ID",
                y_label: "Price",
                points: positional(products.iter().map(|p| p.price)),
                slices: Vec::new(),
            },
            ChartKind::Pie => Self {
                kind,
                title: "Product Stock - Pie Chart",
                x_label: "",
                y_label: "",
                points: Vec::new(),
                slices: pie_slices(products),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.kind {
            ChartKind::Pie => self.slices.is_empty(),
            ChartKind::Bar | ChartKind::Line => self.points.is_empty(),
        }
    }
}

/// X is the row position, not the product id.
fn positional(values: impl Iterator<Item = f64>) -> Vec<[f64; 2]> {
    values.enumerate().map(|(i, v)| [i as f64, v]).collect()
}

/// Stock <= 0 cannot form a wedge and is left out.
fn pie_slices(products: &[Product]) -> Vec<PieSlice> {
    let total: f64 = products
        .iter()
        .filter(|p| p.stock > 0)
        .map(|p| p.stock as f64)
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }

    products
        .iter()
        .filter(|p| p.stock > 0)
        .map(|p| PieSlice {
            label: p.name.clone(),
            value: p.stock as f64,
            fraction: p.stock as f64 / total,
        })
        .collect()
}

/// Draws `ChartData` inside an egui panel.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn slice_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    pub fn draw(ui: &mut egui::Ui, data: &ChartData) {
        ui.label(RichText::new(data.title).size(16.0).strong());
        ui.add_space(6.0);

        match data.kind {
            ChartKind::Bar => Self::draw_bar_chart(ui, data),
            ChartKind::Line => Self::draw_line_chart(ui, data),
            ChartKind::Pie => Self::draw_pie_chart(ui, data),
        }
    }

    fn draw_bar_chart(ui: &mut egui::Ui, data: &ChartData) {
        let bars: Vec<Bar> = data
            .points
            .iter()
            .map(|&[x, y]| Bar::new(x, y).width(0.8).fill(SERIES_COLOR))
            .collect();

        Plot::new("bar_chart")
            .height(PLOT_HEIGHT)
            .x_axis_label(data.x_label)
            .y_axis_label(data.y_label)
            .allow_scroll(false)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR).name(data.y_label));
            });
    }

    fn draw_line_chart(ui: &mut egui::Ui, data: &ChartData) {
        Plot::new("line_chart")
            .height(PLOT_HEIGHT)
            .x_axis_label(data.x_label)
            .y_axis_label(data.y_label)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(data.points.iter().copied()))
                        .color(SERIES_COLOR)
                        .width(1.5)
                        .name(data.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(data.points.iter().copied()))
                        .radius(4.0)
                        .color(SERIES_COLOR),
                );
            });
    }

    /// egui_plot has no pie, so wedges are painted as triangle fans.
    fn draw_pie_chart(ui: &mut egui::Ui, data: &ChartData) {
        let size = egui::vec2(ui.available_width(), PLOT_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);

        let center = rect.center();
        // Leave room for the name labels around the circle
        let radius = (rect.width().min(rect.height()) / 2.0 - 40.0).max(10.0);
        let text_color = ui.visuals().text_color();

        let mut start = PIE_START_ANGLE;
        for (idx, slice) in data.slices.iter().enumerate() {
            let sweep = slice.fraction * TAU;
            let color = Self::slice_color(idx);

            // ~2 degree steps keep the edge smooth
            let steps = ((sweep / TAU) * 180.0).ceil().max(1.0) as usize;
            for step in 0..steps {
                let a0 = start + sweep * step as f64 / steps as f64;
                let a1 = start + sweep * (step + 1) as f64 / steps as f64;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        polar(center, radius, a0),
                        polar(center, radius, a1),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }

            let mid = start + sweep / 2.0;
            painter.text(
                polar(center, radius * 0.6, mid),
                Align2::CENTER_CENTER,
                slice.percent_label(),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
            painter.text(
                polar(center, radius + 18.0, mid),
                Align2::CENTER_CENTER,
                &slice.label,
                FontId::proportional(13.0),
                text_color,
            );

            start += sweep;
        }
    }
}

/// Screen position at `angle` radians (counter-clockwise, y grows downward).
fn polar(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    Pos2::new(
        center.x + radius * angle.cos() as f32,
        center.y - radius * angle.sin() as f32,
    )
}
