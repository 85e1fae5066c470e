//! Chart Viewer Widget
//! Central panel showing the most recently requested chart. A new chart replaces the old one.

use crate::charts::{ChartData, ChartPlotter};
use egui::{Frame, RichText};

#[derive(Default)]
pub struct ChartViewer {
    chart: Option<ChartData>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chart(&mut self, chart: ChartData) {
        self.chart = Some(chart);
    }

    pub fn chart(&self) -> Option<&ChartData> {
        self.chart.as_ref()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(chart) = self.chart() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Choose a chart kind and press Show Chart").size(18.0));
            });
            return;
        };

        if chart.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ChartPlotter::draw(ui, chart);
            });
    }
}
