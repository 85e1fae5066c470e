//! Control Panel Widget
//! Left side panel with the action buttons, chart kind selector and status line.

use crate::charts::ChartKind;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub chart_kind: ChartKind,
    pub product_count: i64,
    pub status: String,
    pub status_is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            chart_kind: ChartKind::default(),
            product_count: 0,
            status: "Ready".to_string(),
            status_is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new(chart_kind: ChartKind) -> Self {
        Self {
            chart_kind,
            ..Self::default()
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📦 Inventory Desk")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new(format!("{} products", self.product_count))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Product Actions =====
        ui.label(RichText::new("🗂 Products").size(14.0).strong());
        ui.add_space(5.0);

        ui.vertical_centered(|ui| {
            let size = egui::vec2(200.0, 32.0);
            if ui
                .add(egui::Button::new(RichText::new("➕ Add Product").size(14.0)).min_size(size))
                .clicked()
            {
                action = ControlPanelAction::AddProduct;
            }
            ui.add_space(6.0);
            if ui
                .add(egui::Button::new(RichText::new("📋 Show Table").size(14.0)).min_size(size))
                .clicked()
            {
                action = ControlPanelAction::ShowTable;
            }
            ui.add_space(6.0);
            if ui
                .add(
                    egui::Button::new(RichText::new("📄 Export to Excel").size(14.0))
                        .min_size(size),
                )
                .clicked()
            {
                action = ControlPanelAction::ExportExcel;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Section =====
        ui.label(RichText::new("📊 Chart").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([80.0, 20.0], egui::Label::new("Chart Kind:"));
            ComboBox::from_id_salt("chart_kind")
                .width(120.0)
                .selected_text(self.chart_kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut self.chart_kind, kind, kind.label());
                    }
                });
        });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("▶ Show Chart").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ShowChart;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    AddProduct,
    ShowTable,
    ExportExcel,
    ShowChart,
}
