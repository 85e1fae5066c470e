//! Inventory Desk Main Application
//! Main window with menu bar, control panel, chart viewer and child windows.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::config::AppConfig;
use crate::data::ProductStore;
use crate::gui::product_form::{FormAction, ProductForm, SubmitError};
use crate::gui::{dialogs, ChartViewer, ControlPanel, ControlPanelAction, TableView};
use crate::xlsx::XlsxExporter;
use egui::SidePanel;

/// Main application window.
pub struct InventoryApp {
    store: ProductStore,
    config: AppConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    product_form: Option<ProductForm>,
    tables: Vec<TableView>,
    next_table_id: usize,
}

impl InventoryApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, store: ProductStore, config: AppConfig) -> Self {
        let mut app = Self {
            store,
            control_panel: ControlPanel::new(config.initial_chart_kind()),
            config,
            chart_viewer: ChartViewer::new(),
            product_form: None,
            tables: Vec::new(),
            next_table_id: 0,
        };
        app.refresh_count();
        app
    }

    fn refresh_count(&mut self) {
        match self.store.count() {
            Ok(count) => self.control_panel.product_count = count,
            Err(e) => tracing::error!(error = %e, "Failed to count products"),
        }
    }

    /// Open the form, or bring the one already open to the front.
    fn handle_add_product(&mut self) {
        match self.product_form.as_mut() {
            Some(form) => form.request_focus(),
            None => self.product_form = Some(ProductForm::new()),
        }
    }

    fn handle_form(&mut self, ctx: &egui::Context) {
        let Some(form) = self.product_form.as_mut() else {
            return;
        };

        match form.show(ctx) {
            FormAction::Submit => match form.submit(&self.store) {
                Ok(id) => {
                    form.close();
                    self.control_panel.set_status(format!("Product #{} added", id));
                    dialogs::info("Success", "Product added successfully");
                }
                Err(SubmitError::Invalid(e)) => {
                    tracing::debug!(error = %e, "Product form rejected");
                    dialogs::error("Error", &e.to_string());
                }
                Err(SubmitError::Store(e)) => {
                    self.control_panel.set_error("Failed to add product");
                    dialogs::failure("Adding the product", &e);
                }
            },
            FormAction::Cancel => form.close(),
            FormAction::None => {}
        }

        if !form.is_open() {
            self.product_form = None;
            self.refresh_count();
        }
    }

    fn handle_show_table(&mut self) {
        match TableView::load(self.next_table_id, &self.store) {
            Ok(view) => {
                self.next_table_id += 1;
                self.tables.push(view);
            }
            Err(e) => {
                self.control_panel.set_error("Failed to load products");
                dialogs::failure("Loading the product table", &e);
            }
        }
    }

    fn handle_export(&mut self) {
        let path = &self.config.export_path;
        match XlsxExporter::export_products(&self.store, path) {
            Ok(rows) => {
                self.control_panel
                    .set_status(format!("Exported {} products to {}", rows, path.display()));
                dialogs::info("Success", &export_message(rows, path));
            }
            Err(e) => {
                self.control_panel.set_error("Export failed");
                dialogs::failure("Exporting to Excel", &e);
            }
        }
    }

    fn handle_show_chart(&mut self) {
        let kind = self.control_panel.chart_kind;
        let chart = match ChartData::build(&self.store, kind) {
            Ok(chart) => chart,
            Err(e) => {
                self.control_panel.set_error("Failed to load chart data");
                dialogs::failure("Building the chart", &e);
                return;
            }
        };

        if self.config.open_chart_window {
            let path = StaticChartRenderer::image_path(&self.config.chart_dir, kind);
            if let Err(e) = StaticChartRenderer::render_and_open(&chart, &path) {
                dialogs::warning("Warning", &format!("Chart window could not be opened.\n\n{}", e));
            }
        }

        self.control_panel
            .set_status(format!("{} chart drawn", kind.label()));
        self.chart_viewer.set_chart(chart);
    }
}

impl eframe::App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::AddProduct => self.handle_add_product(),
                        ControlPanelAction::ShowTable => self.handle_show_table(),
                        ControlPanelAction::ExportExcel => self.handle_export(),
                        ControlPanelAction::ShowChart => self.handle_show_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });

        // Child windows
        self.handle_form(ctx);
        for table in &mut self.tables {
            table.show(ctx);
        }
        self.tables.retain(TableView::is_open);
    }
}

fn export_message(rows: usize, path: &std::path::Path) -> String {
    format!(
        "Data exported to Excel successfully: {} products written to {}",
        rows,
        path.display()
    )
}
