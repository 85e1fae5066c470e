//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod dialogs;
mod product_form;
mod table_view;

pub use app::InventoryApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use table_view::TableView;
