//! Inventory Desk - Product Inventory with Spreadsheet Export & Charts
//!
//! A Rust desktop application for recording products in a local SQLite file,
//! browsing them, exporting them to Excel and charting stock and prices.

mod charts;
mod config;
mod data;
mod gui;
mod xlsx;

use anyhow::Context;
use config::{AppConfig, CONFIG_FILE};
use data::ProductStore;
use eframe::egui;
use gui::InventoryApp;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(Path::new(CONFIG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = ProductStore::open(&config.database_path)
        .context("Could not open the product database")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Inventory Desk"),
        ..Default::default()
    };

    tracing::info!("Starting Inventory Desk");

    // Run the application
    eframe::run_native(
        "Inventory Desk",
        options,
        Box::new(|cc| Ok(Box::new(InventoryApp::new(cc, store, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
