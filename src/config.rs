//! Application Configuration
//! Optional `inventory.json` in the working directory; every field has a default.

use crate::charts::ChartKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "inventory.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub export_path: PathBuf,
    pub chart_dir: PathBuf,
    /// Also render each chart to PNG and open it in the system viewer
    pub open_chart_window: bool,
    /// Chart kind preselected in the control panel ("barras", "circular", "lineas")
    pub default_chart: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("erp_database.db"),
            export_path: PathBuf::from("productos_excel.xlsx"),
            chart_dir: PathBuf::from("."),
            open_chart_window: true,
            default_chart: "barras".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve `default_chart`; fallbacks are logged, not fatal.
    pub fn initial_chart_kind(&self) -> ChartKind {
        let choice = ChartKind::parse_lenient(&self.default_chart);
        if let Some(fallback) = choice.fallback {
            tracing::warn!(input = %self.default_chart, "{}", fallback);
        }
        choice.kind
    }
}
