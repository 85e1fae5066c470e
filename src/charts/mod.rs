//! Charts module - Chart data, embedded plotting and static PNG rendering

mod kind;
mod plotter;
mod renderer;

pub use kind::ChartKind;
pub use plotter::{ChartData, ChartPlotter};
pub use renderer::StaticChartRenderer;
