//! Chart kind selection.

use crate::data::ProductOrder;
use std::fmt;

/// The three chart kinds the app can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Bar
    }
}

/// Why a typed chart kind was replaced by the bar chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFallback {
    Unrecognized,
    Missing,
}

impl fmt::Display for ChartFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartFallback::Unrecognized => {
                write!(f, "Unrecognized chart kind, showing a bar chart instead")
            }
            ChartFallback::Missing => write!(f, "No chart kind given, showing a bar chart"),
        }
    }
}

/// Result of leniently parsing a chart kind from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartChoice {
    pub kind: ChartKind,
    pub fallback: Option<ChartFallback>,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Pie, ChartKind::Line];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Pie => "Pie",
            ChartKind::Line => "Line",
        }
    }

    /// Stem used for the rendered PNG file name
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
        }
    }

    /// Query ordering the chart is built from.
    pub fn order(self) -> ProductOrder {
        match self {
            ChartKind::Bar => ProductOrder::StockDesc,
            ChartKind::Pie => ProductOrder::Natural,
            ChartKind::Line => ProductOrder::IdAsc,
        }
    }

    /// Case-insensitive match against the Spanish and English names.
    /// Anything else resolves to `Bar` with the reason attached.
    pub fn parse_lenient(input: &str) -> ChartChoice {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return ChartChoice {
                kind: ChartKind::Bar,
                fallback: Some(ChartFallback::Missing),
            };
        }

        let kind = match normalized.as_str() {
            "barras" | "bar" => Some(ChartKind::Bar),
            "circular" | "pie" => Some(ChartKind::Pie),
            "lineas" | "líneas" | "line" => Some(ChartKind::Line),
            _ => None,
        };

        match kind {
            Some(kind) => ChartChoice {
                kind,
                fallback: None,
            },
            None => ChartChoice {
                kind: ChartKind::Bar,
                fallback: Some(ChartFallback::Unrecognized),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_names_are_case_insensitive() {
        assert_eq!(ChartKind::parse_lenient("BARRAS").kind, ChartKind::Bar);
        assert_eq!(ChartKind::parse_lenient("Circular").kind, ChartKind::Pie);
        assert_eq!(ChartKind::parse_lenient("lineas").kind, ChartKind::Line);
        assert_eq!(ChartKind::parse_lenient(" pie ").fallback, None);
    }

    #[test]
    fn unknown_and_empty_fall_back_to_stock_ordered_bar() {
        let unknown = ChartKind::parse_lenient("xyz");
        assert_eq!(unknown.kind, ChartKind::Bar);
        assert_eq!(unknown.fallback, Some(ChartFallback::Unrecognized));
        assert_eq!(unknown.kind.order(), ProductOrder::StockDesc);

        let empty = ChartKind::parse_lenient("");
        assert_eq!(empty.kind, ChartKind::Bar);
        assert_eq!(empty.fallback, Some(ChartFallback::Missing));
        assert_eq!(empty.kind.order(), ProductOrder::StockDesc);
    }

    #[test]
    fn each_kind_has_its_own_ordering() {
        assert_eq!(ChartKind::Pie.order(), ProductOrder::Natural);
        assert_eq!(ChartKind::Line.order(), ProductOrder::IdAsc);
    }
}
