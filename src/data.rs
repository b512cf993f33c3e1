use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a statistic column, decided once over the whole table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// One typed cell of a statistic column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
            Cell::Missing => String::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Parses a raw field as a number, accepting surrounding whitespace.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerces a raw field into a cell of the given column kind.
///
/// Numeric columns never fail: anything that does not parse becomes
/// [`Cell::Missing`].
pub fn coerce_cell(value: &str, kind: ColumnKind) -> Cell {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Cell::Missing;
    }
    match kind {
        ColumnKind::Numeric => parse_number(trimmed).map_or(Cell::Missing, Cell::Number),
        ColumnKind::Text => Cell::Text(trimmed.to_string()),
    }
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Rounds to `digits` decimal places, ties to even.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}
