//! Spreadsheet cell values as read from a rate source

use crate::money::{has_thousands_tail, parse_brl_amount};
use std::fmt;

/// One row of a rate source, cells in column order
pub type Row = Vec<Cell>;

/// A single cell of a rate source
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Classify a raw field: blank is empty, a plain number is numeric,
    /// anything else is kept as trimmed text
    ///
    /// A dot followed by exactly three digits groups thousands, so `"1.500"`
    /// stays text and reads as 1500 through [`Cell::to_amount`].
    pub fn from_field(raw: &str) -> Self {
        let trimmed = raw.trim_start_matches('\u{feff}').trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && !has_thousands_tail(trimmed) => Cell::Number(value),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value of a price cell, accepting plain numbers and
    /// Brazilian currency text; `None` means the price is unknown
    pub fn to_amount(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(s) => parse_brl_amount(s),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::from_field(raw)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_field() {
        assert_eq!(Cell::from_field("  "), Cell::Empty);
        assert_eq!(Cell::from_field("89.90"), Cell::Number(89.9));
        assert_eq!(Cell::from_field("1.500"), Cell::text("1.500"));
        assert_eq!(Cell::from_field("\u{feff}PLANO OURO"), Cell::text("PLANO OURO"));
        assert_eq!(
            Cell::from_field(" R$ 0,01 - R$ 10.000,00 "),
            Cell::text("R$ 0,01 - R$ 10.000,00")
        );
    }

    #[test]
    fn test_to_amount() {
        assert_eq!(Cell::Number(120.0).to_amount(), Some(120.0));
        assert_eq!(Cell::text("R$ 1.234,56").to_amount(), Some(1_234.56));
        assert_eq!(Cell::text("consultar").to_amount(), None);
        assert_eq!(Cell::Empty.to_amount(), None);
    }

    #[test]
    fn test_grouped_thousands_match_currency_text() {
        let plain = Cell::from_field("1.500").to_amount();
        let prefixed = Cell::from_field("R$ 1.500").to_amount();
        assert_eq!(plain, Some(1_500.0));
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn test_whitespace_text_is_empty() {
        assert!(Cell::Text("   ".to_string()).is_empty());
        assert!(!Cell::Number(0.0).is_empty());
    }
}
