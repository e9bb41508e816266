use serde::Serialize;

use crate::numeric::{coerce_number, format_number};

/// A single decoded cell. Decoders never guess types for text fields:
/// `"12"` in a CSV stays `Text` until a normalizer coerces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    /// Build a cell from a raw text field; blank fields become `Empty`.
    pub fn from_text(field: &str) -> Self {
        if field.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric view of the cell, `None` when it cannot be coerced.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => n.is_finite().then_some(*n),
            Cell::Text(s) => coerce_number(s),
        }
    }

    /// Trimmed display text, `None` for blank cells.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            Cell::Number(n) => Some(format_number(*n)),
        }
    }
}

/// Generic decoded table: ordered rows of ordered cells plus an optional
/// header row. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<Cell>>) -> Self {
        Self { header, rows }
    }

    /// Headerless table.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { header: None, rows }
    }

    /// Widest row, header included.
    pub fn width(&self) -> usize {
        let header_width = self.header.as_ref().map_or(0, |h| h.len());
        self.rows
            .iter()
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
            .max(header_width)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col); out-of-range positions read as `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Index of the first header label satisfying `pred`.
    pub fn header_position<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.header.as_ref()?.iter().position(|h| pred(h))
    }
}
