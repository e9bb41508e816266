use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};

use crate::numeric::format_number;
use crate::table::Cell;

/// Numeric product identifier, the join key between sales and inventory.
///
/// Wraps a finite `f64` so that `"00123"`, `"123"` and a spreadsheet number
/// `123.0` all name the same product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductCode(OrderedFloat<f64>);

impl ProductCode {
    /// Returns `None` for non-finite values.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(OrderedFloat(value)))
    }

    /// Coerce a cell into a code. Empty or non-numeric cells yield `None`.
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        cell.to_number().and_then(Self::new)
    }

    pub fn value(&self) -> f64 {
        self.0.into_inner()
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_number(self.value()))
    }
}

impl Serialize for ProductCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.value();
        if v.fract() == 0.0 && v.abs() < 1e15 {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}
