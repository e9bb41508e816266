//! `shelfcheck-core`: shared table model.
//!
//! The decoder produces a [`RawTable`]; the normalizer reads it back through
//! the null-safe coercions in [`numeric`].

pub mod code;
pub mod numeric;
pub mod table;

pub use code::ProductCode;
pub use table::{Cell, RawTable};
