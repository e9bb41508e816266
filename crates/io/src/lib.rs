// Tabular decoding for sales/inventory exports

pub mod csv;
pub mod decode;
pub mod sniff;
pub mod xlsx;

pub use decode::{decode, decode_bytes, decode_path, DecodeError, HeaderMode, SourceHint};
pub use sniff::SourceFormat;
