// Format sniffing: magic bytes first, extension second.

use std::path::Path;

/// Decode strategy chosen for a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text (CSV, TSV, semicolon exports).
    Delimited,
    /// Binary or zipped spreadsheet (xlsx, xls, xlsb, ods).
    Spreadsheet,
}

impl SourceFormat {
    /// The strategy tried when this one fails.
    pub fn other(self) -> Self {
        match self {
            Self::Delimited => Self::Spreadsheet,
            Self::Spreadsheet => Self::Delimited,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delimited => write!(f, "delimited text"),
            Self::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Pick a decode strategy from the leading bytes, then the filename extension.
///
/// Magic bytes win over the extension: exporters routinely name binary
/// workbooks `.csv`.
pub fn sniff_format(bytes: &[u8], filename: Option<&str>) -> SourceFormat {
    if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE2_MAGIC) {
        return SourceFormat::Spreadsheet;
    }

    let ext = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some(e) if SPREADSHEET_EXTENSIONS.contains(&e) => SourceFormat::Spreadsheet,
        _ => SourceFormat::Delimited,
    }
}
