//! Decode entry points: sniff, decode once, fall back once.

use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use shelfcheck_core::{Cell, RawTable};

use crate::sniff::{sniff_format, SourceFormat};

/// Whether the first row of the stream is a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    Headered,
    Headerless,
}

/// What the caller knows about the stream's origin.
#[derive(Debug, Clone, Default)]
pub struct SourceHint {
    /// Original filename as uploaded; only the extension is consulted.
    pub filename: Option<String>,
}

impl SourceHint {
    pub fn named(filename: impl Into<String>) -> Self {
        Self { filename: Some(filename.into()) }
    }

    pub fn from_path(path: &Path) -> Self {
        Self {
            filename: path.file_name().and_then(|n| n.to_str()).map(String::from),
        }
    }
}

impl fmt::Display for SourceHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename.as_deref().unwrap_or("<stream>"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Reading or rewinding the stream failed.
    Io(String),
    /// Delimited-text decode failed.
    Text(String),
    /// Spreadsheet decode failed.
    Spreadsheet(String),
    /// Both strategies failed. `primary` is the sniffed one.
    Exhausted {
        primary: SourceFormat,
        text: String,
        spreadsheet: String,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "cannot read input: {msg}"),
            Self::Text(msg) => write!(f, "cannot decode as delimited text: {msg}"),
            Self::Spreadsheet(msg) => write!(f, "cannot decode as spreadsheet: {msg}"),
            Self::Exhausted { primary, text, spreadsheet } => write!(
                f,
                "unrecognized file format (tried {primary} first): text: {text}; spreadsheet: {spreadsheet}"
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    fn reason(&self) -> String {
        match self {
            Self::Text(msg) | Self::Spreadsheet(msg) | Self::Io(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Decode a seekable stream. The stream is rewound before reading, so a
/// caller that already probed it does not need to.
pub fn decode<R: Read + Seek>(
    reader: &mut R,
    hint: &SourceHint,
    mode: HeaderMode,
) -> Result<RawTable, DecodeError> {
    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| DecodeError::Io(e.to_string()))?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeError::Io(e.to_string()))?;
    decode_bytes(&bytes, hint, mode)
}

/// Decode a file on disk, using its name as the hint.
pub fn decode_path(path: &Path, mode: HeaderMode) -> Result<RawTable, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::Io(format!("{}: {e}", path.display())))?;
    decode_bytes(&bytes, &SourceHint::from_path(path), mode)
}

/// Decode an in-memory buffer.
pub fn decode_bytes(
    bytes: &[u8],
    hint: &SourceHint,
    mode: HeaderMode,
) -> Result<RawTable, DecodeError> {
    let primary = sniff_format(bytes, hint.filename.as_deref());
    log::debug!("decoding {hint} as {primary} ({} bytes)", bytes.len());

    let first = match decode_as(primary, bytes, mode) {
        Ok(table) => return Ok(table),
        Err(e) => e,
    };

    let fallback = primary.other();
    log::warn!("{primary} decode of {hint} failed ({first}); retrying as {fallback}");

    match decode_as(fallback, bytes, mode) {
        Ok(table) => Ok(table),
        Err(second) => {
            let (text, spreadsheet) = match primary {
                SourceFormat::Delimited => (first.reason(), second.reason()),
                SourceFormat::Spreadsheet => (second.reason(), first.reason()),
            };
            Err(DecodeError::Exhausted { primary, text, spreadsheet })
        }
    }
}

fn decode_as(format: SourceFormat, bytes: &[u8], mode: HeaderMode) -> Result<RawTable, DecodeError> {
    match format {
        SourceFormat::Delimited => crate::csv::decode_text(bytes, mode),
        SourceFormat::Spreadsheet => crate::xlsx::decode_spreadsheet(bytes, mode),
    }
}

/// Split off the header row (when asked for) and drop fully-empty rows.
pub(crate) fn assemble(rows: Vec<Vec<Cell>>, mode: HeaderMode) -> RawTable {
    let mut rows = rows
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.is_empty()));

    match mode {
        HeaderMode::Headerless => RawTable::from_rows(rows.collect()),
        HeaderMode::Headered => {
            let header = rows
                .next()
                .map(|row| {
                    row.iter()
                        .map(|c| c.to_text().unwrap_or_default())
                        .collect()
                })
                .unwrap_or_default();
            RawTable::new(Some(header), rows.collect())
        }
    }
}
