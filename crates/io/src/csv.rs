// Delimited text decoding (CSV, TSV, semicolon exports)

use shelfcheck_core::{Cell, RawTable};

use crate::decode::{assemble, DecodeError, HeaderMode};

/// Decode delimited text bytes into a table.
///
/// Fields are kept as text; numeric coercion happens during normalization.
pub fn decode_text(bytes: &[u8], mode: HeaderMode) -> Result<RawTable, DecodeError> {
    let content = bytes_to_utf8(bytes);

    // Spreadsheet containers and other binaries decode to text full of NULs
    if content.contains('\0') {
        return Err(DecodeError::Text("input looks binary (NUL bytes)".into()));
    }

    let delimiter = sniff_delimiter(&content);
    log::debug!("delimiter sniffed as {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DecodeError::Text(format!("row {}: {e}", row_idx + 1)))?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(assemble(rows, mode))
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Convert raw bytes to UTF-8 (handles Windows-1252, Latin-1, etc.)
///
/// Valid UTF-8 is taken as is, minus a leading BOM. Anything else is decoded
/// as Windows-1252, the legacy single-byte encoding regional ERP exports use.
pub fn bytes_to_utf8(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}
