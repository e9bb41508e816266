// Spreadsheet decoding (xlsx, xls, xlsb, ods) via calamine

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use shelfcheck_core::{Cell, RawTable};

use crate::decode::{assemble, DecodeError, HeaderMode};

/// Decode the first worksheet of an in-memory workbook.
///
/// Cells are positioned from column A: a range that starts at C3 gets two
/// leading empty cells per row, so positional mappings stay aligned with
/// what the user sees in the spreadsheet.
pub fn decode_spreadsheet(bytes: &[u8], mode: HeaderMode) -> Result<RawTable, DecodeError> {
    let mut workbook: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| DecodeError::Spreadsheet(format!("failed to open workbook: {e}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| DecodeError::Spreadsheet("workbook contains no sheets".into()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| DecodeError::Spreadsheet(format!("failed to read sheet '{first}': {e}")))?;

    if sheet_names.len() > 1 {
        log::debug!("workbook has {} sheets; reading '{first}'", sheet_names.len());
    }

    // Range start offset (data may not begin at A1)
    let (_, data_start_col) = range.start().unwrap_or((0, 0));
    let lead = data_start_col as usize;

    let rows = range
        .rows()
        .map(|row| {
            let mut cells = vec![Cell::Empty; lead];
            cells.extend(row.iter().map(convert_cell));
            cells
        })
        .collect();

    Ok(assemble(rows, mode))
}

fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        // Store as TRUE/FALSE text, the way spreadsheets display them
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.into()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
        // #N/A, #REF! and friends carry no usable value
        Data::Error(_) => Cell::Empty,
    }
}
