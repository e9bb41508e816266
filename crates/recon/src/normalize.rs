//! Source-specific column mapping onto the canonical record shapes.
//!
//! Sales exports carry stable header labels, inventory exports do not, so the
//! two normalizers work differently on purpose: sales by label, inventory by
//! column position.

use shelfcheck_core::{ProductCode, RawTable};

use crate::config::SalesHeaders;
use crate::error::ReconError;
use crate::model::{InventoryRecord, SalesRecord};

/// Inventory column holding the product code.
pub const INVENTORY_CODE_COLUMN: usize = 0;
/// Inventory column holding the description.
pub const INVENTORY_DESCRIPTION_COLUMN: usize = 1;
/// Inventory column holding stock on hand.
pub const INVENTORY_STOCK_COLUMN: usize = 5;
/// Narrowest inventory table the positional layout accepts.
pub const INVENTORY_MIN_COLUMNS: usize = INVENTORY_STOCK_COLUMN + 1;

/// Map a headered sales table onto [`SalesRecord`]s.
///
/// Fields whose label is missing come back as `None`. Rows whose code does
/// not coerce to a number are skipped. Only a missing code column is an
/// error.
pub fn normalize_sales(table: &RawTable, headers: &SalesHeaders) -> Result<Vec<SalesRecord>, ReconError> {
    let code_idx = find_column(table, &headers.code).ok_or_else(|| ReconError::MissingColumn {
        source: "sales".into(),
        column: "code".into(),
    })?;
    let description_idx = find_column(table, &headers.description);
    let units_idx = find_column(table, &headers.units_sold);
    let revenue_idx = find_column(table, &headers.revenue);

    log::debug!(
        "sales columns: code={code_idx} description={description_idx:?} units_sold={units_idx:?} revenue={revenue_idx:?}"
    );

    let mut records = Vec::with_capacity(table.row_count());
    let mut skipped = 0usize;

    for row in 0..table.row_count() {
        let Some(code) = ProductCode::from_cell(table.cell(row, code_idx)) else {
            skipped += 1;
            continue;
        };

        records.push(SalesRecord {
            code,
            description: description_idx.and_then(|i| table.cell(row, i).to_text()),
            units_sold: units_idx.map(|i| table.cell(row, i).to_number().unwrap_or(0.0)),
            revenue: revenue_idx.map(|i| table.cell(row, i).to_number().unwrap_or(0.0)),
        });
    }

    if skipped > 0 {
        log::debug!("sales: skipped {skipped} row(s) with a non-numeric code");
    }

    Ok(records)
}

/// Map an inventory table onto [`InventoryRecord`]s by column position.
///
/// The table must be at least [`INVENTORY_MIN_COLUMNS`] wide. A header row,
/// if the decoder produced one, is not used for mapping.
pub fn normalize_inventory(table: &RawTable) -> Result<Vec<InventoryRecord>, ReconError> {
    let found = table.width();
    if found < INVENTORY_MIN_COLUMNS {
        return Err(ReconError::Layout {
            found,
            required: INVENTORY_MIN_COLUMNS,
        });
    }

    let mut records = Vec::with_capacity(table.row_count());
    let mut skipped = 0usize;

    for row in 0..table.row_count() {
        let Some(code) = ProductCode::from_cell(table.cell(row, INVENTORY_CODE_COLUMN)) else {
            skipped += 1;
            continue;
        };

        records.push(InventoryRecord {
            code,
            description: table.cell(row, INVENTORY_DESCRIPTION_COLUMN).to_text(),
            stock_on_hand: table.cell(row, INVENTORY_STOCK_COLUMN).to_number().unwrap_or(0.0),
        });
    }

    if skipped > 0 {
        log::debug!("inventory: skipped {skipped} row(s) with an empty or non-numeric code");
    }

    Ok(records)
}

/// First header position matching any label, trying labels in order.
fn find_column(table: &RawTable, labels: &[String]) -> Option<usize> {
    labels.iter().find_map(|label| {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        table.header_position(|h| normalize_label(h) == wanted)
    })
}

/// Case-fold and collapse whitespace runs (including line breaks) to one space.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfcheck_core::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    fn legacy_sales_table() -> RawTable {
        RawTable::new(
            Some(vec![
                "Item de Estoque:".into(),
                "Qtde\r\nCupom".into(),
                "Qtde. Venda".into(),
                "Valor Venda".into(),
                "Margem".into(),
            ]),
            vec![
                vec![text("101"), text("Martelo"), text("4"), text("120,50"), text("x")],
                vec![text("Total:"), Cell::Empty, text("4"), text("120,50")],
                vec![Cell::Number(102.0), Cell::Empty, text("n/a"), Cell::Number(10.0)],
            ],
        )
    }

    #[test]
    fn sales_maps_legacy_labels() {
        let records = normalize_sales(&legacy_sales_table(), &SalesHeaders::default()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.code.to_string(), "101");
        assert_eq!(first.description.as_deref(), Some("Martelo"));
        assert_eq!(first.units_sold, Some(4.0));
        assert_eq!(first.revenue, Some(120.5));

        // Present column, unparsable cell: zero, not absent
        let second = &records[1];
        assert_eq!(second.description, None);
        assert_eq!(second.units_sold, Some(0.0));
        assert_eq!(second.revenue, Some(10.0));
    }

    #[test]
    fn sales_label_match_ignores_case_and_line_breaks() {
        let table = RawTable::new(
            Some(vec!["  item DE estoque: ".into(), "Qtde Cupom".into()]),
            vec![vec![text("5"), text("Prego")]],
        );
        let records = normalize_sales(&table, &SalesHeaders::default()).unwrap();
        assert_eq!(records[0].description.as_deref(), Some("Prego"));
    }

    #[test]
    fn sales_absent_columns_are_omitted_not_defaulted() {
        let table = RawTable::new(Some(vec!["Codigo".into()]), vec![vec![text("9")]]);
        let records = normalize_sales(&table, &SalesHeaders::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, None);
        assert_eq!(records[0].units_sold, None);
        assert_eq!(records[0].revenue, None);
    }

    #[test]
    fn sales_first_matching_label_wins() {
        let headers = SalesHeaders {
            revenue: vec!["Faturamento".into(), "Valor Venda".into()],
            ..SalesHeaders::default()
        };
        let table = RawTable::new(
            Some(vec!["Codigo".into(), "Valor Venda".into(), "Faturamento".into()]),
            vec![vec![text("1"), text("10"), text("99")]],
        );
        let records = normalize_sales(&table, &headers).unwrap();
        assert_eq!(records[0].revenue, Some(99.0));
    }

    #[test]
    fn sales_without_code_column_fails() {
        let table = RawTable::new(Some(vec!["Valor Venda".into()]), vec![vec![text("1")]]);
        let err = normalize_sales(&table, &SalesHeaders::default()).unwrap_err();
        assert_eq!(
            err,
            ReconError::MissingColumn { source: "sales".into(), column: "code".into() }
        );

        let headerless = RawTable::from_rows(vec![vec![text("1")]]);
        assert!(normalize_sales(&headerless, &SalesHeaders::default()).is_err());
    }

    fn inventory_row(code: &str, desc: &str, stock: &str) -> Vec<Cell> {
        vec![
            Cell::from_text(code),
            Cell::from_text(desc),
            text("UN"),
            text("x"),
            text("x"),
            Cell::from_text(stock),
        ]
    }

    #[test]
    fn inventory_maps_by_position() {
        let table = RawTable::from_rows(vec![
            inventory_row("Codigo", "Descricao", "Estoque"),
            inventory_row("1", "Martelo", "12"),
            inventory_row("", "orphan line", "3"),
            inventory_row("2", "", "abc"),
        ]);
        let records = normalize_inventory(&table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code.to_string(), "1");
        assert_eq!(records[0].description.as_deref(), Some("Martelo"));
        assert_eq!(records[0].stock_on_hand, 12.0);
        assert_eq!(records[1].description, None);
        assert_eq!(records[1].stock_on_hand, 0.0);
    }

    #[test]
    fn inventory_with_four_columns_is_layout_error() {
        let table = RawTable::from_rows(vec![vec![text("1"), text("a"), text("b"), text("3")]]);
        let err = normalize_inventory(&table).unwrap_err();
        assert_eq!(err, ReconError::Layout { found: 4, required: 6 });
        assert!(err.to_string().contains("inventory layout mismatch"));
    }

    #[test]
    fn inventory_short_rows_in_wide_table_read_as_zero() {
        let table = RawTable::from_rows(vec![
            inventory_row("1", "Martelo", "12"),
            vec![text("2"), text("Serrote")],
        ]);
        let records = normalize_inventory(&table).unwrap();
        assert_eq!(records[1].stock_on_hand, 0.0);
    }
}
