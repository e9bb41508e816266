use std::io::Write;

use rust_xlsxwriter::Workbook;
use shelfcheck_core::Cell;
use shelfcheck_io::{decode_path, DecodeError, HeaderMode};

fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(bytes).unwrap();
    path
}

#[test]
fn semicolon_sales_export_with_latin1_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = b"Item de Estoque:;Descri".to_vec();
    bytes.extend_from_slice(&[0xE7, 0xE3]); // "çã" in Windows-1252
    bytes.extend_from_slice(b"o;Qtde. Venda;Valor Venda\n1001;Parafuso;10;25,50\n\n1002;Porca;3;4,20\n");
    let path = write_file(&dir, "vendas.csv", &bytes);

    let table = decode_path(&path, HeaderMode::Headered).unwrap();
    let header = table.header.as_ref().unwrap();
    assert_eq!(header[1], "Descrição");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(0, 3).to_number(), Some(25.5));
}

#[test]
fn xlsx_inventory_decodes_headerless() {
    let dir = tempfile::tempdir().unwrap();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (row, (code, name, stock)) in [(1.0, "Martelo", 4.0), (2.0, "Serrote", 0.0)].into_iter().enumerate() {
        let row = row as u32;
        sheet.write_number(row, 0, code).unwrap();
        sheet.write_string(row, 1, name).unwrap();
        sheet.write_string(row, 2, "UN").unwrap();
        sheet.write_number(row, 5, stock).unwrap();
    }
    let path = write_file(&dir, "estoque.xlsx", &workbook.save_to_buffer().unwrap());

    let table = decode_path(&path, HeaderMode::Headerless).unwrap();
    assert!(table.header.is_none());
    assert_eq!(table.width(), 6);
    assert_eq!(table.cell(1, 1), &Cell::Text("Serrote".into()));
    assert_eq!(table.cell(0, 5), &Cell::Number(4.0));
}

#[test]
fn spreadsheet_saved_with_csv_extension_still_decodes() {
    let dir = tempfile::tempdir().unwrap();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Item de Estoque:").unwrap();
    sheet.write_number(1, 0, 77).unwrap();
    let path = write_file(&dir, "relatorio.csv", &workbook.save_to_buffer().unwrap());

    let table = decode_path(&path, HeaderMode::Headered).unwrap();
    assert_eq!(table.header, Some(vec!["Item de Estoque:".to_string()]));
    assert_eq!(table.cell(0, 0), &Cell::Number(77.0));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = decode_path(&dir.path().join("nope.csv"), HeaderMode::Headered).unwrap_err();
    assert!(matches!(err, DecodeError::Io(_)));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn corrupt_workbook_exhausts_both_paths() {
    let dir = tempfile::tempdir().unwrap();
    // ZIP magic followed by junk, with a NUL so the text path refuses it too
    let path = write_file(&dir, "broken.xlsx", b"PK\x03\x04\x00\x00garbage");
    let err = decode_path(&path, HeaderMode::Headerless).unwrap_err();
    assert!(matches!(err, DecodeError::Exhausted { .. }));
}
