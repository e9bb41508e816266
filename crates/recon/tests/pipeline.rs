use shelfcheck_core::{Cell, RawTable};
use shelfcheck_recon::model::{Tier, NO_DESCRIPTION};
use shelfcheck_recon::{run, ReconError, ShelfConfig};

fn text(s: &str) -> Cell {
    Cell::from_text(s)
}

fn sales_table(rows: &[(&str, &str, &str, &str)]) -> RawTable {
    RawTable::new(
        Some(vec![
            "Item de Estoque:".into(),
            "Qtde\r\nCupom".into(),
            "Qtde. Venda".into(),
            "Valor Venda".into(),
        ]),
        rows.iter()
            .map(|(c, d, q, v)| vec![text(c), text(d), text(q), text(v)])
            .collect(),
    )
}

fn inventory_table(rows: &[(&str, &str, &str)]) -> RawTable {
    RawTable::from_rows(
        rows.iter()
            .map(|(c, d, s)| vec![text(c), text(d), text("UN"), Cell::Empty, Cell::Empty, text(s)])
            .collect(),
    )
}

// -------------------------------------------------------------------------
// Outer join
// -------------------------------------------------------------------------

#[test]
fn union_of_codes_with_zero_fill() {
    let inventory = inventory_table(&[("1", "Martelo", "10"), ("2", "Serrote", "4"), ("3", "Alicate", "0")]);
    let sales = sales_table(&[("2", "Serrote", "1", "30"), ("3", "", "2", "50"), ("4", "Trena", "3", "20")]);

    let dashboard = run(&sales, &inventory, &ShelfConfig::default()).unwrap();

    let mut codes: Vec<String> = dashboard.items.iter().map(|i| i.code.to_string()).collect();
    codes.sort();
    assert_eq!(codes, vec!["1", "2", "3", "4"]);

    let by_code = |c: &str| dashboard.items.iter().find(|i| i.code.to_string() == c).unwrap();
    assert_eq!(by_code("1").units_sold, 0.0);
    assert_eq!(by_code("1").revenue, 0.0);
    assert_eq!(by_code("4").stock_on_hand, 0.0);
    assert_eq!(by_code("3").description, "Alicate");
    assert_eq!(by_code("4").description, "Trena");

    assert_eq!(dashboard.meta.sales_records, 3);
    assert_eq!(dashboard.meta.inventory_records, 3);
}

#[test]
fn item_without_any_description_gets_sentinel() {
    let inventory = inventory_table(&[("5", "", "1")]);
    let sales = sales_table(&[]);
    let dashboard = run(&sales, &inventory, &ShelfConfig::default()).unwrap();
    assert_eq!(dashboard.items[0].description, NO_DESCRIPTION);
}

// -------------------------------------------------------------------------
// Classification through the pipeline
// -------------------------------------------------------------------------

#[test]
fn curve_and_views() {
    let inventory = inventory_table(&[
        ("10", "Cimento", "0"),
        ("11", "Areia", "40"),
        ("12", "Brita", "2"),
        ("13", "Cal", "9"),
    ]);
    let sales = sales_table(&[
        ("10", "Cimento", "50", "600"),
        ("11", "Areia", "0", "0"),
        ("12", "Brita", "10", "300"),
        ("13", "Cal", "1", "100"),
    ]);

    let dashboard = run(&sales, &inventory, &ShelfConfig::default()).unwrap();

    let order: Vec<String> = dashboard.items.iter().map(|i| i.code.to_string()).collect();
    assert_eq!(order, vec!["10", "12", "13", "11"]);

    // 600/1000 = 0.6 is past the A breakpoint
    assert_eq!(dashboard.items[0].tier, Tier::B);
    assert_eq!(dashboard.items[1].tier, Tier::C);
    assert_eq!(dashboard.items[2].tier, Tier::D);
    assert_eq!(dashboard.items[3].revenue_share, 1.0);

    assert_eq!(dashboard.summary.phantom_stock_count, 1);
    assert_eq!(dashboard.phantom_stock[0].code.to_string(), "11");
    // Cimento is out of stock but tier B, so not critical
    assert_eq!(dashboard.summary.critical_stockout_count, 0);
}

#[test]
fn critical_stockout_surfaces_top_seller_at_zero_stock() {
    let inventory = inventory_table(&[("1", "Top", "0"), ("2", "Rest", "3")]);
    let sales = sales_table(&[("1", "Top", "80", "900"), ("2", "Rest", "2", "100")]);

    let mut config = ShelfConfig::default();
    config.tiers.a = 0.9;

    let dashboard = run(&sales, &inventory, &config).unwrap();
    assert_eq!(dashboard.summary.critical_stockout_count, 1);
    assert_eq!(dashboard.critical_stockout[0].description, "Top");
}

#[test]
fn all_zero_revenue_is_all_tier_a() {
    let inventory = inventory_table(&[("1", "a", "3"), ("2", "b", "8")]);
    let sales = sales_table(&[("1", "a", "0", "0")]);
    let dashboard = run(&sales, &inventory, &ShelfConfig::default()).unwrap();

    assert!(dashboard.items.iter().all(|i| i.revenue_share == 0.0));
    assert!(dashboard.items.iter().all(|i| i.tier == Tier::A));
    assert_eq!(dashboard.summary.tier_counts.a, 2);
    // Both are tier A; only the zero-stock one would be critical, and neither is
    assert_eq!(dashboard.summary.critical_stockout_count, 0);
}

// -------------------------------------------------------------------------
// Fail-fast errors
// -------------------------------------------------------------------------

#[test]
fn narrow_inventory_aborts_with_layout_error() {
    let inventory = RawTable::from_rows(vec![vec![text("1"), text("a"), text("b"), text("4")]]);
    let sales = sales_table(&[("1", "a", "1", "1")]);

    let err = run(&sales, &inventory, &ShelfConfig::default()).unwrap_err();
    assert_eq!(err, ReconError::Layout { found: 4, required: 6 });
}

#[test]
fn sales_without_code_column_aborts() {
    let sales = RawTable::new(Some(vec!["Foo".into()]), vec![vec![text("1")]]);
    let inventory = inventory_table(&[("1", "a", "1")]);
    let err = run(&sales, &inventory, &ShelfConfig::default()).unwrap_err();
    assert!(matches!(err, ReconError::MissingColumn { .. }));
}

#[test]
fn non_numeric_codes_are_dropped_silently() {
    let inventory = inventory_table(&[("Codigo", "Descricao", "Estoque"), ("1", "a", "1"), ("", "", "")]);
    let sales = sales_table(&[("1", "a", "1", "1"), ("Total geral", "", "1", "1")]);
    let dashboard = run(&sales, &inventory, &ShelfConfig::default()).unwrap();
    assert_eq!(dashboard.summary.total_items, 1);
    assert_eq!(dashboard.meta.sales_records, 1);
    assert_eq!(dashboard.meta.inventory_records, 1);
}
