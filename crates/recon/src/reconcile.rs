use std::collections::BTreeMap;

use shelfcheck_core::ProductCode;

use crate::model::{InventoryRecord, ReconciledItem, SalesRecord, NO_DESCRIPTION};

#[derive(Default)]
struct Sides<'a> {
    inventory: Option<&'a InventoryRecord>,
    sales: Option<&'a SalesRecord>,
}

/// Full outer join of inventory and sales on product code.
///
/// Every code from either side appears exactly once, in ascending code
/// order. Within one side the last record for a code wins. Numbers missing
/// on one side default to zero.
pub fn reconcile(inventory: &[InventoryRecord], sales: &[SalesRecord]) -> Vec<ReconciledItem> {
    let mut by_code: BTreeMap<ProductCode, Sides> = BTreeMap::new();
    let mut duplicates = (0usize, 0usize);

    for record in inventory {
        let entry = by_code.entry(record.code).or_default();
        if entry.inventory.replace(record).is_some() {
            duplicates.0 += 1;
        }
    }
    for record in sales {
        let entry = by_code.entry(record.code).or_default();
        if entry.sales.replace(record).is_some() {
            duplicates.1 += 1;
        }
    }

    if duplicates != (0, 0) {
        log::debug!(
            "duplicate codes overwritten: {} inventory, {} sales (last occurrence kept)",
            duplicates.0,
            duplicates.1
        );
    }

    by_code
        .into_iter()
        .map(|(code, sides)| ReconciledItem {
            code,
            description: resolve_description(sides.sales, sides.inventory),
            stock_on_hand: sides.inventory.map_or(0.0, |r| r.stock_on_hand),
            units_sold: sides.sales.and_then(|r| r.units_sold).unwrap_or(0.0),
            revenue: sides.sales.and_then(|r| r.revenue).unwrap_or(0.0),
        })
        .collect()
}

/// Sales description, else inventory description, else the sentinel.
fn resolve_description(sales: Option<&SalesRecord>, inventory: Option<&InventoryRecord>) -> String {
    let non_empty = |d: &Option<String>| {
        d.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    sales
        .and_then(|r| non_empty(&r.description))
        .or_else(|| inventory.and_then(|r| non_empty(&r.description)))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}
