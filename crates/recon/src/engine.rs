use shelfcheck_core::RawTable;

use crate::classify::classify;
use crate::config::ShelfConfig;
use crate::derived::build_dashboard;
use crate::error::ReconError;
use crate::model::{Dashboard, DashboardMeta};
use crate::normalize::{normalize_inventory, normalize_sales};
use crate::reconcile::reconcile;

/// Run the whole pipeline on two decoded tables: normalize, reconcile,
/// classify. Fails fast; there is no partial dashboard.
pub fn run(sales: &RawTable, inventory: &RawTable, config: &ShelfConfig) -> Result<Dashboard, ReconError> {
    let sales_records = normalize_sales(sales, &config.sales.headers)?;
    let inventory_records = normalize_inventory(inventory)?;

    let reconciled = reconcile(&inventory_records, &sales_records);
    log::info!(
        "reconciled {} sales and {} inventory record(s) into {} item(s)",
        sales_records.len(),
        inventory_records.len(),
        reconciled.len()
    );

    let classified = classify(reconciled, &config.tiers, &config.phantom);

    Ok(build_dashboard(
        classified,
        DashboardMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            sales_records: sales_records.len(),
            inventory_records: inventory_records.len(),
        },
    ))
}
