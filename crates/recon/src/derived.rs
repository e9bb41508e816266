//! Derived views: filters over the classified set, plus the dashboard
//! that bundles them with summary counts.

use crate::model::{ClassifiedItem, Dashboard, DashboardMeta, DashboardSummary, TierCounts};

/// Items flagged as dead stock, in curve order.
pub fn phantom_stock_view(items: &[ClassifiedItem]) -> Vec<ClassifiedItem> {
    items.iter().filter(|i| i.is_phantom_stock).cloned().collect()
}

/// Tier-A items at zero stock, in curve order.
pub fn critical_stockout_view(items: &[ClassifiedItem]) -> Vec<ClassifiedItem> {
    items.iter().filter(|i| i.is_critical_stockout()).cloned().collect()
}

/// Assemble the rendering-layer output for one run.
pub fn build_dashboard(items: Vec<ClassifiedItem>, meta: DashboardMeta) -> Dashboard {
    let phantom_stock = phantom_stock_view(&items);
    let critical_stockout = critical_stockout_view(&items);

    let mut tier_counts = TierCounts::default();
    for item in &items {
        tier_counts.bump(item.tier);
    }

    let summary = DashboardSummary {
        total_items: items.len(),
        phantom_stock_count: phantom_stock.len(),
        critical_stockout_count: critical_stockout.len(),
        total_revenue: items.iter().fold(0.0, |acc, i| acc + i.revenue),
        tier_counts,
    };

    Dashboard {
        meta,
        summary,
        items,
        phantom_stock,
        critical_stockout,
    }
}
