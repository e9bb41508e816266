use crate::config::{PhantomConfig, TierBreakpoints};
use crate::model::{ClassifiedItem, ReconciledItem};

/// Place every item on the revenue curve and flag dead stock.
///
/// Items are ordered by revenue, highest first. The sort is stable, so
/// equal revenues keep their reconciled order (ascending code). The total is
/// accumulated in that same order, which makes the last share exactly 1.0
/// whenever total revenue is positive.
///
/// With zero total revenue every share is 0 and every item lands in tier A.
pub fn classify(
    mut items: Vec<ReconciledItem>,
    tiers: &TierBreakpoints,
    phantom: &PhantomConfig,
) -> Vec<ClassifiedItem> {
    items.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

    let total = items.iter().fold(0.0_f64, |acc, item| acc + item.revenue);
    if total == 0.0 && !items.is_empty() {
        log::warn!(
            "total revenue is zero: all {} item(s) get share 0 and land in tier A",
            items.len()
        );
    }

    let mut cumulative = 0.0_f64;
    items
        .into_iter()
        .map(|item| {
            cumulative += item.revenue;
            let revenue_share = if total == 0.0 { 0.0 } else { cumulative / total };
            ClassifiedItem {
                tier: tiers.tier_for(revenue_share),
                is_phantom_stock: is_phantom_stock(item.stock_on_hand, item.units_sold, phantom),
                cumulative_revenue: cumulative,
                revenue_share,
                code: item.code,
                description: item.description,
                stock_on_hand: item.stock_on_hand,
                units_sold: item.units_sold,
                revenue: item.revenue,
            }
        })
        .collect()
}

/// Stock above the threshold (strictly) with no recorded sales.
pub fn is_phantom_stock(stock_on_hand: f64, units_sold: f64, phantom: &PhantomConfig) -> bool {
    stock_on_hand > phantom.min_stock && units_sold == 0.0
}
