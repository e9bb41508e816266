use serde::Serialize;
use shelfcheck_core::ProductCode;

/// Description used when neither source names the item.
pub const NO_DESCRIPTION: &str = "Item without description";

// ---------------------------------------------------------------------------
// Normalized input
// ---------------------------------------------------------------------------

/// One row of the sales report after header mapping.
///
/// `None` numeric fields mean the column was absent from the export;
/// defaulting to zero is the reconciler's job.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub code: ProductCode,
    pub description: Option<String>,
    pub units_sold: Option<f64>,
    pub revenue: Option<f64>,
}

/// One row of the inventory report after positional mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub code: ProductCode,
    pub description: Option<String>,
    pub stock_on_hand: f64,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledItem {
    pub code: ProductCode,
    pub description: String,
    pub stock_on_hand: f64,
    pub units_sold: f64,
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Revenue curve tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
        }
    }
}

/// A reconciled item plus its position on the revenue curve and the
/// dead-stock flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedItem {
    pub code: ProductCode,
    pub description: String,
    pub stock_on_hand: f64,
    pub units_sold: f64,
    pub revenue: f64,
    pub cumulative_revenue: f64,
    pub revenue_share: f64,
    pub tier: Tier,
    pub is_phantom_stock: bool,
}

impl ClassifiedItem {
    /// Top-tier item with nothing on the shelf.
    pub fn is_critical_stockout(&self) -> bool {
        self.tier == Tier::A && self.stock_on_hand == 0.0
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierCounts {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
}

impl TierCounts {
    pub fn bump(&mut self, tier: Tier) {
        match tier {
            Tier::A => self.a += 1,
            Tier::B => self.b += 1,
            Tier::C => self.c += 1,
            Tier::D => self.d += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub phantom_stock_count: usize,
    pub critical_stockout_count: usize,
    pub total_revenue: f64,
    pub tier_counts: TierCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMeta {
    pub engine_version: String,
    pub run_at: String,
    /// Sales rows that survived code coercion.
    pub sales_records: usize,
    /// Inventory rows that survived code coercion.
    pub inventory_records: usize,
}

/// Everything the rendering layer needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub meta: DashboardMeta,
    pub summary: DashboardSummary,
    /// All items in revenue-curve order.
    pub items: Vec<ClassifiedItem>,
    pub phantom_stock: Vec<ClassifiedItem>,
    pub critical_stockout: Vec<ClassifiedItem>,
}
