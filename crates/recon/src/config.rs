use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::model::Tier;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every section is optional; an empty file is the
/// default configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub tiers: TierBreakpoints,
    #[serde(default)]
    pub phantom: PhantomConfig,
    #[serde(default)]
    pub sales: SalesConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Upper bounds (inclusive) of cumulative revenue share for tiers A, B, C.
/// Anything above `c` is tier D.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TierBreakpoints {
    #[serde(default = "default_tier_a")]
    pub a: f64,
    #[serde(default = "default_tier_b")]
    pub b: f64,
    #[serde(default = "default_tier_c")]
    pub c: f64,
}

fn default_tier_a() -> f64 {
    0.50
}

fn default_tier_b() -> f64 {
    0.80
}

fn default_tier_c() -> f64 {
    0.95
}

impl Default for TierBreakpoints {
    fn default() -> Self {
        Self {
            a: default_tier_a(),
            b: default_tier_b(),
            c: default_tier_c(),
        }
    }
}

impl TierBreakpoints {
    /// Tier for a cumulative revenue share. Boundaries are inclusive.
    pub fn tier_for(&self, share: f64) -> Tier {
        if share <= self.a {
            Tier::A
        } else if share <= self.b {
            Tier::B
        } else if share <= self.c {
            Tier::C
        } else {
            Tier::D
        }
    }
}

/// Dead-stock rule: more than `min_stock` units on hand and nothing sold.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PhantomConfig {
    #[serde(default = "default_min_stock")]
    pub min_stock: f64,
}

fn default_min_stock() -> f64 {
    5.0
}

impl Default for PhantomConfig {
    fn default() -> Self {
        Self { min_stock: default_min_stock() }
    }
}

// ---------------------------------------------------------------------------
// Sales header labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SalesConfig {
    #[serde(default)]
    pub headers: SalesHeaders,
}

/// Accepted source labels per canonical sales field, in priority order.
///
/// Exporter versions disagree on labels, so each field carries a list.
/// Matching ignores case and collapses whitespace (a header cell holding
/// `Qtde\r\nCupom` matches the label `Qtde Cupom`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SalesHeaders {
    #[serde(default = "default_code_labels")]
    pub code: Vec<String>,
    #[serde(default = "default_description_labels")]
    pub description: Vec<String>,
    #[serde(default = "default_units_sold_labels")]
    pub units_sold: Vec<String>,
    #[serde(default = "default_revenue_labels")]
    pub revenue: Vec<String>,
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_code_labels() -> Vec<String> {
    labels(&["Item de Estoque:", "Item de Estoque", "Codigo", "Código", "Cod", "Code"])
}

fn default_description_labels() -> Vec<String> {
    // The legacy exporter puts item names under the "Qtde\r\nCupom" header
    labels(&["Qtde\r\nCupom", "Descricao", "Descrição", "Produto", "Description"])
}

fn default_units_sold_labels() -> Vec<String> {
    labels(&["Qtde. Venda", "Qtde Venda", "Quantidade", "Qtd Vendida", "Units Sold"])
}

fn default_revenue_labels() -> Vec<String> {
    labels(&["Valor Venda", "Faturamento", "Total Venda", "Total", "Revenue"])
}

impl Default for SalesHeaders {
    fn default() -> Self {
        Self {
            code: default_code_labels(),
            description: default_description_labels(),
            units_sold: default_units_sold_labels(),
            revenue: default_revenue_labels(),
        }
    }
}

// ---------------------------------------------------------------------------
// Narrative service
// ---------------------------------------------------------------------------

/// Narrative-generation settings. The API key never lives here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NarrativeConfig {
    /// Model identifiers, tried in order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause after a rate-limited candidate before trying the next one.
    #[serde(default = "default_rate_limit_pause_secs")]
    pub rate_limit_pause_secs: u64,
    /// Rows of each derived view embedded in the prompt.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_candidates() -> Vec<String> {
    labels(&["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"])
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_rate_limit_pause_secs() -> u64 {
    2
}

fn default_preview_rows() -> usize {
    10
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            rate_limit_pause_secs: default_rate_limit_pause_secs(),
            preview_rows: default_preview_rows(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ShelfConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ShelfConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let TierBreakpoints { a, b, c } = self.tiers;
        if !(a > 0.0 && a < b && b < c && c <= 1.0) {
            return Err(ReconError::ConfigValidation(format!(
                "tier breakpoints must satisfy 0 < a < b < c <= 1, got a={a}, b={b}, c={c}"
            )));
        }

        if !self.phantom.min_stock.is_finite() || self.phantom.min_stock < 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "phantom.min_stock must be a non-negative number, got {}",
                self.phantom.min_stock
            )));
        }

        let h = &self.sales.headers;
        for (field, list) in [
            ("code", &h.code),
            ("description", &h.description),
            ("units_sold", &h.units_sold),
            ("revenue", &h.revenue),
        ] {
            if list.iter().all(|l| l.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "sales.headers.{field} needs at least one label"
                )));
            }
        }

        let n = &self.narrative;
        if n.candidates.iter().all(|c| c.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(
                "narrative.candidates needs at least one model".into(),
            ));
        }
        if n.timeout_secs == 0 {
            return Err(ReconError::ConfigValidation(
                "narrative.timeout_secs must be at least 1".into(),
            ));
        }
        if n.preview_rows == 0 {
            return Err(ReconError::ConfigValidation(
                "narrative.preview_rows must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
