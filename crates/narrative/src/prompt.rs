use shelfcheck_recon::model::Dashboard;
use shelfcheck_recon::report::narrative_summary;

const PREAMBLE: &str = "You are a retail inventory analyst. Below is a reconciliation of a \
store's last 30 days of sales against its current stock, with items ranked on an \
A/B/C/D revenue curve (A = top 50% of revenue).

Write a short, practical action plan for the store manager:
1. Which phantom-stock items (stock on hand, no sales) to promote, bundle or stop buying.
2. Which critical-stockout items (tier A, zero stock) to reorder first.
3. Any pattern worth a closer look.

Keep it under 300 words. Refer to items by code and description.";

/// Instructional preamble followed by the first `preview_rows` items of each
/// derived view.
pub fn build_prompt(dashboard: &Dashboard, preview_rows: usize) -> String {
    let mut prompt = String::from(PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(&narrative_summary(dashboard, preview_rows));
    prompt
}
