//! Text and CSV renderings of classified items.
//!
//! The fixed-width tables feed both terminal output and the narrative
//! prompt, so their layout is part of the prompt contract.

use std::io::Write;

use shelfcheck_core::numeric::format_number;
use unicode_width::UnicodeWidthStr;

use crate::model::{ClassifiedItem, Dashboard};

const DESCRIPTION_WIDTH: usize = 32;

/// Column order of the CSV item table.
pub const CSV_COLUMNS: [&str; 9] = [
    "code",
    "description",
    "stock_on_hand",
    "units_sold",
    "revenue",
    "cumulative_revenue",
    "revenue_share",
    "tier",
    "is_phantom_stock",
];

/// Render up to `limit` items as a fixed-width table with a header line.
pub fn render_fixed_width(items: &[ClassifiedItem], limit: usize) -> String {
    let rows: Vec<[String; 7]> = items
        .iter()
        .take(limit)
        .map(|i| {
            [
                i.code.to_string(),
                i.description.clone(),
                format_number(i.stock_on_hand),
                format_number(i.units_sold),
                format!("{:.2}", i.revenue),
                format!("{:.1}%", i.revenue_share * 100.0),
                i.tier.to_string(),
            ]
        })
        .collect();

    let header = ["Code", "Description", "Stock", "Sold", "Revenue", "Share", "Tier"];
    let mut widths: [usize; 7] = header.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(display_width(cell));
        }
    }
    widths[1] = widths[1].min(DESCRIPTION_WIDTH);

    let mut out = String::new();
    push_line(&mut out, &header.map(String::from), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(col, (cell, &w))| {
            // Description left-aligned, everything else right-aligned
            if col == 1 {
                pad_right(cell, w)
            } else {
                pad_left(cell, w)
            }
        })
        .collect();
    out.push_str(parts.join("  ").trim_end());
    out.push('\n');
}

/// Bounded plain-text summary of both derived views, for the narrative
/// prompt. Each view contributes at most `limit` rows.
pub fn narrative_summary(dashboard: &Dashboard, limit: usize) -> String {
    let mut out = String::new();
    let s = &dashboard.summary;

    out.push_str(&format!(
        "Items analysed: {}. Phantom stock: {}. Critical stockout: {}.\n\n",
        s.total_items, s.phantom_stock_count, s.critical_stockout_count
    ));

    push_view(&mut out, "PHANTOM STOCK (stock on hand, no sales)", &dashboard.phantom_stock, limit);
    out.push('\n');
    push_view(&mut out, "CRITICAL STOCKOUT (tier A, zero stock)", &dashboard.critical_stockout, limit);
    out
}

fn push_view(out: &mut String, title: &str, items: &[ClassifiedItem], limit: usize) {
    let shown = items.len().min(limit);
    out.push_str(&format!("{title}: showing {shown} of {}\n", items.len()));
    if items.is_empty() {
        out.push_str("(none)\n");
    } else {
        out.push_str(&render_fixed_width(items, limit));
    }
}

/// Write the item table as CSV with [`CSV_COLUMNS`] as header.
pub fn write_csv<W: Write>(items: &[ClassifiedItem], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_COLUMNS)?;
    for i in items {
        wtr.write_record([
            i.code.to_string(),
            i.description.clone(),
            format_number(i.stock_on_hand),
            format_number(i.units_sold),
            i.revenue.to_string(),
            i.cumulative_revenue.to_string(),
            i.revenue_share.to_string(),
            i.tier.to_string(),
            i.is_phantom_stock.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

// ── Width helpers ───────────────────────────────────────────────────

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return ".".repeat(width);
    }

    // Walk chars, accumulating display width, stop at width - 2 to leave room for ".."
    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate a string to exactly `width` display columns, left-aligned.
fn pad_right(s: &str, width: usize) -> String {
    let t = truncate_display(s, width);
    let tw = display_width(&t);
    format!("{}{}", t, " ".repeat(width.saturating_sub(tw)))
}

/// Right-aligned counterpart of [`pad_right`].
fn pad_left(s: &str, width: usize) -> String {
    let t = truncate_display(s, width);
    let tw = display_width(&t);
    format!("{}{}", " ".repeat(width.saturating_sub(tw)), t)
}
