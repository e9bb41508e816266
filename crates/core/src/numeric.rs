//! Null-safe numeric coercion for loosely typed export cells.

/// Parse a text field as a number.
///
/// Accepts anything `f64::from_str` accepts after trimming. When that fails
/// and the field holds exactly one comma, no dot, and one or two digits after
/// the comma, the comma is read as the decimal separator (`"12,50"` -> `12.5`).
/// A comma followed by three digits (`"1,234"`) is ambiguous with a thousands
/// separator and is rejected. Non-finite results are rejected.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(n) = s.parse::<f64>() {
        return n.is_finite().then_some(n);
    }

    if let Some((int, frac)) = s.split_once(',') {
        let decimal_comma = !s.contains('.')
            && (1..=2).contains(&frac.len())
            && frac.bytes().all(|b| b.is_ascii_digit());
        if decimal_comma {
            if let Ok(n) = format!("{int}.{frac}").parse::<f64>() {
                return n.is_finite().then_some(n);
            }
        }
    }

    None
}

/// Format a number the way spreadsheets display it: integers without decimals.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
