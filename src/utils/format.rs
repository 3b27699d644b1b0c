//! Numeric formatting for report values.
//!
//! All formatting is locale-independent: thousands are grouped with commas
//! and decimals use a period. Missing values render as "N/A" everywhere.

/// Placeholder for NULL values.
const NOT_AVAILABLE: &str = "N/A";

/// Group an integer with comma thousands separators.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an optional count with thousands separators, or "N/A".
pub fn format_opt_count(value: Option<i64>) -> String {
    value.map(group_thousands).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Format a dose total scaled to billions with one decimal, e.g.
/// 2_500_000_000 renders as "2.5 Billion".
pub fn format_billions(value: Option<i64>) -> String {
    match value {
        Some(v) => format!("{:.1} Billion", v as f64 / 1_000_000_000.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a coverage percentage with one decimal, e.g. "95.0%".
pub fn format_coverage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format an infection rate (cases per 100,000) with four decimals.
pub fn format_rate(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}
