//! Display formatting for counts, rupee amounts and chart labels.

use chrono::NaiveDate;

/// Placeholder for metrics that have no defined value (e.g. CPL with zero
/// leads). Rendered instead of a misleading zero or NaN.
pub const EM_DASH: &str = "—";

/// Group an integer with Indian-system separators: `123456` → `1,23,456`.
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let grouped = group_indian(&digits);
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Headline rupee amount, rounded to the nearest whole unit: `₹1,23,456`.
pub fn format_rupees(amount: f64) -> String {
    format!("₹{}", format_count(amount.round() as i64))
}

/// Per-unit rate (CPC/CPL) and CSV monetary cells: two decimal places.
pub fn format_rate(amount: f64) -> String {
    format!("₹{amount:.2}")
}

/// Chart axis label, e.g. `1 Jan 2024`.
pub fn display_label(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    // Last three digits form one group, the rest is grouped in pairs.
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs: Vec<&str> = Vec::new();
    let mut idx = head.len();
    while idx > 2 {
        pairs.push(&head[idx - 2..idx]);
        idx -= 2;
    }
    pairs.push(&head[..idx]);
    pairs.reverse();
    format!("{},{}", pairs.join(","), tail)
}
