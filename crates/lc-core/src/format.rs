//! Display helpers shared by the tables.

use lc_api_types::{parse_date, Amount};

/// Shown in a cell whose value is missing.
pub const PLACEHOLDER: &str = "-";

/// `dd/mm/yyyy`, or the raw text when it is not a recognisable date.
pub fn display_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None if raw.trim().is_empty() => PLACEHOLDER.to_string(),
        None => raw.to_string(),
    }
}

/// Amount prefixed with the rupee sign.
pub fn rupees(amount: &Amount) -> String {
    if amount.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        format!("\u{20B9}{amount}")
    }
}

pub fn or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
