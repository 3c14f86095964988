//! French display formats shared by tables, cards and detail pages.

use chrono::{DateTime, NaiveDate};

const GROUP_SEPARATOR: char = '\u{202f}';

/// `1234567.4` → `1 234 567 FCFA`.
#[allow(clippy::cast_possible_truncation)]
pub fn fmt_money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped}\u{a0}FCFA")
}

/// ISO date or timestamp → `dd/mm/yyyy`; anything else is shown as received.
pub fn fmt_date(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return datetime.format("%d/%m/%Y").to_string();
    }
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_or_else(|_| value.to_string(), |date| date.format("%d/%m/%Y").to_string())
}

/// Percentage clamped to `0..=100`; missing or NaN counts as zero.
pub fn to_pct(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

pub fn fmt_percent(pct: f64) -> String {
    let rounded = (pct * 100.0).round() / 100.0;
    format!("{rounded}%")
}
