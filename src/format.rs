//! Display Formatting
//!
//! Amounts and dates as the back-office shows them. Values come from the
//! server already computed; nothing here does arithmetic on money beyond
//! rounding for display.

use chrono::{DateTime, NaiveDate};

/// `₹ 1,23,456.50` (Indian digit grouping, two decimals)
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = group_indian(&(paise / 100).to_string());
    format!("{sign}₹ {rupees}.{:02}", paise % 100)
}

/// Last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// `2024-03-05` or `2024-03-05T10:00:00Z` → `05/03/2024`; anything else is
/// shown unchanged.
pub fn format_date(raw: &str) -> String {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// RFC 3339 timestamp → `05/03/2024 14:30` (UTC)
pub fn format_datetime(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.naive_utc().format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => format_date(raw),
    }
}

pub fn format_optional_date(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Today's local date as `YYYY-MM-DD`, read from the browser clock
pub fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Human label for a backend status code such as `in_transit`
pub fn status_label(status: &str) -> String {
    let spaced = status.replace(['_', '-'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_indian_grouping() {
        assert_eq!(format_amount(0.0), "₹ 0.00");
        assert_eq!(format_amount(999.5), "₹ 999.50");
        assert_eq!(format_amount(1000.0), "₹ 1,000.00");
        assert_eq!(format_amount(123456.5), "₹ 1,23,456.50");
        assert_eq!(format_amount(12345678.999), "₹ 1,23,45,679.00");
        assert_eq!(format_amount(-2500.0), "-₹ 2,500.00");
    }

    #[test]
    fn dates_render_day_first() {
        assert_eq!(format_date("2024-03-05"), "05/03/2024");
        assert_eq!(format_date("2024-03-05T23:10:00.000Z"), "05/03/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_optional_date(None), "-");
        assert_eq!(format_datetime("2024-03-05T14:30:00Z"), "05/03/2024 14:30");
        assert_eq!(format_datetime("2024-03-05"), "05/03/2024");
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label("in_transit"), "In transit");
        assert_eq!(status_label("arrived"), "Arrived");
        assert_eq!(status_label(""), "Unknown");
    }
}
