//! Display formatting shared by the page renderers.

use chrono::{DateTime, Local, NaiveDateTime};

pub const MISSING: &str = "—";

pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => MISSING.to_string(),
    }
}

pub fn format_pct(pct: f64) -> String {
    format!("{pct:+.2}%")
}

/// Backend timestamps are ISO-8601, with or without an offset. Anything
/// unparseable is shown as received.
pub fn format_ts(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_and_pct() {
        assert_eq!(format_price(Some(110.0)), "110.00");
        assert_eq!(format_price(None), "—");
        assert_eq!(format_price(Some(f64::NAN)), "—");
        assert_eq!(format_pct(10.0), "+10.00%");
        assert_eq!(format_pct(-2.5), "-2.50%");
    }

    #[test]
    fn naive_timestamp() {
        assert_eq!(format_ts("2024-05-01T12:30:00"), "2024-05-01 12:30:00");
        assert_eq!(format_ts("2024-05-01T12:30:00.123456"), "2024-05-01 12:30:00");
        assert_eq!(format_ts("yesterday"), "yesterday");
    }
}
