//! Small shared helpers: tolerant timestamp parsing and the money/rating
//! rounding rules used across the domain services.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Current time as an RFC 3339 string with millisecond precision, the format
/// every record's timestamps use on disk.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp into epoch milliseconds. Accepts full RFC 3339
/// strings and bare `YYYY-MM-DD` dates; anything else is `None`. Sorting code
/// treats `None` as epoch zero, so records with junk dates sink predictably.
pub fn parse_millis(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}

pub fn opt_millis(s: Option<&str>) -> Option<i64> {
    s.and_then(parse_millis)
}

pub fn millis_to_iso(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Round to 2 decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Non-negative amount rounded to cents.
pub fn to_money(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    round2(v).max(0.0)
}

/// Customer rating: rounded to one decimal, then clamped to [0, 5].
pub fn clamp_rating(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let r = (v * 10.0).round() / 10.0;
    r.clamp(0.0, 5.0)
}

/// Feedback aspect rating: whole stars in [1, 5], or `None` when the input
/// is not a usable number.
pub fn clamp_stars(v: Option<f64>) -> Option<u8> {
    let n = v?;
    if !n.is_finite() {
        return None;
    }
    Some((n.round() as i64).clamp(1, 5) as u8)
}
