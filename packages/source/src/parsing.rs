//! Field-level parsers shared by the CSV row decoder.
//!
//! Every parser here is coercing: a value that cannot be parsed becomes
//! `None` (or [`DateField::Missing`]) instead of an error, so one
//! malformed row never aborts a multi-million-row load.

use chrono::NaiveDateTime;
use crime_dash_models::DateField;

/// Parses a Socrata datetime literal into a typed [`DateField`].
///
/// Accepts ISO 8601 with or without fractional seconds, plus the
/// `MM/DD/YYYY hh:mm:ss AM` form used by portal CSV exports. Anything
/// else coerces to [`DateField::Missing`].
#[must_use]
pub fn parse_date_field(s: &str) -> DateField {
    let s = s.trim();
    if s.is_empty() {
        return DateField::Missing;
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return DateField::Parsed(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return DateField::Parsed(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%m/%d/%Y %I:%M:%S %p") {
        return DateField::Parsed(naive);
    }
    DateField::Missing
}

/// Parses an administrative region identifier (beat, district, ward,
/// community area).
///
/// The source emits these as floats (`"11.0"`), so integer parsing
/// falls back to float parsing. Returns `None` for missing, negative,
/// or unparseable values.
#[must_use]
pub fn parse_region_id(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let id = f as u32;
        Some(id)
    } else {
        None
    }
}

/// Parses a coordinate field. Returns `None` if missing or unparseable.
#[must_use]
pub fn parse_coordinate(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parses a boolean flag field (`true`/`false`, `Y`/`N`).
#[must_use]
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "True" | "TRUE" | "Y" | "y" => Some(true),
        "false" | "False" | "FALSE" | "N" | "n" => Some(false),
        _ => None,
    }
}
