//! Temporal grouping: counts by year, hour of day, and weekday.
//!
//! Rows with a missing date are omitted from every temporal count.
//! Where the key domain is statically known (24 hours, 7 weekdays) the
//! result always carries the complete domain, zero-filled.

use std::collections::BTreeMap;

use crime_dash_models::{IncidentRecord, Weekday};

/// Counts incidents per calendar year, ordered by year.
#[must_use]
pub fn counts_by_year(records: &[IncidentRecord]) -> BTreeMap<i32, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let Some(year) = record.date.year() {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    counts
}

/// Counts incidents per hour of day. All 24 slots are always present.
#[must_use]
pub fn counts_by_hour(records: &[IncidentRecord]) -> [u64; 24] {
    let mut counts = [0_u64; 24];
    for record in records {
        if let Some(hour) = record.date.hour() {
            counts[hour as usize] += 1;
        }
    }
    counts
}

/// Counts incidents per weekday, always returning all seven days in
/// Monday..Sunday order regardless of input order or missing days.
#[must_use]
pub fn counts_by_weekday(records: &[IncidentRecord]) -> [(Weekday, u64); 7] {
    let mut counts = Weekday::ALL.map(|day| (day, 0_u64));
    for record in records {
        if let Some(day) = record.date.weekday() {
            counts[day.index()].1 += 1;
        }
    }
    counts
}
