//! Ranked per-district incident counts.

use std::collections::BTreeMap;

use crime_dash_models::{DistrictCount, IncidentRecord};

/// Ranks districts by incident count within an inclusive year range.
///
/// Rows lacking a district or a parsed date are omitted rather than
/// grouped under a placeholder. Returns at most `top_n` entries sorted
/// by descending count; equal counts keep ascending district-number
/// order (counts are accumulated in a `BTreeMap` and the sort is
/// stable), so the ranking is deterministic for a given input.
/// Districts absent from `labels` fall back to their number as the
/// label.
#[must_use]
pub fn top_districts(
    records: &[IncidentRecord],
    start_year: i32,
    end_year: i32,
    top_n: usize,
    labels: &BTreeMap<u32, String>,
) -> Vec<DistrictCount> {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();

    for record in records {
        let Some(year) = record.date.year() else {
            continue;
        };
        if year < start_year || year > end_year {
            continue;
        }
        let Some(district) = record.district else {
            continue;
        };
        *counts.entry(district).or_insert(0) += 1;
    }

    let mut ranked: Vec<(u32, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(district, count)| DistrictCount {
            district,
            count,
            label: labels
                .get(&district)
                .cloned()
                .unwrap_or_else(|| district.to_string()),
        })
        .collect()
}
