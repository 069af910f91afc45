//! Spatial views: the bounded random geo-sample and era subsets.

use crime_dash_models::{Era, GeoPoint, IncidentRecord};

use crate::sample::SampleRng;

/// Draws a reproducible random sample of geographic points.
///
/// Records missing either coordinate are excluded before sampling.
/// Sampling is without replacement via a partial Fisher-Yates shuffle;
/// the result length is `min(size, eligible records)` and is identical
/// across runs for the same seed and input.
#[must_use]
pub fn geo_sample(records: &[IncidentRecord], size: usize, seed: u64) -> Vec<GeoPoint> {
    let mut points: Vec<GeoPoint> = records
        .iter()
        .filter_map(IncidentRecord::coordinates)
        .map(|(latitude, longitude)| GeoPoint {
            latitude,
            longitude,
        })
        .collect();

    if points.len() <= size {
        return points;
    }

    let mut rng = SampleRng::new(seed);
    for i in 0..size {
        let j = i + rng.next_below(points.len() - i);
        points.swap(i, j);
    }
    points.truncate(size);

    log::debug!("Sampled {} of eligible geo points", points.len());
    points
}

/// Geographic points of records whose year falls inside `era`.
///
/// Rows with a missing date or coordinates are excluded.
#[must_use]
pub fn era_points(records: &[IncidentRecord], era: Era) -> Vec<GeoPoint> {
    records
        .iter()
        .filter(|record| record.date.year().is_some_and(|year| era.contains(year)))
        .filter_map(IncidentRecord::coordinates)
        .map(|(latitude, longitude)| GeoPoint {
            latitude,
            longitude,
        })
        .collect()
}
