#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Stateless chart builders.
//!
//! Each builder turns one aggregate into a serializable description —
//! a [`ChartSpec`] for trend/bar charts or a [`MapLayerSpec`] for
//! heatmap layers. The core has no dependency on chart libraries, color
//! scales, or map providers; rendering is the frontend's job. Builders
//! are total: an empty aggregate produces a chart with an empty series,
//! which is the user-visible "no data" state.

use std::collections::BTreeMap;

use crime_dash_models::{DistrictCount, Era, GeoPoint, Weekday};
use serde::{Deserialize, Serialize};

/// Default map center and zoom over Chicago.
pub const CHICAGO_VIEW: ViewState = ViewState {
    latitude: 41.88,
    longitude: -87.63,
    zoom: 9,
};

/// Visual family a chart should be rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Line with markers.
    Line,
    /// Vertical bars.
    Bar,
}

/// One labeled value of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Category label on the x axis.
    pub label: String,
    /// Value on the y axis.
    pub value: u64,
}

/// A renderable chart description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    /// Visual family.
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// X axis title.
    pub x_title: String,
    /// Y axis title.
    pub y_title: String,
    /// Ordered series points.
    pub points: Vec<SeriesPoint>,
}

/// Initial camera position of a map layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Zoom level.
    pub zoom: u8,
}

/// A renderable heatmap layer description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayerSpec {
    /// Layer title.
    pub title: String,
    /// Initial camera position.
    pub view: ViewState,
    /// Heatmap points.
    pub points: Vec<GeoPoint>,
}

/// Line chart of incident counts per year.
#[must_use]
pub fn yearly_trend(counts: &BTreeMap<i32, u64>, start_year: i32, end_year: i32) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        title: format!("Number of Crimes by Year ({start_year} - {end_year})"),
        x_title: "Year".to_owned(),
        y_title: "Number of Crimes".to_owned(),
        points: counts
            .iter()
            .map(|(year, count)| SeriesPoint {
                label: year.to_string(),
                value: *count,
            })
            .collect(),
    }
}

/// Bar chart of incident counts per hour of day.
#[must_use]
pub fn hourly_trend(counts: &[u64; 24], start_year: i32, end_year: i32) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!("Number of Crimes by Hour of Day ({start_year} - {end_year})"),
        x_title: "Hour of Day".to_owned(),
        y_title: "Number of Crimes".to_owned(),
        points: counts
            .iter()
            .enumerate()
            .map(|(hour, count)| SeriesPoint {
                label: hour.to_string(),
                value: *count,
            })
            .collect(),
    }
}

/// Bar chart of incident counts per weekday, Monday first.
#[must_use]
pub fn weekday_trend(counts: &[(Weekday, u64); 7], start_year: i32, end_year: i32) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!("Number of Crimes by Weekday ({start_year} - {end_year})"),
        x_title: "Weekday".to_owned(),
        y_title: "Number of Crimes".to_owned(),
        points: counts
            .iter()
            .map(|(day, count)| SeriesPoint {
                label: day.to_string(),
                value: *count,
            })
            .collect(),
    }
}

/// Horizontal ranking of the highest-crime districts.
#[must_use]
pub fn district_ranking(ranked: &[DistrictCount], start_year: i32, end_year: i32) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!(
            "Top {} High-Crime Districts ({start_year} - {end_year})",
            ranked.len()
        ),
        x_title: "District".to_owned(),
        y_title: "Number of Crimes".to_owned(),
        points: ranked
            .iter()
            .map(|entry| SeriesPoint {
                label: entry.label.clone(),
                value: entry.count,
            })
            .collect(),
    }
}

/// Heatmap layer of the bounded spatial sample.
#[must_use]
pub fn spatial_heatmap(points: Vec<GeoPoint>, start_year: i32, end_year: i32) -> MapLayerSpec {
    MapLayerSpec {
        title: format!("Crimes Spatial Distribution ({start_year} - {end_year})"),
        view: CHICAGO_VIEW,
        points,
    }
}

/// Heatmap layer of one era's hotspots.
#[must_use]
pub fn era_heatmap(points: Vec<GeoPoint>, era: Era) -> MapLayerSpec {
    MapLayerSpec {
        title: format!("Crime Hotspots: {}", era.label()),
        view: CHICAGO_VIEW,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yearly_trend_orders_points_by_year() {
        let counts = BTreeMap::from([(2021, 5), (2017, 3)]);
        let chart = yearly_trend(&counts, 2016, 2025);

        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.title, "Number of Crimes by Year (2016 - 2025)");
        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["2017", "2021"]);
    }

    #[test]
    fn hourly_trend_has_24_points() {
        let chart = hourly_trend(&[0; 24], 2016, 2025);
        assert_eq!(chart.points.len(), 24);
        assert_eq!(chart.points[0].label, "0");
        assert_eq!(chart.points[23].label, "23");
    }

    #[test]
    fn weekday_trend_labels_full_names_in_order() {
        let counts = Weekday::ALL.map(|day| (day, 1_u64));
        let chart = weekday_trend(&counts, 2016, 2025);

        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
    }

    #[test]
    fn empty_aggregates_build_no_data_charts() {
        let chart = yearly_trend(&BTreeMap::new(), 2016, 2025);
        assert!(chart.points.is_empty());

        let layer = spatial_heatmap(Vec::new(), 2016, 2025);
        assert!(layer.points.is_empty());
    }

    #[test]
    fn era_heatmap_uses_chicago_view_and_era_label() {
        let layer = era_heatmap(Vec::new(), Era::ModernEra);
        assert_eq!(layer.title, "Crime Hotspots: Modern Era (2019-2024)");
        assert!((layer.view.latitude - 41.88).abs() < f64::EPSILON);
        assert_eq!(layer.view.zoom, 9);
    }

    #[test]
    fn chart_spec_serializes_camel_case() {
        let chart = hourly_trend(&[0; 24], 2016, 2025);
        let json = serde_json::to_value(&chart).unwrap();
        assert!(json.get("xTitle").is_some());
        assert_eq!(json["kind"], "bar");
    }
}
