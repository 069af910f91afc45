#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Domain types shared across the crime dashboard core.
//!
//! Defines the canonical [`IncidentRecord`] produced by the retrieval
//! pipeline, the typed per-row [`DateField`], bounded categorical types
//! ([`Weekday`], [`Era`]), and the small result shapes the aggregation
//! layer hands to the presentation layer.

use chrono::{Datelike as _, NaiveDateTime, Timelike as _};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Result of parsing one row's date field.
///
/// A row whose date cannot be parsed is kept with [`DateField::Missing`]
/// rather than dropped or given a sentinel value, so downstream
/// aggregation can distinguish "zero observations" from "unparseable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    /// The date field parsed successfully.
    Parsed(NaiveDateTime),
    /// The date field was absent or unparseable.
    Missing,
}

impl DateField {
    /// Returns the parsed timestamp, if present.
    #[must_use]
    pub const fn as_datetime(self) -> Option<NaiveDateTime> {
        match self {
            Self::Parsed(dt) => Some(dt),
            Self::Missing => None,
        }
    }

    /// Calendar year of the timestamp, if parsed.
    #[must_use]
    pub fn year(self) -> Option<i32> {
        self.as_datetime().map(|dt| dt.year())
    }

    /// Calendar month (1-12) of the timestamp, if parsed.
    #[must_use]
    pub fn month(self) -> Option<u32> {
        self.as_datetime().map(|dt| dt.month())
    }

    /// Hour of day (0-23) of the timestamp, if parsed.
    #[must_use]
    pub fn hour(self) -> Option<u32> {
        self.as_datetime().map(|dt| dt.hour())
    }

    /// Day of week of the timestamp, if parsed.
    #[must_use]
    pub fn weekday(self) -> Option<Weekday> {
        self.as_datetime().map(|dt| Weekday::from(dt.weekday()))
    }
}

/// Day of the week with the fixed Monday-first presentation order.
///
/// `Ord` follows declaration order, so sorting by this type (or keying a
/// `BTreeMap` with it) always yields Monday through Sunday regardless of
/// the order records arrive in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// All seven days in presentation order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Position in the Monday-first week (0-6).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// One of the four fixed multi-year ranges used to compare spatial
/// hotspots across time. Ranges are non-overlapping by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Era {
    /// 2001-2006
    Early2000s,
    /// 2007-2012
    PostRecession,
    /// 2013-2018
    RecentPast,
    /// 2019-2024
    ModernEra,
}

impl Era {
    /// All four eras in chronological order.
    pub const ALL: [Self; 4] = [
        Self::Early2000s,
        Self::PostRecession,
        Self::RecentPast,
        Self::ModernEra,
    ];

    /// Inclusive `(start_year, end_year)` bounds of this era.
    #[must_use]
    pub const fn years(self) -> (i32, i32) {
        match self {
            Self::Early2000s => (2001, 2006),
            Self::PostRecession => (2007, 2012),
            Self::RecentPast => (2013, 2018),
            Self::ModernEra => (2019, 2024),
        }
    }

    /// Whether `year` falls inside this era.
    #[must_use]
    pub const fn contains(self, year: i32) -> bool {
        let (start, end) = self.years();
        start <= year && year <= end
    }

    /// Human-readable label for era selectors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Early2000s => "Early 2000s (2001-2006)",
            Self::PostRecession => "Post-Recession (2007-2012)",
            Self::RecentPast => "Recent Past (2013-2018)",
            Self::ModernEra => "Modern Era (2019-2024)",
        }
    }
}

/// One reported crime incident.
///
/// Every field except the date is optional: the remote source omits
/// columns freely and the reduced evolution schema carries only four of
/// them. The date field is always present structurally but may be
/// [`DateField::Missing`] for rows whose date could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Source record identifier.
    pub id: Option<String>,
    /// Police case number.
    pub case_number: Option<String>,
    /// When the incident occurred.
    pub date: DateField,
    /// Block-level address (e.g., "100XX W OHARE ST").
    pub block: Option<String>,
    /// Illinois Uniform Crime Reporting code.
    pub iucr: Option<String>,
    /// Primary crime classification (e.g., "THEFT").
    pub primary_type: Option<String>,
    /// Secondary description of the incident.
    pub description: Option<String>,
    /// Type of location (e.g., "STREET", "RESIDENCE").
    pub location_description: Option<String>,
    /// FBI crime classification code.
    pub fbi_code: Option<String>,
    /// Whether an arrest was made.
    pub arrest: Option<bool>,
    /// Whether this was a domestic incident.
    pub domestic: Option<bool>,
    /// Police beat number.
    pub beat: Option<u32>,
    /// Police district number.
    pub district: Option<u32>,
    /// City ward number.
    pub ward: Option<u32>,
    /// Community area number.
    pub community_area: Option<u32>,
    /// Latitude (WGS84).
    pub latitude: Option<f64>,
    /// Longitude (WGS84).
    pub longitude: Option<f64>,
}

impl IncidentRecord {
    /// An empty record with a missing date. Useful as a starting point
    /// when decoding partial schemas.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            id: None,
            case_number: None,
            date: DateField::Missing,
            block: None,
            iucr: None,
            primary_type: None,
            description: None,
            location_description: None,
            fbi_code: None,
            arrest: None,
            domestic: None,
            beat: None,
            district: None,
            ward: None,
            community_area: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Both coordinates, when jointly present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// A single geographic point for heatmap rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// One entry of the ranked-districts aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictCount {
    /// Police district number.
    pub district: u32,
    /// Number of incidents in the district over the queried window.
    pub count: u64,
    /// Human-readable district label, or the district number as a
    /// string when no label is configured.
    pub label: String,
}

/// Explicit lifecycle of one data load.
///
/// Distinguishes "not yet attempted" from "loaded but empty" from
/// "attempted and failed", so callers never have to guess what a
/// missing record set means.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// The load has not been attempted.
    NotLoaded,
    /// The load completed; the value may be empty.
    Loaded(T),
    /// The load was attempted and failed.
    Failed(String),
}

impl<T> LoadState<T> {
    /// Returns the loaded value, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded | Self::Failed(_) => None,
        }
    }
}
