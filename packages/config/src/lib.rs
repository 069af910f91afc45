#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Process configuration for the crime dashboard core.
//!
//! All options are optional in the TOML file; anything omitted falls
//! back to the Chicago defaults below (the Socrata crimes dataset,
//! a 2016-2025 window, 50k-row pages).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Socrata CSV endpoint for the Chicago crimes dataset.
pub const DEFAULT_BASE_URL: &str = "https://data.cityofchicago.org/resource/ijzp-q8t2.csv";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Inclusive date window for the main retrieval, as Socrata timestamp
/// literals (`YYYY-MM-DDTHH:MM:SS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    /// Window start.
    pub start: String,
    /// Window end.
    pub end: String,
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: "2016-01-01T00:00:00".to_owned(),
            end: "2025-12-31T23:59:59".to_owned(),
        }
    }
}

/// Paths of the local CSV snapshots used when `use_local_data` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFilePaths {
    /// Full-schema snapshot for the main dashboard window.
    pub incidents: PathBuf,
    /// Reduced-schema snapshot (`date, year, latitude, longitude`) for
    /// the hotspot-evolution view.
    pub evolution: PathBuf,
}

impl Default for LocalFilePaths {
    fn default() -> Self {
        Self {
            incidents: PathBuf::from("./data/chicago_crime_2016_2025_raw.csv"),
            evolution: PathBuf::from("./data/chicago_crime_2001_2024.csv"),
        }
    }
}

/// All knobs of one dashboard render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Load from the local CSV snapshots instead of the network.
    pub use_local_data: bool,
    /// Where the local snapshots live.
    pub local_file_paths: LocalFilePaths,
    /// Base URL of the remote Socrata CSV resource.
    pub remote_base_url: String,
    /// Date window for the main retrieval.
    pub date_window: DateWindow,
    /// Rows per page for the paginated main retrieval.
    pub page_size: u64,
    /// Safety cap on the number of pages fetched.
    pub max_pages: u32,
    /// Sleep between successive page requests, in seconds.
    pub throttle_seconds: f64,
    /// First year shown by the main dashboard charts.
    pub start_year: i32,
    /// Row cap of the bounded random geo-sample.
    pub geo_sample_size: usize,
    /// Seed for the geo-sample, fixed for reproducibility.
    pub geo_sample_seed: u64,
    /// How many districts the ranking keeps.
    pub top_districts: usize,
    /// District number -> human-readable label.
    pub district_label_map: BTreeMap<u32, String>,
    /// First year of the per-year evolution retrieval.
    pub evolution_start_year: i32,
    /// Last year (inclusive) of the per-year evolution retrieval.
    pub evolution_end_year: i32,
    /// Row cap per year for the evolution retrieval.
    pub evolution_rows_per_year: u64,
}

impl DashboardConfig {
    /// Loads configuration from a TOML file, filling omitted options
    /// with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            use_local_data: false,
            local_file_paths: LocalFilePaths::default(),
            remote_base_url: DEFAULT_BASE_URL.to_owned(),
            date_window: DateWindow::default(),
            page_size: 50_000,
            max_pages: 1000,
            throttle_seconds: 0.3,
            start_year: 2016,
            geo_sample_size: 100_000,
            geo_sample_seed: 42,
            top_districts: 10,
            district_label_map: default_district_labels(),
            evolution_start_year: 2001,
            evolution_end_year: 2024,
            evolution_rows_per_year: 15_000,
        }
    }
}

/// Chicago Police Department district labels.
///
/// Districts 13, 21, and 23 were retired and carry no label; the
/// ranking falls back to the bare district number for them.
#[must_use]
pub fn default_district_labels() -> BTreeMap<u32, String> {
    [
        (1, "1: Central (Downtown)"),
        (2, "2: Wentworth (South)"),
        (3, "3: Grand Crossing (South)"),
        (4, "4: South Chicago (South)"),
        (5, "5: Calumet (South)"),
        (6, "6: Gresham (South)"),
        (7, "7: Englewood (South)"),
        (8, "8: Chicago Lawn (Southwest)"),
        (9, "9: Deering (South)"),
        (10, "10: Ogden (West)"),
        (11, "11: Harrison (West)"),
        (12, "12: Near West (Central/West)"),
        (14, "14: Shakespeare (Northwest)"),
        (15, "15: Austin (Far West)"),
        (16, "16: Jefferson Park (Northwest)"),
        (17, "17: Albany Park (Northwest)"),
        (18, "18: Near North (Downtown)"),
        (19, "19: Town Hall (North)"),
        (20, "20: Lincoln (North)"),
        (22, "22: Morgan Park (Far South)"),
        (24, "24: Rogers Park (Far North)"),
        (25, "25: Grand Central (Northwest)"),
    ]
    .into_iter()
    .map(|(district, label)| (district, label.to_owned()))
    .collect()
}
