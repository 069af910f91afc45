#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident retrieval pipeline.
//!
//! Produces [`crime_dash_models::IncidentRecord`] sets from either a
//! local CSV snapshot ([`local`]) or the remote Socrata CSV endpoint,
//! paginated by limit+offset ([`socrata`]) or bounded per calendar year
//! ([`yearly`]). Raw loads are memoized in an explicit [`cache::LoadCache`]
//! keyed by the call arguments.

pub mod cache;
pub mod local;
pub mod normalize;
pub mod parsing;
pub mod socrata;
pub mod yearly;

use std::path::PathBuf;

/// Errors that can occur during retrieval operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configured local snapshot does not exist. Non-fatal to the
    /// process; the affected load reports "no data" and stops.
    #[error("data source not found: {}", path.display())]
    DataSourceNotFound {
        /// The missing path.
        path: PathBuf,
    },
}
