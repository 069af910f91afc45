//! Local CSV snapshot loader.
//!
//! Used when the configuration opts out of network access. The same
//! decoder handles both the full-schema snapshot and the reduced
//! evolution snapshot, since decoding is header-driven.

use std::path::Path;

use crime_dash_models::IncidentRecord;

use crate::SourceError;
use crate::normalize::parse_csv_incidents;

/// Loads incident records from a local CSV snapshot, preserving file
/// order.
///
/// # Errors
///
/// Returns [`SourceError::DataSourceNotFound`] if the path does not
/// exist, or [`SourceError`] for read/parse failures. A missing
/// snapshot is a user-visible "no data" state, not a process failure.
pub fn load_incidents(path: &Path) -> Result<Vec<IncidentRecord>, SourceError> {
    if !path.exists() {
        return Err(SourceError::DataSourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    let incidents = parse_csv_incidents(&text)?;

    log::info!(
        "Loaded {} records from {}",
        incidents.len(),
        path.display()
    );

    Ok(incidents)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("crime_dash_{name}_{}.csv", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_data_source_not_found() {
        let path = Path::new("/nonexistent/chicago_crime.csv");
        let err = load_incidents(path).unwrap_err();
        assert!(matches!(err, SourceError::DataSourceNotFound { .. }));
    }

    #[test]
    fn loads_snapshot_in_file_order() {
        let path = temp_csv(
            "snapshot",
            "date,year,latitude,longitude\n\
             2021-03-01T10:00:00,2021,41.90,-87.65\n\
             2019-08-20T22:30:00,2019,41.75,-87.60\n",
        );

        let incidents = load_incidents(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(incidents.len(), 2);
        // File order, not date order.
        assert_eq!(incidents[0].date.year(), Some(2021));
        assert_eq!(incidents[1].date.year(), Some(2019));
    }
}
