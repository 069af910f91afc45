//! Bounded per-year fetcher for the hotspot-evolution view.
//!
//! Instead of paging one broad window, this issues one capped request
//! per calendar year, projecting only the four columns the spatial
//! grouping needs. A year that fails is logged and skipped; the result
//! is the union of whatever years succeeded.

use crime_dash_models::IncidentRecord;

use crate::SourceError;
use crate::normalize::parse_csv_incidents;

/// Column projection of the evolution retrieval.
pub const EVOLUTION_COLUMNS: &str = "date,year,latitude,longitude";

/// Parameters of one per-year fetch.
#[derive(Debug, Clone)]
pub struct YearlyQuery<'a> {
    /// Base API URL.
    pub base_url: &'a str,
    /// First year requested.
    pub start_year: i32,
    /// Last year requested (inclusive).
    pub end_year: i32,
    /// Row cap per year, chosen to bound total sample size.
    pub rows_per_year: u64,
}

/// Outcome of a per-year fetch: the merged records plus the years whose
/// requests failed and were skipped.
#[derive(Debug)]
pub struct EvolutionFetch {
    /// Records from every year that succeeded, in year order.
    pub records: Vec<IncidentRecord>,
    /// Years whose requests failed. Empty on a clean fetch.
    pub failed_years: Vec<i32>,
}

/// Fetches a bounded spatial sample for every year in the query range.
///
/// Never fails as a whole: per-year errors are reported in
/// [`EvolutionFetch::failed_years`] and the remaining years are kept.
pub async fn fetch_evolution(
    client: &reqwest::Client,
    query: &YearlyQuery<'_>,
) -> EvolutionFetch {
    fetch_evolution_with(query, |year| request_year(client, query, year)).await
}

/// The per-year loop, generic over the year source so the
/// skip-on-failure behavior can be tested without a network.
pub async fn fetch_evolution_with<F, Fut>(query: &YearlyQuery<'_>, mut fetch_year: F) -> EvolutionFetch
where
    F: FnMut(i32) -> Fut,
    Fut: Future<Output = Result<Vec<IncidentRecord>, SourceError>>,
{
    let mut records = Vec::new();
    let mut failed_years = Vec::new();

    for year in query.start_year..=query.end_year {
        log::info!("Fetching evolution data for {year}...");
        match fetch_year(year).await {
            Ok(rows) => {
                log::info!("{year}: {} rows", rows.len());
                records.extend(rows);
            }
            Err(err) => {
                log::warn!("Error fetching {year}: {err}; skipping");
                failed_years.push(year);
            }
        }
    }

    log::info!(
        "Merged {} evolution rows ({} failed years)",
        records.len(),
        failed_years.len()
    );

    EvolutionFetch {
        records,
        failed_years,
    }
}

async fn request_year(
    client: &reqwest::Client,
    query: &YearlyQuery<'_>,
    year: i32,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let where_clause = format!("year={year}");

    let response = client
        .get(query.base_url)
        .query(&[
            ("$select", EVOLUTION_COLUMNS),
            ("$where", where_clause.as_str()),
            ("$order", "date"),
        ])
        .query(&[("$limit", query.rows_per_year)])
        .send()
        .await?
        .error_for_status()?;

    let text = response.text().await?;
    parse_csv_incidents(&text)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crime_dash_models::DateField;

    use super::*;

    fn query(start_year: i32, end_year: i32) -> YearlyQuery<'static> {
        YearlyQuery {
            base_url: "http://localhost/resource.csv",
            start_year,
            end_year,
            rows_per_year: 15_000,
        }
    }

    fn rows_for(year: i32, count: usize) -> Vec<IncidentRecord> {
        let date = NaiveDate::from_ymd_opt(year, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        (0..count)
            .map(|_| {
                let mut record = IncidentRecord::empty();
                record.date = DateField::Parsed(date);
                record.latitude = Some(41.88);
                record.longitude = Some(-87.63);
                record
            })
            .collect()
    }

    #[tokio::test]
    async fn failed_year_is_skipped_and_others_kept() {
        let outcome = fetch_evolution_with(&query(2011, 2015), |year| async move {
            if year == 2013 {
                Err(SourceError::Io(std::io::Error::other("timeout")))
            } else {
                Ok(rows_for(year, 10))
            }
        })
        .await;

        assert_eq!(outcome.failed_years, vec![2013]);
        assert_eq!(outcome.records.len(), 40);
        assert!(
            outcome
                .records
                .iter()
                .all(|r| r.date.year() != Some(2013))
        );
    }

    #[tokio::test]
    async fn clean_fetch_reports_no_failed_years() {
        let outcome =
            fetch_evolution_with(&query(2001, 2003), |year| async move { Ok(rows_for(year, 2)) })
                .await;

        assert!(outcome.failed_years.is_empty());
        assert_eq!(outcome.records.len(), 6);
    }

    #[tokio::test]
    async fn years_merge_in_request_order() {
        let outcome =
            fetch_evolution_with(&query(2001, 2002), |year| async move { Ok(rows_for(year, 1)) })
                .await;

        let years: Vec<i32> = outcome
            .records
            .iter()
            .filter_map(|r| r.date.year())
            .collect();
        assert_eq!(years, vec![2001, 2002]);
    }
}
