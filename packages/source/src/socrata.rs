//! Paginated Socrata CSV fetcher for the main dashboard window.
//!
//! Pages through the dataset with `$limit`/`$offset` over a fixed date
//! window, ordered by date ascending so concatenated pages stay in
//! timestamp order. Pages are requested strictly in sequence with a
//! throttle sleep between them; the endpoint assumes rate-limited,
//! in-order access.

use std::time::Duration;

use crime_dash_models::IncidentRecord;

use crate::SourceError;
use crate::normalize::parse_csv_incidents;

/// The fixed column projection of the main retrieval.
pub const SELECT_COLUMNS: &str = "id,case_number,date,block,iucr,primary_type,description,\
location_description,arrest,domestic,beat,district,ward,community_area,fbi_code,year,\
latitude,longitude,location";

/// Parameters of one paginated fetch.
#[derive(Debug, Clone)]
pub struct PagedQuery<'a> {
    /// Base API URL (e.g., `"https://data.cityofchicago.org/resource/ijzp-q8t2.csv"`).
    pub base_url: &'a str,
    /// Window start, as a Socrata timestamp literal.
    pub window_start: &'a str,
    /// Window end, as a Socrata timestamp literal.
    pub window_end: &'a str,
    /// Rows per page.
    pub page_size: u64,
    /// Safety cap on the number of pages. Reaching it stops the fetch
    /// without error even if the last page was full.
    pub max_pages: u32,
    /// Sleep between successive page requests, in seconds.
    pub throttle_seconds: f64,
}

/// Fetches the full record set for the query's window, page by page.
///
/// Stops at the first empty page, or at `max_pages`. Page order (and
/// therefore overall date order) is preserved in the result.
///
/// # Errors
///
/// Returns [`SourceError`] if any page request or CSV decode fails.
/// Failed pages are not retried.
pub async fn fetch_incidents(
    client: &reqwest::Client,
    query: &PagedQuery<'_>,
) -> Result<Vec<IncidentRecord>, SourceError> {
    fetch_paged(query, |offset, limit| request_page(client, query, offset, limit)).await
}

/// The pagination loop, generic over the page source so the stop
/// conditions can be tested without a network.
///
/// # Errors
///
/// Propagates the first page-level failure unchanged.
pub async fn fetch_paged<F, Fut>(
    query: &PagedQuery<'_>,
    mut fetch_page: F,
) -> Result<Vec<IncidentRecord>, SourceError>
where
    F: FnMut(u64, u64) -> Fut,
    Fut: Future<Output = Result<Vec<IncidentRecord>, SourceError>>,
{
    let mut all_records = Vec::new();
    let mut offset: u64 = 0;

    for page in 0..query.max_pages {
        let rows = fetch_page(offset, query.page_size).await?;

        if rows.is_empty() {
            log::info!("Stop: page {} is empty. Done.", page + 1);
            break;
        }

        let count = rows.len();
        all_records.extend(rows);
        offset += query.page_size;

        log::info!("Page {}: rows={count}, next_offset={offset}", page + 1);

        // Rate-limit courtesy between requests; the request that
        // terminates the loop is never followed by a sleep.
        if page + 1 < query.max_pages && query.throttle_seconds > 0.0 {
            tokio::time::sleep(Duration::from_secs_f64(query.throttle_seconds)).await;
        }
    }

    log::info!("Downloaded {} records total", all_records.len());
    Ok(all_records)
}

async fn request_page(
    client: &reqwest::Client,
    query: &PagedQuery<'_>,
    offset: u64,
    limit: u64,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let where_clause = format!(
        "date between '{}' and '{}'",
        query.window_start, query.window_end
    );

    let response = client
        .get(query.base_url)
        .query(&[
            ("$select", SELECT_COLUMNS),
            ("$where", where_clause.as_str()),
            ("$order", "date"),
        ])
        .query(&[("$limit", limit), ("$offset", offset)])
        .send()
        .await?
        .error_for_status()?;

    let text = response.text().await?;
    parse_csv_incidents(&text)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crime_dash_models::DateField;

    use super::*;

    fn query(page_size: u64, max_pages: u32) -> PagedQuery<'static> {
        PagedQuery {
            base_url: "http://localhost/resource.csv",
            window_start: "2016-01-01T00:00:00",
            window_end: "2025-12-31T23:59:59",
            page_size,
            max_pages,
            throttle_seconds: 0.0,
        }
    }

    fn row(tag: u32) -> IncidentRecord {
        let mut record = IncidentRecord::empty();
        record.id = Some(tag.to_string());
        record
    }

    #[tokio::test]
    async fn stops_at_first_empty_page() {
        let pages = RefCell::new(vec![
            vec![row(1), row(2)],
            vec![row(3)],
            Vec::new(),
            vec![row(99)],
        ]);

        let records = fetch_paged(&query(2, 100), |_, _| {
            let page = pages.borrow_mut().remove(0);
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(records.len(), 3);
        // The page after the empty one was never requested.
        assert_eq!(pages.borrow().len(), 1);
    }

    #[tokio::test]
    async fn terminates_at_page_cap_when_pages_never_empty() {
        let calls = RefCell::new(0_u32);

        let records = fetch_paged(&query(2, 5), |_, _| {
            *calls.borrow_mut() += 1;
            async { Ok(vec![row(0), row(0)]) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), 5);
        assert_eq!(records.len(), 10);
    }

    #[tokio::test]
    async fn offset_advances_by_page_size() {
        let offsets = RefCell::new(Vec::new());
        let pages = RefCell::new(vec![vec![row(1)], vec![row(2)], Vec::new()]);

        fetch_paged(&query(50, 100), |offset, limit| {
            assert_eq!(limit, 50);
            offsets.borrow_mut().push(offset);
            let page = pages.borrow_mut().remove(0);
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(*offsets.borrow(), vec![0, 50, 100]);
    }

    #[tokio::test]
    async fn page_failure_propagates_without_retry() {
        let calls = RefCell::new(0_u32);

        let result = fetch_paged(&query(2, 100), |_, _| {
            *calls.borrow_mut() += 1;
            async {
                Err(SourceError::Io(std::io::Error::other("connection reset")))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn concatenation_preserves_page_order() {
        let pages = RefCell::new(vec![
            vec![row(1), row(2)],
            vec![row(3), row(4)],
            Vec::new(),
        ]);

        let records = fetch_paged(&query(2, 100), |_, _| {
            let page = pages.borrow_mut().remove(0);
            async move { Ok(page) }
        })
        .await
        .unwrap();

        let ids: Vec<&str> = records.iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert!(records.iter().all(|r| r.date == DateField::Missing));
    }
}
