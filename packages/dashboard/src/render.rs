//! The render pass: retrieval, aggregation, chart construction.

use std::sync::Arc;

use crime_dash_analytics::{districts, spatial, temporal};
use crime_dash_charts::{ChartSpec, MapLayerSpec};
use crime_dash_config::DashboardConfig;
use crime_dash_models::{Era, IncidentRecord, LoadState};
use crime_dash_source::cache::{CacheKey, LoadCache};
use crime_dash_source::socrata::PagedQuery;
use crime_dash_source::yearly::YearlyQuery;
use crime_dash_source::{local, socrata, yearly};
use serde::{Deserialize, Serialize};

/// The two era views rendered side by side: the earliest and the most
/// recent era.
const DEFAULT_ERA_VIEWS: [Era; 2] = [Era::Early2000s, Era::ModernEra];

/// Terminal state of one load within a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadStatus {
    /// The load completed (possibly with zero records).
    Loaded,
    /// The load failed; the affected charts are in their empty state.
    Failed,
}

/// What happened to one of the pass's two loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    /// Terminal state of the load.
    pub status: LoadStatus,
    /// Number of records the load produced.
    pub records: usize,
    /// Years skipped by the per-year pipeline, if any.
    pub failed_years: Vec<i32>,
    /// The failure message, when `status` is `Failed`.
    pub error: Option<String>,
}

/// Everything one render pass hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOutput {
    /// Line chart of incidents per year.
    pub yearly_trend: ChartSpec,
    /// Bar chart of incidents per hour of day.
    pub hourly_trend: ChartSpec,
    /// Bar chart of incidents per weekday.
    pub weekday_trend: ChartSpec,
    /// Ranked high-crime districts.
    pub district_ranking: ChartSpec,
    /// Heatmap of the bounded spatial sample.
    pub spatial_heatmap: MapLayerSpec,
    /// Era-comparison heatmap layers.
    pub era_views: Vec<MapLayerSpec>,
    /// Outcome of the main window load.
    pub main_load: LoadSummary,
    /// Outcome of the long-horizon evolution load.
    pub evolution_load: LoadSummary,
}

/// Runs one full render pass: load, aggregate, build charts.
///
/// Load failures never abort the pass; the affected charts come back
/// in their empty "no data" state with the failure recorded in the
/// matching [`LoadSummary`]. Repeated passes with the same `config`
/// reuse `cache` instead of re-fetching.
pub async fn render_pass(config: &DashboardConfig, cache: &mut LoadCache) -> DashboardOutput {
    let client = reqwest::Client::new();

    let main = load_main(config, cache, &client).await;
    let (evolution, failed_years) = load_evolution(config, cache, &client).await;

    build_output(config, &main, &evolution, failed_years)
}

async fn load_main(
    config: &DashboardConfig,
    cache: &mut LoadCache,
    client: &reqwest::Client,
) -> LoadState<Arc<Vec<IncidentRecord>>> {
    let key = if config.use_local_data {
        CacheKey::LocalFile(config.local_file_paths.incidents.clone())
    } else {
        CacheKey::RemoteWindow {
            base_url: config.remote_base_url.clone(),
            start: config.date_window.start.clone(),
            end: config.date_window.end.clone(),
        }
    };

    if let Some(hit) = cache.get(&key) {
        return LoadState::Loaded(hit);
    }

    let result = if config.use_local_data {
        local::load_incidents(&config.local_file_paths.incidents)
    } else {
        socrata::fetch_incidents(
            client,
            &PagedQuery {
                base_url: &config.remote_base_url,
                window_start: &config.date_window.start,
                window_end: &config.date_window.end,
                page_size: config.page_size,
                max_pages: config.max_pages,
                throttle_seconds: config.throttle_seconds,
            },
        )
        .await
    };

    match result {
        Ok(records) => LoadState::Loaded(cache.insert(key, records)),
        Err(err) => {
            log::error!("Main data load failed: {err}");
            LoadState::Failed(err.to_string())
        }
    }
}

async fn load_evolution(
    config: &DashboardConfig,
    cache: &mut LoadCache,
    client: &reqwest::Client,
) -> (LoadState<Arc<Vec<IncidentRecord>>>, Vec<i32>) {
    if config.use_local_data {
        let path = &config.local_file_paths.evolution;
        let key = CacheKey::LocalFile(path.clone());

        if let Some(hit) = cache.get(&key) {
            return (LoadState::Loaded(hit), Vec::new());
        }

        return match local::load_incidents(path) {
            Ok(records) => (LoadState::Loaded(cache.insert(key, records)), Vec::new()),
            Err(err) => {
                log::error!("Evolution data load failed: {err}");
                (LoadState::Failed(err.to_string()), Vec::new())
            }
        };
    }

    let key = CacheKey::RemoteYearly {
        base_url: config.remote_base_url.clone(),
        start_year: config.evolution_start_year,
        end_year: config.evolution_end_year,
    };

    if let Some(hit) = cache.get(&key) {
        return (LoadState::Loaded(hit), Vec::new());
    }

    let outcome = yearly::fetch_evolution(
        client,
        &YearlyQuery {
            base_url: &config.remote_base_url,
            start_year: config.evolution_start_year,
            end_year: config.evolution_end_year,
            rows_per_year: config.evolution_rows_per_year,
        },
    )
    .await;

    (
        LoadState::Loaded(cache.insert(key, outcome.records)),
        outcome.failed_years,
    )
}

fn build_output(
    config: &DashboardConfig,
    main: &LoadState<Arc<Vec<IncidentRecord>>>,
    evolution: &LoadState<Arc<Vec<IncidentRecord>>>,
    failed_years: Vec<i32>,
) -> DashboardOutput {
    let start_year = config.start_year;
    let end_year = window_end_year(config);

    let empty: Vec<IncidentRecord> = Vec::new();
    let records: &[IncidentRecord] = main.loaded().map_or(empty.as_slice(), |r| r.as_slice());

    let by_year = temporal::counts_by_year(records);
    let by_hour = temporal::counts_by_hour(records);
    let by_weekday = temporal::counts_by_weekday(records);
    let ranked = districts::top_districts(
        records,
        start_year,
        end_year,
        config.top_districts,
        &config.district_label_map,
    );
    let sample = spatial::geo_sample(records, config.geo_sample_size, config.geo_sample_seed);

    let evolution_records: &[IncidentRecord] =
        evolution.loaded().map_or(empty.as_slice(), |r| r.as_slice());
    let era_views = DEFAULT_ERA_VIEWS
        .into_iter()
        .map(|era| crime_dash_charts::era_heatmap(spatial::era_points(evolution_records, era), era))
        .collect();

    DashboardOutput {
        yearly_trend: crime_dash_charts::yearly_trend(&by_year, start_year, end_year),
        hourly_trend: crime_dash_charts::hourly_trend(&by_hour, start_year, end_year),
        weekday_trend: crime_dash_charts::weekday_trend(&by_weekday, start_year, end_year),
        district_ranking: crime_dash_charts::district_ranking(&ranked, start_year, end_year),
        spatial_heatmap: crime_dash_charts::spatial_heatmap(sample, start_year, end_year),
        era_views,
        main_load: summarize(main, Vec::new()),
        evolution_load: summarize(evolution, failed_years),
    }
}

fn summarize(state: &LoadState<Arc<Vec<IncidentRecord>>>, failed_years: Vec<i32>) -> LoadSummary {
    match state {
        LoadState::Loaded(records) => LoadSummary {
            status: LoadStatus::Loaded,
            records: records.len(),
            failed_years,
            error: None,
        },
        LoadState::Failed(message) => LoadSummary {
            status: LoadStatus::Failed,
            records: 0,
            failed_years,
            error: Some(message.clone()),
        },
        LoadState::NotLoaded => LoadSummary {
            status: LoadStatus::Failed,
            records: 0,
            failed_years,
            error: Some("load was not attempted".to_owned()),
        },
    }
}

/// Year of the window end literal; the charts' title range runs from
/// `start_year` to this.
fn window_end_year(config: &DashboardConfig) -> i32 {
    config
        .date_window
        .end
        .get(..4)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("crime_dash_pass_{name}_{}.csv", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn local_config(incidents: PathBuf, evolution: PathBuf) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        config.use_local_data = true;
        config.local_file_paths.incidents = incidents;
        config.local_file_paths.evolution = evolution;
        config.start_year = 2016;
        config
    }

    const MAIN_CSV: &str = "\
id,case_number,date,district,latitude,longitude
1,HZ1,2023-01-02T08:00:00,11.0,41.88,-87.63
2,HZ2,2023-01-02T08:00:00,11.0,41.89,-87.64
3,HZ3,2023-06-15T23:10:00,7.0,41.75,-87.60
";

    const EVOLUTION_CSV: &str = "\
date,year,latitude,longitude
2003-06-15T23:10:00,2003,41.75,-87.64
2022-01-01T01:00:00,2022,41.70,-87.61
";

    #[tokio::test]
    async fn local_pass_builds_all_charts() {
        let incidents = temp_csv("main", MAIN_CSV);
        let evolution = temp_csv("evo", EVOLUTION_CSV);
        let config = local_config(incidents.clone(), evolution.clone());
        let mut cache = LoadCache::new();

        let output = render_pass(&config, &mut cache).await;
        std::fs::remove_file(&incidents).ok();
        std::fs::remove_file(&evolution).ok();

        assert_eq!(output.main_load.status, LoadStatus::Loaded);
        assert_eq!(output.main_load.records, 3);

        assert_eq!(output.yearly_trend.points.len(), 1);
        assert_eq!(output.yearly_trend.points[0].value, 3);
        assert_eq!(output.hourly_trend.points[8].value, 2);
        assert_eq!(output.hourly_trend.points[23].value, 1);
        assert_eq!(output.district_ranking.points[0].value, 2);
        assert_eq!(output.spatial_heatmap.points.len(), 3);

        // One point per default era view.
        assert_eq!(output.era_views.len(), 2);
        assert_eq!(output.era_views[0].points.len(), 1);
        assert_eq!(output.era_views[1].points.len(), 1);
    }

    #[tokio::test]
    async fn missing_snapshot_yields_no_data_charts_not_a_crash() {
        let evolution = temp_csv("evo_only", EVOLUTION_CSV);
        let config = local_config(PathBuf::from("/nonexistent/main.csv"), evolution.clone());
        let mut cache = LoadCache::new();

        let output = render_pass(&config, &mut cache).await;
        std::fs::remove_file(&evolution).ok();

        assert_eq!(output.main_load.status, LoadStatus::Failed);
        assert!(output.main_load.error.is_some());
        assert!(output.yearly_trend.points.is_empty());
        assert!(output.spatial_heatmap.points.is_empty());
        assert!(output.hourly_trend.points.iter().all(|p| p.value == 0));

        // The evolution load is independent of the main one.
        assert_eq!(output.evolution_load.status, LoadStatus::Loaded);
        assert_eq!(output.era_views[0].points.len(), 1);
    }

    #[tokio::test]
    async fn second_pass_reuses_cached_loads() {
        let incidents = temp_csv("cached_main", MAIN_CSV);
        let evolution = temp_csv("cached_evo", EVOLUTION_CSV);
        let config = local_config(incidents.clone(), evolution.clone());
        let mut cache = LoadCache::new();

        let first = render_pass(&config, &mut cache).await;
        assert_eq!(cache.len(), 2);

        // Delete the snapshots; a second pass must come from the cache.
        std::fs::remove_file(&incidents).ok();
        std::fs::remove_file(&evolution).ok();

        let second = render_pass(&config, &mut cache).await;
        assert_eq!(cache.len(), 2);
        assert_eq!(second.main_load.status, LoadStatus::Loaded);
        assert_eq!(first.yearly_trend, second.yearly_trend);
    }

    #[test]
    fn window_end_year_parses_literal() {
        let config = DashboardConfig::default();
        assert_eq!(window_end_year(&config), 2025);

        let mut odd = DashboardConfig::default();
        odd.date_window.end = "garbage".to_owned();
        assert_eq!(window_end_year(&odd), 2025);
    }
}
