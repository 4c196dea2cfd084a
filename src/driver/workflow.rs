//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use log::{info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::config::Config;
use crate::adapter::cowin::client::{CowinEndpoints, HttpFetcher, ReqwestFetcher};
use crate::adapter::repositories::cached_location_repository::{
    CachedLocationRepository, DistrictCache,
};
use crate::adapter::repositories::http_location_repository::HttpLocationRepository;
use crate::adapter::repositories::http_session_repository::HttpSessionRepository;
use crate::adapter::repositories::json_state_directory::JsonStateDirectory;
use crate::application::dto::availability_query::AvailabilityQuery;
use crate::application::use_cases::aggregate_availability::{
    AggregateAvailabilityUseCase, AggregationOptions,
};
use crate::application::use_cases::list_districts::ListDistrictsUseCase;
use crate::domain::entities::region::{DistrictSelector, RegionSelector};
use crate::domain::entities::slot_record::{sort_records, AvailabilityReport};
use crate::domain::repositories::state_directory::StateDirectory;
use crate::domain::services::slot_filter::DateFilter;

use super::cli::Args;
use super::render;

type LocationRepo = CachedLocationRepository<HttpLocationRepository>;

/// Build aggregation options from the loaded configuration
pub fn aggregation_options(config: &Config) -> AggregationOptions {
    AggregationOptions {
        max_concurrency: config.max_concurrency,
        fetch_timeout: config.request_timeout(),
    }
}

/// Turn CLI arguments into a validated query
///
/// `--date-filter` / `--exact-date` override the configured date filter.
pub fn build_query(args: &Args, config: &Config) -> Result<AvailabilityQuery> {
    let date = args.start_date()?;
    let date_filter = args.date_filter_override().unwrap_or(config.date_filter);
    let region = RegionSelector::new(args.state, DistrictSelector::from_option(args.district));

    let query = AvailabilityQuery::new(region, args.min_age, date, date_filter, &config.min_age_bands)?;
    Ok(query)
}

/// One-line summary printed above the table
pub fn describe_query(query: &AvailabilityQuery, state_name: Option<&str>) -> String {
    let state = match state_name {
        Some(name) => format!("{} ({})", name, query.region.state_id),
        None => format!("state {}", query.region.state_id),
    };
    let dates = match query.date_filter {
        DateFilter::Window => format!("week of {}", query.date),
        DateFilter::ExactDate => format!("on {}", query.date),
    };
    format!(
        "{} | {} | age {}+ | {}",
        state, query.region.district, query.min_age, dates
    )
}

/// Slot availability workflow
pub struct AvailabilityWorkflow {
    config: Config,
    state_directory: JsonStateDirectory,
    district_cache: Arc<DistrictCache>,
    aggregate_use_case: AggregateAvailabilityUseCase<LocationRepo, HttpSessionRepository>,
    list_districts_use_case: ListDistrictsUseCase<LocationRepo>,
}

impl AvailabilityWorkflow {
    /// Create a new workflow instance with dependency injection
    pub async fn new(config: Config) -> Result<Self> {
        let state_directory = JsonStateDirectory::load(&config.states_path).await?;

        // Upstream client shared by both repositories
        let fetcher: Arc<dyn HttpFetcher> = Arc::new(
            ReqwestFetcher::from_config(&config).context("Failed to create HTTP client")?,
        );
        let endpoints = CowinEndpoints::new(&config.base_url)?;

        // Repository implementations
        let district_cache = Arc::new(DistrictCache::new(config.district_cache_ttl()));
        let location_repo = Arc::new(CachedLocationRepository::new(
            Arc::new(HttpLocationRepository::new(fetcher.clone(), endpoints.clone())),
            district_cache.clone(),
        ));
        let session_repo = Arc::new(HttpSessionRepository::new(fetcher, endpoints));

        // Use Cases construction
        let aggregate_use_case =
            AggregateAvailabilityUseCase::new(location_repo.clone(), session_repo)
                .with_options(aggregation_options(&config));
        let list_districts_use_case = ListDistrictsUseCase::new(location_repo);

        Ok(Self {
            config,
            state_directory,
            district_cache,
            aggregate_use_case,
            list_districts_use_case,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn district_cache(&self) -> &Arc<DistrictCache> {
        &self.district_cache
    }

    /// Run the aggregation and apply the requested ordering
    pub async fn query(&self, query: &AvailabilityQuery, args: &Args) -> AvailabilityReport {
        let mut report = self.aggregate_use_case.execute(query).await;
        let columns = args.sort_columns();
        if !columns.is_empty() {
            sort_records(&mut report.rows, &columns, args.descending);
        }
        report
    }

    /// Execute the command selected by `args`
    pub async fn execute(&self, args: Args) -> Result<()> {
        if args.list_states {
            print!("{}", render::render_states(self.state_directory.states()));
            return Ok(());
        }

        if !self.state_directory.contains(args.state) {
            warn!("State {} is not in the state directory", args.state);
        }

        if args.list_districts {
            let districts = self.list_districts_use_case.execute(args.state).await;
            print!("{}", render::render_districts(&districts));
            return Ok(());
        }

        let query = build_query(&args, &self.config)?;
        info!("Query: {}", describe_query(&query, self.state_directory.state_name(args.state)));

        match args.watch {
            None => self.run_once(&query, &args).await,
            Some(secs) => self.watch(&query, &args, Duration::from_secs(secs.max(1))).await,
        }
    }

    async fn run_once(&self, query: &AvailabilityQuery, args: &Args) -> Result<()> {
        let report = self.query(query, args).await;

        if args.json {
            println!("{}", render::render_json(&report)?);
        } else {
            println!(
                "{}",
                describe_query(query, self.state_directory.state_name(query.region.state_id))
            );
            print!("{}", render::render_table(&report));
        }
        Ok(())
    }

    /// Re-run the query on an interval until Ctrl-C
    async fn watch(&self, query: &AvailabilityQuery, args: &Args, interval: Duration) -> Result<()> {
        info!("Refreshing every {}s, press Ctrl-C to stop", interval.as_secs());
        self.watch_until(query, args, interval, tokio::signal::ctrl_c())
            .await
    }

    /// Refresh loop that stops as soon as `shutdown` resolves, including mid-query
    async fn watch_until<F>(
        &self,
        query: &AvailabilityQuery,
        args: &Args,
        interval: Duration,
        shutdown: F,
    ) -> Result<()>
    where
        F: Future,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Interrupted, stopping");
                    return Ok(());
                }
                result = self.run_once(query, args) => result?,
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Interrupted, stopping");
                    return Ok(());
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }
}
