//! End-to-end analysis run: plan windows, schedule samples, fetch, store, analyze.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::analysis::TrendAnalyzer;
use crate::services::csv_store::{CsvStore, ObservationStore};
use crate::services::period_planner::PeriodPlanner;
use crate::services::query_scheduler::QueryScheduler;
use crate::sources::{MockProvider, PriceProvider};
use crate::types::{
    sort_by_schedule, Observation, SampleRequest, SampledObservation, TimeWindow, TrendResult,
};
use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Summary of one completed analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub run_id: Uuid,
    pub windows: Vec<TimeWindow>,
    pub request_count: usize,
    /// Samples filled with simulated data after a provider failure.
    pub placeholder_count: usize,
    pub result: TrendResult,
}

/// Drives the full analysis for one configuration.
pub struct AnalysisPipeline {
    config: Config,
    planner: PeriodPlanner,
    scheduler: QueryScheduler,
    provider: Arc<dyn PriceProvider>,
    fallback: MockProvider,
    store: Arc<dyn ObservationStore>,
    analyzer: TrendAnalyzer,
}

impl AnalysisPipeline {
    /// Validate `config` and wire the pipeline stages.
    pub fn new(
        config: Config,
        provider: Arc<dyn PriceProvider>,
        store: Arc<dyn ObservationStore>,
    ) -> Result<Self> {
        config.validate()?;
        let planner = PeriodPlanner::from_config(&config)?;
        let scheduler = QueryScheduler::new(config.symbol.clone(), config.samples_per_period);

        Ok(Self {
            config,
            planner,
            scheduler,
            provider,
            fallback: MockProvider::new(),
            store,
            analyzer: TrendAnalyzer::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run with windows ending now.
    pub async fn run(&self) -> Result<AnalysisRun> {
        self.run_at(Utc::now()).await
    }

    /// Run with windows ending at `reference`.
    pub async fn run_at(&self, reference: DateTime<Utc>) -> Result<AnalysisRun> {
        let run_id = Uuid::new_v4();
        info!(
            "Starting analysis {} for {} via {}",
            run_id,
            self.config.symbol,
            self.provider.name()
        );

        let windows = self.planner.plan(reference)?;
        info!("{} periods generated", windows.len());

        let requests = self.scheduler.schedule(&windows);
        let request_count = requests.len();
        info!("{} queries scheduled", request_count);

        let (samples, placeholder_count) = self.fetch_all(requests).await;
        if samples.is_empty() {
            return Err(AppError::EmptySeries);
        }
        info!(
            "{} records collected ({} placeholders)",
            samples.len(),
            placeholder_count
        );

        let source_reference = self.store.save(&samples)?;
        let series: Vec<Observation> = samples.into_iter().map(|s| s.observation).collect();
        let result = self.analyzer.analyze(&series, source_reference)?;

        info!(
            "Analysis {} finished: {} (score {:.2})",
            run_id, result.classification, result.score
        );

        Ok(AnalysisRun {
            run_id,
            windows,
            request_count,
            placeholder_count,
            result,
        })
    }

    /// Fetch every request, substituting simulated data for failures.
    ///
    /// Results come back in schedule order regardless of concurrency.
    pub async fn fetch_all(&self, requests: Vec<SampleRequest>) -> (Vec<SampledObservation>, usize) {
        let delay = Duration::from_millis(self.config.fetch_delay_ms);
        let concurrency = self.config.fetch_concurrency.max(1);

        let fetched: Vec<(SampledObservation, bool)> = stream::iter(requests)
            .map(|request| async move {
                let (observation, placeholder) = match self.provider.fetch(&request).await {
                    Ok(observation) => (observation, false),
                    Err(e) => {
                        warn!(
                            "{} fetch failed for window {} sample {}: {}; using simulated data",
                            self.provider.name(),
                            request.window_index,
                            request.sample_index,
                            e
                        );
                        (self.fallback.simulate(&request), true)
                    }
                };
                debug!(
                    "Fetched {} at {}: close={}",
                    request.symbol, request.timestamp, observation.close
                );

                // Rate limiting
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                (SampledObservation { request, observation }, placeholder)
            })
            .buffered(concurrency)
            .collect()
            .await;

        let placeholders = fetched.iter().filter(|(_, placeholder)| *placeholder).count();
        let mut samples: Vec<SampledObservation> = fetched.into_iter().map(|(s, _)| s).collect();
        sort_by_schedule(&mut samples);
        (samples, placeholders)
    }
}

/// Re-run the trend analysis on a previously saved CSV.
pub fn reanalyze(store: &CsvStore, path: &Path) -> Result<TrendResult> {
    let samples = store.load(path)?;
    let series: Vec<Observation> = samples.into_iter().map(|s| s.observation).collect();
    TrendAnalyzer::new().analyze(&series, path.display().to_string())
}
