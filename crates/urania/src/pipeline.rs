//! Per-day orchestration: positions -> aspects -> patterns -> scores.

use crate::aspects::{AspectClassifier, AspectEdge};
use crate::config::AspectConfig;
use crate::ephemeris::{EphemerisError, PositionProvider, Positions};
use crate::patterns::{Pattern, PatternDetector, PatternScorer};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to get positions for {date}: {source}")]
    Positions {
        date: NaiveDate,
        #[source]
        source: EphemerisError,
    },
    #[error("Analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Results for one day
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub aspects: Vec<AspectEdge>,
    pub patterns: Vec<Pattern>,
}

/// Results for a run of consecutive days, ordered by date
#[derive(Debug, Clone, Default, Serialize)]
pub struct RangeReport {
    pub weekly_aspects: Vec<DailyReport>,
}

/// Runs the classifier, detector and scorer for each day
#[derive(Clone)]
pub struct DailyPipeline {
    config: Arc<AspectConfig>,
    classifier: Arc<AspectClassifier>,
    detector: Arc<PatternDetector>,
    scorer: Arc<PatternScorer>,
    max_concurrency: usize,
}

impl DailyPipeline {
    pub fn new(config: Arc<AspectConfig>) -> Self {
        let max_concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            classifier: Arc::new(AspectClassifier::new(config.clone())),
            detector: Arc::new(PatternDetector::new()),
            scorer: Arc::new(PatternScorer::new(config.clone())),
            config,
            max_concurrency,
        }
    }

    /// Limit how many days are fetched and analyzed at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_detector(mut self, detector: PatternDetector) -> Self {
        self.detector = Arc::new(detector);
        self
    }

    pub fn config(&self) -> &AspectConfig {
        &self.config
    }

    /// Analyze one day's positions
    pub fn analyze(&self, date: NaiveDate, positions: &Positions) -> DailyReport {
        let graph = self.classifier.classify(positions);
        let patterns = self.detector.detect(&graph);
        let patterns = self.scorer.score(patterns, &graph);

        let counts: BTreeMap<&str, usize> = graph
            .counts_by_kind()
            .into_iter()
            .map(|(kind, count)| (kind.as_str(), count))
            .collect();
        let pattern_types: Vec<&str> = patterns.iter().map(|p| p.pattern_type.as_str()).collect();
        log::info!(
            "{} Aspect counts: {:?} | Patterns: {:?}",
            date,
            counts,
            pattern_types
        );

        DailyReport {
            date,
            aspects: graph.into_edges(),
            patterns,
        }
    }

    /// Fetch and analyze `days` consecutive days starting at `start`.
    ///
    /// Days run concurrently; the first provider failure aborts the run.
    pub async fn run_range(
        &self,
        provider: Arc<dyn PositionProvider>,
        start: NaiveDate,
        days: u32,
    ) -> Result<RangeReport, PipelineError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let bodies = Arc::new(self.config.bodies.clone());
        log::info!(
            "Running {} days from {} using {} (up to {} at once)",
            days,
            start,
            provider.name(),
            self.max_concurrency
        );

        let mut tasks = JoinSet::new();
        for offset in 0..days {
            let date = start + Duration::days(i64::from(offset));
            let pipeline = self.clone();
            let provider = provider.clone();
            let semaphore = semaphore.clone();
            let bodies = bodies.clone();

            tasks.spawn(async move {
                // Never closed, so acquiring only waits
                let _permit = semaphore.acquire_owned().await.ok();
                let positions = provider
                    .positions(date, &bodies)
                    .await
                    .map_err(|source| PipelineError::Positions { date, source })?;
                let report =
                    tokio::task::spawn_blocking(move || pipeline.analyze(date, &positions)).await?;
                Ok::<DailyReport, PipelineError>(report)
            });
        }

        let mut reports = Vec::with_capacity(days as usize);
        while let Some(joined) = tasks.join_next().await {
            reports.push(joined??);
        }
        reports.sort_by_key(|report| report.date);

        Ok(RangeReport {
            weekly_aspects: reports,
        })
    }
}
