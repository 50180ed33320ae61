/// Periodic refresh driver for the monitoring pipeline.
///
/// Each tick runs the full cycle:
/// 1. Fetch the live station feed and normalize it
/// 2. Fetch the three historical lookup documents (in parallel)
/// 3. Join the lookups into the features
/// 4. Build the alert layer from the risk codes
/// 5. Publish the result as the shared snapshot
///
/// Ticks are independent: a failure anywhere in a cycle is logged and the
/// previous snapshot stays published until the next tick succeeds. The loop
/// is strictly sequential, so a slow cycle delays the next tick rather than
/// overlapping it.

use crate::alert::risk::{self, RiskAssessment};
use crate::analysis::enrich;
use crate::ingest::{FeedSource, historic, pegel};
use crate::logging::{self, LogSource};
use crate::model::{FeedError, HistoryKind, StationFeature};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, mpsc};
use threadpool::ThreadPool;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Driver configuration
pub struct RefreshConfig {
    /// How often to refresh (default: 10 minutes, the upstream publication
    /// cadence of pegelaktuell).
    pub poll_interval_minutes: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            poll_interval_minutes: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The pure-data output of one successful refresh cycle. The driver replaces
/// it wholesale on every successful tick; consumers only read it. No map or
/// rendering state lives here: layer lifecycle belongs entirely to whoever
/// consumes the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub features: Vec<StationFeature>,
    pub alerts: Vec<RiskAssessment>,
    pub fetched_at: DateTime<Utc>,
    /// Raw records excluded during normalization this cycle.
    pub dropped_records: usize,
}

/// Handle shared between the driver and its consumers (endpoint, exporter).
/// `None` until the first successful cycle.
pub type SharedSnapshot = Arc<RwLock<Option<Snapshot>>>;

/// What one successful tick produced, for logging and one-shot runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub station_count: usize,
    pub alert_count: usize,
    pub dropped_records: usize,
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub struct RefreshDriver<S> {
    config: RefreshConfig,
    source: Arc<S>,
    snapshot: SharedSnapshot,
}

impl<S: FeedSource + Send + Sync + 'static> RefreshDriver<S> {
    /// Create a driver with default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, RefreshConfig::default())
    }

    /// Create a driver with custom configuration
    pub fn with_config(source: S, config: RefreshConfig) -> Self {
        Self {
            config,
            source: Arc::new(source),
            snapshot: Arc::new(RwLock::new(None)),
        }
    }

    /// Handle to the published snapshot, for the endpoint thread.
    pub fn snapshot(&self) -> SharedSnapshot {
        Arc::clone(&self.snapshot)
    }

    /// Shared handle to the underlying source, for on-demand zone fetches.
    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    /// Run one full refresh cycle and publish the result.
    ///
    /// Any fetch or parse failure aborts the whole cycle (including the
    /// enrichment step when just one of the three lookups fails) and leaves
    /// the previously published snapshot in place.
    pub fn tick(&self) -> Result<CycleSummary, FeedError> {
        let feed_body = self.source.fetch_station_feed()?;
        let normalized = pegel::parse_feed_response(&feed_body)?;

        let bodies = self.fetch_history_tables()?;
        let maxima = historic::parse_history_table(&bodies[&HistoryKind::MonthlyMaxima])?;
        let minima = historic::parse_history_table(&bodies[&HistoryKind::MonthlyMinima])?;
        let daily_mean = historic::parse_history_table(&bodies[&HistoryKind::DailyMean])?;

        let features = enrich::attach_history(normalized.features, &maxima, &minima, &daily_mean);
        let alerts = risk::build_alerts(&features);

        let summary = CycleSummary {
            station_count: features.len(),
            alert_count: alerts.len(),
            dropped_records: normalized.dropped,
        };

        let snapshot = Snapshot {
            features,
            alerts,
            fetched_at: Utc::now(),
            dropped_records: normalized.dropped,
        };
        *self.snapshot.write().unwrap() = Some(snapshot);

        Ok(summary)
    }

    /// Fetches the three lookup documents concurrently. The documents are
    /// independent, so the cycle only waits for the slowest of the three
    /// instead of their sum. One failure fails the whole fetch.
    fn fetch_history_tables(&self) -> Result<HashMap<HistoryKind, String>, FeedError> {
        let pool = ThreadPool::new(HistoryKind::ALL.len());
        let (tx, rx) = mpsc::channel();

        for kind in HistoryKind::ALL {
            let tx = tx.clone();
            let source = Arc::clone(&self.source);
            pool.execute(move || {
                // The receiver may already be gone if a sibling fetch failed.
                let _ = tx.send((kind, source.fetch_history_table(kind)));
            });
        }
        drop(tx);

        let mut bodies = HashMap::new();
        for (kind, result) in rx {
            bodies.insert(kind, result?);
        }
        Ok(bodies)
    }

    /// Main driver loop: tick immediately, then every poll interval, for the
    /// lifetime of the process. Failed ticks are logged and never cancel
    /// subsequent ones.
    pub fn run(&self) {
        logging::info(
            LogSource::System,
            None,
            &format!(
                "refresh loop started, interval {} minutes",
                self.config.poll_interval_minutes
            ),
        );

        loop {
            let start = Utc::now();

            match self.tick() {
                Ok(summary) => {
                    logging::info(
                        LogSource::System,
                        None,
                        &format!(
                            "refresh complete: {} stations, {} alerts, {} records dropped",
                            summary.station_count, summary.alert_count, summary.dropped_records
                        ),
                    );
                }
                Err(e) => {
                    logging::log_cycle_failure(LogSource::Pegel, "refresh cycle", &e);
                }
            }

            // Sleep for whatever remains of the interval.
            let elapsed = (Utc::now() - start).num_seconds();
            let sleep_seconds = (self.config.poll_interval_minutes * 60) as i64 - elapsed;
            if sleep_seconds > 0 {
                std::thread::sleep(std::time::Duration::from_secs(sleep_seconds as u64));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
