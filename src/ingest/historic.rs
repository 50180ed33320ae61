/// EHYD historical lookup documents: URL construction + parsing.
///
/// Three documents are published next to the live feed, one per measurement
/// kind (monthly maxima, monthly minima, daily mean). Each is a JSON object
/// mapping station identifier (string) to station metadata plus a list of
/// {jahr, wert} measurement pairs.

use crate::config::HistoricConfig;
use crate::model::{FeedError, HistoricalBundle, HistoryKind};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

// ---------------------------------------------------------------------------
// Serde structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawHistoryEntry {
    messstelle: Option<String>,
    gewaesser: Option<String>,
    einzugsgebiet: Option<String>,
    dienststelle: Option<String>,
    #[serde(default)]
    messwerte: Vec<RawMeasurement>,
}

#[derive(Deserialize)]
struct RawMeasurement {
    jahr: i32,
    wert: f64,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the URL of one historical lookup document.
pub fn build_history_url(config: &HistoricConfig, kind: HistoryKind) -> String {
    format!("{}/{}", config.base_url, kind.document_name())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses one historical lookup document into a map keyed by station
/// identifier.
///
/// The {jahr, wert} list is folded into a year-keyed map in document order;
/// a duplicate year overwrites the earlier value. Last wins: source data is
/// assumed to carry at most one value per year.
///
/// # Errors
/// - `FeedError::ParseError` — the document is not the expected JSON object.
pub fn parse_history_table(json: &str) -> Result<HashMap<String, HistoricalBundle>, FeedError> {
    let raw: HashMap<String, RawHistoryEntry> = serde_json::from_str(json)
        .map_err(|e| FeedError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let mut table = HashMap::with_capacity(raw.len());

    for (station_id, entry) in raw {
        let mut measurements = BTreeMap::new();
        for m in entry.messwerte {
            measurements.insert(m.jahr, m.wert);
        }

        table.insert(
            station_id,
            HistoricalBundle {
                name: entry.messstelle.unwrap_or_default(),
                water_body: entry.gewaesser.unwrap_or_default(),
                catchment_area: entry.einzugsgebiet.unwrap_or_default(),
                operating_authority: entry.dienststelle.unwrap_or_default(),
                measurements,
            },
        );
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
