//! Full-pipeline integration tests.
//!
//! Drives the refresh driver through complete fetch → normalize → join →
//! publish cycles using a scripted `FeedSource`, without touching the
//! network. The scenarios here mirror daemon behavior over several ticks;
//! single-function behavior is covered by the unit tests next to each module.

use pegelmon_service::daemon::RefreshDriver;
use pegelmon_service::endpoint;
use pegelmon_service::ingest::FeedSource;
use pegelmon_service::model::{FeedError, HistoryKind};
use std::collections::VecDeque;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// Two stations: Korneuburg (code 310 → Rising after the trend override) and
/// a second record with a null water level that normalization must drop.
const FEED_BODY: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {
        "messstelle": "Korneuburg",
        "hzbnr": 207068,
        "gewaesser": "Donau",
        "wert": "184,3",
        "zeitpunkt": "2024-09-15T08:00:00+02:00",
        "gesamtcode": 310,
        "internet": "https://www.noe.gv.at/wasserstand/#/de/Messstellen/Details/207068",
        "lon": "16,3331",
        "lat": "48,3453"
      }
    },
    {
      "type": "Feature",
      "properties": {
        "messstelle": "Lienz",
        "hzbnr": 205914,
        "gewaesser": "Isel",
        "wert": null,
        "zeitpunkt": "2024-09-15T08:00:00+02:00",
        "gesamtcode": 900,
        "internet": "https://www.tirol.gv.at/wasserstand/205914",
        "lon": "12,7697",
        "lat": "46,8292"
      }
    }
  ]
}"#;

/// Korneuburg appears only in the maxima document.
const MAXIMA_BODY: &str = r#"{
  "207068": {
    "messstelle": "Korneuburg",
    "gewaesser": "Donau",
    "einzugsgebiet": "96028,9 km2",
    "dienststelle": "via donau",
    "messwerte": [ { "jahr": 2013, "wert": 805.0 } ]
  }
}"#;

struct ScriptedSource {
    feed_bodies: Mutex<VecDeque<Result<String, FeedError>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<String, FeedError>>) -> Self {
        Self {
            feed_bodies: Mutex::new(script.into()),
        }
    }
}

impl FeedSource for ScriptedSource {
    fn fetch_station_feed(&self) -> Result<String, FeedError> {
        self.feed_bodies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FeedError::Transport("script exhausted".to_string())))
    }

    fn fetch_history_table(&self, kind: HistoryKind) -> Result<String, FeedError> {
        Ok(match kind {
            HistoryKind::MonthlyMaxima => MAXIMA_BODY.to_string(),
            _ => "{}".to_string(),
        })
    }

    fn fetch_flood_zone(&self, _index: u32) -> Result<String, FeedError> {
        Err(FeedError::HttpError(404))
    }
}

fn ok_feed() -> Result<String, FeedError> {
    Ok(FEED_BODY.to_string())
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn full_cycle_publishes_joined_features_and_alerts() {
    let driver = RefreshDriver::new(ScriptedSource::new(vec![ok_feed()]));
    let summary = driver.tick().expect("cycle should succeed");

    assert_eq!(summary.station_count, 1, "the null-level record must be dropped");
    assert_eq!(summary.dropped_records, 1);
    assert_eq!(summary.alert_count, 1);

    let snapshot_handle = driver.snapshot();
    let guard = snapshot_handle.read().unwrap();
    let snapshot = guard.as_ref().expect("snapshot published");

    let station = &snapshot.features[0];
    assert_eq!(station.hzbnr, 207068);
    assert!((station.water_level - 184.3).abs() < 1e-9);

    let history = station.history.as_ref().expect("history joined");
    assert_eq!(history.monthly_maxima.measurements.get(&2013), Some(&805.0));
    assert!(
        history.monthly_minima.is_empty() && history.daily_mean.is_empty(),
        "missing lookup entries must become empty placeholders"
    );

    // Code 310: severity Medium, overridden by trend digit 1 → Rising.
    assert_eq!(snapshot.alerts[0].category.to_string(), "Rising");
    assert_eq!(snapshot.alerts[0].station_name, "Korneuburg");
}

#[test]
fn a_rejected_fetch_in_the_middle_tick_does_not_cancel_later_ticks() {
    let driver = RefreshDriver::new(ScriptedSource::new(vec![
        ok_feed(),
        Err(FeedError::Transport("connection refused".to_string())),
        ok_feed(),
    ]));

    assert!(driver.tick().is_ok(), "tick 1 should succeed");
    assert!(driver.tick().is_err(), "tick 2 should fail");

    let third = driver.tick();
    assert!(third.is_ok(), "tick 3 must still produce output, got {:?}", third);

    let snapshot_handle = driver.snapshot();
    let guard = snapshot_handle.read().unwrap();
    assert!(
        guard.is_some(),
        "a snapshot from a successful tick must remain published"
    );
}

#[test]
fn published_snapshot_renders_as_geojson() {
    let driver = RefreshDriver::new(ScriptedSource::new(vec![ok_feed()]));
    driver.tick().expect("cycle should succeed");

    let snapshot_handle = driver.snapshot();
    let guard = snapshot_handle.read().unwrap();
    let snapshot = guard.as_ref().unwrap();

    let collection = endpoint::station_collection_json(&snapshot.features);
    assert_eq!(collection["type"], "FeatureCollection");

    let feature = &collection["features"][0];
    assert_eq!(feature["type"], "Feature");
    assert_eq!(feature["properties"]["name"], "Korneuburg");
    // Longitude first, latitude second.
    assert_eq!(feature["geometry"]["coordinates"][0], 16.3331);
    assert_eq!(feature["geometry"]["coordinates"][1], 48.3453);
    assert!(
        feature["properties"]["history"]["monthly_maxima"]["measurements"]["2013"].is_number(),
        "joined history must serialize into the feature properties"
    );
}
