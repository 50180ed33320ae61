//! One-shot snapshot export.
//!
//! Runs a single fetch → normalize → join cycle against the configured
//! upstream services and prints the resulting station FeatureCollection to
//! stdout as GeoJSON. Useful for smoke-testing the pipeline and for feeding
//! static map tooling without running the daemon.
//!
//! Usage:
//!   cargo run --bin export_snapshot > stations.geojson

use pegelmon_service::config;
use pegelmon_service::daemon::RefreshDriver;
use pegelmon_service::endpoint;
use pegelmon_service::ingest::HttpFeedSource;
use pegelmon_service::logging::{self, LogLevel};

fn main() {
    dotenv::dotenv().ok();
    // Keep stdout clean for the GeoJSON; warnings still reach stderr.
    logging::init_logger(LogLevel::Error, None);

    let service_config = config::load_config();
    let driver = RefreshDriver::new(HttpFeedSource::new(service_config));

    match driver.tick() {
        Ok(summary) => {
            let snapshot_handle = driver.snapshot();
            let guard = snapshot_handle.read().unwrap();
            let snapshot = guard.as_ref().expect("successful tick publishes a snapshot");

            let collection = endpoint::station_collection_json(&snapshot.features);
            println!("{}", serde_json::to_string_pretty(&collection).unwrap());

            eprintln!(
                "exported {} stations ({} alerts, {} raw records dropped)",
                summary.station_count, summary.alert_count, summary.dropped_records
            );
        }
        Err(e) => {
            eprintln!("export failed: {}", e);
            std::process::exit(1);
        }
    }
}
