//! Water-Level Monitoring Service - Main Daemon
//!
//! A server-side daemon that continuously:
//! 1. Fetches the live pegelaktuell station feed and normalizes it
//! 2. Joins the three EHYD historical lookup documents into the features
//! 3. Decodes per-station risk codes into an alert layer
//! 4. Publishes everything as a pure-data snapshot
//! 5. Optionally serves the snapshot (plus reprojected flood-extent
//!    documents) over a JSON HTTP endpoint
//!
//! Usage:
//!   cargo run --release                    # Start daemon without HTTP endpoint
//!   cargo run --release -- --endpoint 8080 # Start with HTTP endpoint on port 8080
//!   cargo run --release -- --once          # Run a single refresh cycle and exit
//!
//! Environment:
//!   PEGELMON_API_KEY - WFS gateway key (overrides pegelmon.toml)

use pegelmon_service::config;
use pegelmon_service::daemon::{RefreshConfig, RefreshDriver};
use pegelmon_service::endpoint;
use pegelmon_service::ingest::HttpFeedSource;
use pegelmon_service::logging::{self, LogLevel};
use std::env;

fn main() {
    println!("🌊 Water-Level Monitoring Service");
    println!("==================================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port: Option<u16> = None;
    let mut run_once = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    endpoint_port = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            "--once" => {
                run_once = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--endpoint PORT] [--once]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // .env is optional; the config file carries defaults for everything else.
    dotenv::dotenv().ok();
    logging::init_logger(LogLevel::Info, None);

    println!("📊 Loading configuration...");
    let service_config = config::load_config();
    if service_config.feed.api_key.is_empty() {
        eprintln!("⚠ No WFS gateway key configured (pegelmon.toml or PEGELMON_API_KEY)");
        eprintln!("  The station feed request will likely be rejected upstream\n");
    }
    println!("✓ Configuration loaded\n");

    let zone_count = service_config.zones.document_count;
    let refresh_config = RefreshConfig {
        poll_interval_minutes: service_config.daemon.poll_interval_minutes,
    };

    let source = HttpFeedSource::new(service_config);
    let driver = RefreshDriver::with_config(source, refresh_config);

    if run_once {
        match driver.tick() {
            Ok(summary) => {
                println!(
                    "✓ Refresh complete: {} stations, {} alerts, {} records dropped",
                    summary.station_count, summary.alert_count, summary.dropped_records
                );
            }
            Err(e) => {
                eprintln!("✗ Refresh failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Start HTTP endpoint if requested (in background thread)
    if let Some(port) = endpoint_port {
        println!("🚀 Starting HTTP endpoint server...");
        let snapshot = driver.snapshot();
        let source_handle = driver.source();
        std::thread::spawn(move || {
            if let Err(e) = endpoint::start_endpoint_server(port, snapshot, source_handle, zone_count) {
                eprintln!("❌ Endpoint server error: {}", e);
            }
        });
    }

    // Run the main refresh loop
    println!("🔄 Starting continuous refresh loop...");
    println!("   Press Ctrl+C to stop\n");
    driver.run();
}
