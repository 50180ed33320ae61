/// pegelmon_service: Austrian water-level monitoring data service.
///
/// # Module structure
///
/// ```
/// pegelmon_service
/// ├── model       — shared data types (StationFeature, HistoricalBundle, FeedError, …)
/// ├── config      — endpoint/interval configuration loader (pegelmon.toml)
/// ├── logging     — structured logging with upstream-source tags
/// ├── ingest
/// │   ├── pegel    — pegelaktuell WFS feed: URL construction + normalization
/// │   ├── historic — EHYD lookup documents: maxima / minima / daily mean
/// │   └── fixtures (test only) — representative upstream payloads
/// ├── alert
/// │   └── risk    — 3-digit risk code decoding + alert layer assembly
/// ├── analysis
/// │   └── enrich  — historical join keyed by station identifier
/// ├── geo
/// │   └── reproject — EPSG:3035 → WGS84 for flood-extent documents
/// ├── daemon      — periodic refresh driver + published snapshot
/// └── endpoint    — JSON HTTP API over the latest snapshot
/// ```

/// Public modules
pub mod alert;
pub mod analysis;
pub mod config;
pub mod daemon;
pub mod endpoint;
pub mod geo;
pub mod ingest;
pub mod logging;
pub mod model;
