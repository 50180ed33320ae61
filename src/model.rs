/// Core data types for the Austrian water-level monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic and no I/O, only types and their trait impls.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Geographic primitives
// ---------------------------------------------------------------------------

/// A WGS84 point. Axis order is (longitude, latitude), matching GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

// ---------------------------------------------------------------------------
// Station types
// ---------------------------------------------------------------------------

/// A normalized live reading from one hydrographic gauge station.
///
/// Produced by `ingest::pegel::parse_feed_response` from the raw WFS payload.
/// Raw records whose water level is null or whose coordinates do not parse to
/// finite numbers never become a `StationFeature`; they are dropped during
/// normalization and only show up in the dropped-record count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationFeature {
    /// HZB number, the national station identifier. Shared with the
    /// historical lookup documents.
    pub hzbnr: i64,
    /// Station name (usually the nearest town or measuring site).
    pub name: String,
    /// Name of the monitored body of water.
    pub water_body: String,
    /// Current water level in centimetres.
    pub water_level: f64,
    /// Station location in WGS84.
    pub location: GeoPoint,
    /// 3-digit composite risk code, when the feed supplies one.
    pub risk_code: Option<i64>,
    /// Timestamp of the reading as reported upstream (ISO 8601).
    pub timestamp: String,
    /// Link to the station detail page.
    pub details_url: String,
    /// Historical measurement bundles, attached by `analysis::enrich`.
    /// `None` until the join has run for this cycle.
    pub history: Option<StationHistory>,
}

// ---------------------------------------------------------------------------
// Historical lookup types
// ---------------------------------------------------------------------------

/// The three historical lookup documents published alongside the live feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    MonthlyMaxima,
    MonthlyMinima,
    DailyMean,
}

impl HistoryKind {
    pub const ALL: [HistoryKind; 3] = [
        HistoryKind::MonthlyMaxima,
        HistoryKind::MonthlyMinima,
        HistoryKind::DailyMean,
    ];

    /// File name of the lookup document on the EHYD host.
    pub fn document_name(self) -> &'static str {
        match self {
            HistoryKind::MonthlyMaxima => "monatsmaxima.json",
            HistoryKind::MonthlyMinima => "monatsminima.json",
            HistoryKind::DailyMean => "tagesmittel.json",
        }
    }
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryKind::MonthlyMaxima => write!(f, "monthly maxima"),
            HistoryKind::MonthlyMinima => write!(f, "monthly minima"),
            HistoryKind::DailyMean => write!(f, "daily mean"),
        }
    }
}

/// Station metadata plus year-keyed measurements for one measurement kind.
///
/// Stations absent from a lookup document get `HistoricalBundle::empty()`
/// attached instead; a missing history is not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoricalBundle {
    pub name: String,
    pub water_body: String,
    pub catchment_area: String,
    pub operating_authority: String,
    /// Year → measured value. Duplicate years in the source document
    /// overwrite earlier entries (last wins).
    pub measurements: BTreeMap<i32, f64>,
}

impl HistoricalBundle {
    /// Placeholder attached when a station has no entry in a lookup document.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.measurements.is_empty()
    }
}

/// All three historical bundles for one station, attached during the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationHistory {
    pub monthly_maxima: HistoricalBundle,
    pub monthly_minima: HistoricalBundle,
    pub daily_mean: HistoricalBundle,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or processing upstream documents.
#[derive(Debug, PartialEq)]
pub enum FeedError {
    /// Non-2xx HTTP response from an upstream service.
    HttpError(u16),
    /// Transport-level failure (DNS, TLS, connection reset, ...).
    Transport(String),
    /// A response body could not be deserialized or was structurally invalid.
    ParseError(String),
    /// Coordinate reprojection failed for a zone document.
    Projection(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::HttpError(code) => write!(f, "HTTP error: {}", code),
            FeedError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FeedError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            FeedError::Projection(msg) => write!(f, "Projection error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
