/// pegelaktuell WFS client: URL construction + feed normalization.
///
/// The live station dataset is published through a WFS gateway:
///   https://gis.lfrz.gv.at/wmsgw/?key=...&request=GetFeature&...
///
/// The GetFeature response is a GeoJSON-shaped feature list whose numeric
/// properties arrive as locale-formatted strings: water level, longitude and
/// latitude all use a decimal comma ("184,3"). See `fixtures.rs` for
/// annotated examples of the response structure.

use crate::config::FeedConfig;
use crate::model::{FeedError, GeoPoint, StationFeature};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde structures for the WFS GetFeature response
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FeedResponse {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    properties: RawProperties,
}

/// One raw station record. Every field is optional: upstream regularly ships
/// records with a null level or empty coordinates, and those must be filtered
/// rather than fail the whole response.
#[derive(Deserialize)]
struct RawProperties {
    /// Station name (measuring site).
    messstelle: Option<String>,
    /// National station identifier (HZB number).
    hzbnr: Option<i64>,
    /// Monitored body of water.
    gewaesser: Option<String>,
    /// Water level as a decimal-comma string, e.g. "184,3". Null when the
    /// station reported no value.
    wert: Option<String>,
    /// Reading timestamp, ISO 8601.
    zeitpunkt: Option<String>,
    /// 3-digit composite risk code.
    gesamtcode: Option<i64>,
    /// Link to the station detail page.
    internet: Option<String>,
    /// Decimal-comma longitude string.
    lon: Option<String>,
    /// Decimal-comma latitude string.
    lat: Option<String>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the WFS GetFeature URL for the live station feed.
///
/// The returned URL always requests WFS 2.0.0 with JSON output. The gateway
/// key and feature type come from configuration; both are percent-encoded.
pub fn build_feed_url(config: &FeedConfig) -> String {
    format!(
        "{}?key={}&request=GetFeature&service=WFS&version=2.0.0&outputFormat=json&typeNames={}",
        config.base_url,
        urlencoding::encode(&config.api_key),
        urlencoding::encode(&config.type_name),
    )
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Output of one normalization pass: the surviving features plus how many
/// raw records were excluded. The count exists purely for observability;
/// dropped records are never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFeed {
    pub features: Vec<StationFeature>,
    pub dropped: usize,
}

/// Parses a decimal-comma numeric string ("184,3") into a finite float.
///
/// Returns `None` for anything that does not parse to a finite number after
/// the comma-to-point conversion.
fn parse_decimal_comma(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Parses a pegelaktuell GetFeature response body into normalized
/// `StationFeature`s.
///
/// A record survives only if
///   - its water-level field is present and parses to a finite number,
///   - longitude and latitude both parse to finite numbers, and
///   - it carries a station identifier (required for the historical join).
/// Everything else is silently excluded and counted in `dropped`.
///
/// # Errors
/// - `FeedError::ParseError` — the response body is not the expected JSON
///   envelope. Individual malformed records never cause an error.
pub fn parse_feed_response(json: &str) -> Result<NormalizedFeed, FeedError> {
    let response: FeedResponse = serde_json::from_str(json)
        .map_err(|e| FeedError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let total = response.features.len();
    let mut features = Vec::new();

    for raw in response.features {
        let props = raw.properties;

        let longitude = match props.lon.as_deref().and_then(parse_decimal_comma) {
            Some(v) => v,
            None => continue,
        };
        let latitude = match props.lat.as_deref().and_then(parse_decimal_comma) {
            Some(v) => v,
            None => continue,
        };
        let water_level = match props.wert.as_deref().and_then(parse_decimal_comma) {
            Some(v) => v,
            None => continue,
        };
        let hzbnr = match props.hzbnr {
            Some(v) => v,
            None => continue,
        };

        features.push(StationFeature {
            hzbnr,
            name: props.messstelle.unwrap_or_default(),
            water_body: props.gewaesser.unwrap_or_default(),
            water_level,
            location: GeoPoint { longitude, latitude },
            risk_code: props.gesamtcode,
            timestamp: props.zeitpunkt.unwrap_or_default(),
            details_url: props.internet.unwrap_or_default(),
            history: None,
        });
    }

    Ok(NormalizedFeed {
        dropped: total - features.len(),
        features,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
