//! Composite risk code decoding.
//!
//! Every station in the live feed may carry a 3-digit code packing three
//! separate signals, read left to right:
//!
//!   digit 1 — severity:  1 Low, 2-3 Medium, 4-6 High, 9 No Data
//!   digit 2 — trend:     1 Rising, 2 Falling
//!   digit 3 — freshness: 1 Stale
//!
//! Later digits override earlier ones: freshness beats trend beats severity.
//! A stale reading is the most operationally relevant state regardless of
//! what level it reported, so the override order must stay exactly as is.

use crate::model::{GeoPoint, StationFeature};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Decoded alert category for one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    #[serde(rename = "No Data")]
    NoData,
    Normal,
    Rising,
    Falling,
    Stale,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::Low => write!(f, "Low"),
            RiskCategory::Medium => write!(f, "Medium"),
            RiskCategory::High => write!(f, "High"),
            RiskCategory::NoData => write!(f, "No Data"),
            RiskCategory::Normal => write!(f, "Normal"),
            RiskCategory::Rising => write!(f, "Rising"),
            RiskCategory::Falling => write!(f, "Falling"),
            RiskCategory::Stale => write!(f, "Stale"),
        }
    }
}

/// An alert marker derived from one station feature. Never stored; rebuilt
/// from the features on every refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub station_name: String,
    pub location: GeoPoint,
    pub category: RiskCategory,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes a composite risk code into a category.
///
/// Returns `None` when the code is absent or its decimal string form is not
/// exactly 3 characters. Callers must treat that as "omit from the alert
/// layer", not as an error.
pub fn decode_risk_code(code: Option<i64>) -> Option<RiskCategory> {
    let code = code?;
    let digits = code.to_string();
    if digits.len() != 3 {
        return None;
    }

    let mut chars = digits.chars();
    let severity = chars.next().and_then(|c| c.to_digit(10));
    let trend = chars.next().and_then(|c| c.to_digit(10));
    let freshness = chars.next().and_then(|c| c.to_digit(10));

    let mut category = match severity {
        Some(1) => RiskCategory::Low,
        Some(2) | Some(3) => RiskCategory::Medium,
        Some(4..=6) => RiskCategory::High,
        Some(9) => RiskCategory::NoData,
        _ => RiskCategory::Normal,
    };

    match trend {
        Some(1) => category = RiskCategory::Rising,
        Some(2) => category = RiskCategory::Falling,
        _ => {}
    }

    if freshness == Some(1) {
        category = RiskCategory::Stale;
    }

    Some(category)
}

/// Builds the alert marker for one station, or `None` when its code does not
/// decode.
pub fn assess(feature: &StationFeature) -> Option<RiskAssessment> {
    decode_risk_code(feature.risk_code).map(|category| RiskAssessment {
        station_name: feature.name.clone(),
        location: feature.location,
        category,
    })
}

/// Builds the alert layer for a feature list. Stations without a decodable
/// code are simply omitted.
pub fn build_alerts(features: &[StationFeature]) -> Vec<RiskAssessment> {
    features.iter().filter_map(assess).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
