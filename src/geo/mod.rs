/// Geometry model for the flood-extent zone documents.
///
/// Zone documents are GeoJSON FeatureCollections whose coordinates are in
/// ETRS89-LAEA (EPSG:3035) metres. The `Geometry` enum mirrors the GeoJSON
/// geometry object exactly (`{"type": ..., "coordinates": ...}`), so serde
/// round-trips it without any custom code. Reprojection to WGS84 lives in
/// `reproject`.

pub mod reproject;

use crate::model::FeedError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A GeoJSON geometry object. Positions are kept as raw coordinate arrays;
/// which axis means what depends on the document's CRS (see `reproject`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Vec<f64>),
    MultiPoint(Vec<Vec<f64>>),
    LineString(Vec<Vec<f64>>),
    MultiLineString(Vec<Vec<Vec<f64>>>),
    Polygon(Vec<Vec<Vec<f64>>>),
    MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

// ---------------------------------------------------------------------------
// Zone features
// ---------------------------------------------------------------------------

/// Properties carried by a historical flood-extent feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneProperties {
    pub gml_id: Option<String>,
    #[serde(rename = "localId")]
    pub local_id: Option<String>,
    /// Statistical return period of the flood extent in years (30/100/300).
    #[serde(rename = "returnPeriod")]
    pub return_period: Option<i64>,
}

/// One flood-extent feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneFeature {
    #[serde(default)]
    pub properties: ZoneProperties,
    pub geometry: Geometry,
}

/// A parsed zone document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneFeatureCollection {
    pub features: Vec<ZoneFeature>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses a zone document body into a feature collection, coordinates still
/// in the source CRS.
///
/// # Errors
/// - `FeedError::ParseError` — not a GeoJSON FeatureCollection, or a geometry
///   type outside the GeoJSON vocabulary.
pub fn parse_zone_document(json: &str) -> Result<ZoneFeatureCollection, FeedError> {
    serde_json::from_str(json)
        .map_err(|e| FeedError::ParseError(format!("JSON deserialization failed: {}", e)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::fixture_zone_document_json;

    #[test]
    fn test_parse_zone_document_reads_all_features() {
        let collection = parse_zone_document(fixture_zone_document_json())
            .expect("valid fixture should parse");
        assert_eq!(collection.features.len(), 3);
    }

    #[test]
    fn test_parse_zone_document_keeps_properties() {
        let collection = parse_zone_document(fixture_zone_document_json()).unwrap();
        let first = &collection.features[0];
        assert_eq!(first.properties.gml_id.as_deref(), Some("HistWater.101"));
        assert_eq!(first.properties.local_id.as_deref(), Some("AT.0008.fd1c.HW101"));
        assert_eq!(first.properties.return_period, Some(30));
    }

    #[test]
    fn test_geometry_enum_matches_geojson_tagging() {
        let collection = parse_zone_document(fixture_zone_document_json()).unwrap();
        assert!(matches!(collection.features[0].geometry, Geometry::Polygon(_)));
        assert!(matches!(collection.features[1].geometry, Geometry::MultiPolygon(_)));
        assert!(matches!(collection.features[2].geometry, Geometry::LineString(_)));
    }

    #[test]
    fn test_geometry_serializes_back_to_tagged_form() {
        let geometry = Geometry::Point(vec![16.37, 48.21]);
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], 16.37);
    }

    #[test]
    fn test_parse_rejects_unknown_geometry_type() {
        let result = parse_zone_document(
            r#"{ "features": [ { "geometry": { "type": "Hypercube", "coordinates": [] } } ] }"#,
        );
        assert!(matches!(result, Err(FeedError::ParseError(_))));
    }
}
