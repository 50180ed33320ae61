/// ETRS89-LAEA (EPSG:3035) → WGS84 reprojection of flood-extent geometry.
///
/// The zone documents store polygon rings in the pan-European equal-area
/// CRS, and each ring vertex is written as (northing, easting): the SECOND
/// array element is the projection x and the first is y. That swap is a fact
/// of the upstream geometry store and must be reproduced exactly; feeding
/// the elements in array order mirrors every polygon across the 45° axis.
///
/// Output vertices are always (longitude, latitude), for Polygon and
/// MultiPolygon alike, so downstream consumers receive plain GeoJSON-order
/// coordinates.
///
/// Reprojection is NOT idempotent: the output carries no CRS marker, and
/// running a collection through here twice produces garbage coordinates.
/// Callers apply it exactly once, directly after fetching a document.

use crate::geo::{Geometry, ZoneFeature, ZoneFeatureCollection};
use crate::model::FeedError;
use proj4rs::Proj;
use proj4rs::transform::transform;

/// ETRS89-LAEA Europe (EPSG:3035): azimuthal equal-area centred on 52°N 10°E
/// with false easting 4 321 000 m and false northing 3 210 000 m on GRS80.
const SOURCE_CRS: &str =
    "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +units=m +no_defs";

/// Geographic WGS84.
const TARGET_CRS: &str = "+proj=longlat +datum=WGS84 +no_defs";

// ---------------------------------------------------------------------------
// Collection reprojection
// ---------------------------------------------------------------------------

/// Reprojects every Polygon and MultiPolygon in a zone collection to WGS84.
/// Other geometry types pass through unchanged.
///
/// Pure function over the collection; safe to run per-feature in parallel.
pub fn reproject_zone_collection(
    collection: ZoneFeatureCollection,
) -> Result<ZoneFeatureCollection, FeedError> {
    let source = Proj::from_proj_string(SOURCE_CRS)
        .map_err(|e| FeedError::Projection(format!("source CRS: {:?}", e)))?;
    let target = Proj::from_proj_string(TARGET_CRS)
        .map_err(|e| FeedError::Projection(format!("target CRS: {:?}", e)))?;

    let features = collection
        .features
        .into_iter()
        .map(|feature| reproject_feature(&source, &target, feature))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ZoneFeatureCollection { features })
}

fn reproject_feature(
    source: &Proj,
    target: &Proj,
    feature: ZoneFeature,
) -> Result<ZoneFeature, FeedError> {
    let geometry = match feature.geometry {
        Geometry::Polygon(rings) => Geometry::Polygon(reproject_rings(source, target, rings)?),
        Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
            polygons
                .into_iter()
                .map(|rings| reproject_rings(source, target, rings))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => other,
    };

    Ok(ZoneFeature {
        properties: feature.properties,
        geometry,
    })
}

fn reproject_rings(
    source: &Proj,
    target: &Proj,
    rings: Vec<Vec<Vec<f64>>>,
) -> Result<Vec<Vec<Vec<f64>>>, FeedError> {
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .map(|vertex| reproject_vertex(source, target, &vertex))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

/// Reprojects a single stored (northing, easting) vertex to (lon, lat).
fn reproject_vertex(source: &Proj, target: &Proj, vertex: &[f64]) -> Result<Vec<f64>, FeedError> {
    if vertex.len() < 2 {
        return Err(FeedError::Projection(format!(
            "ring vertex has {} coordinate(s), need 2",
            vertex.len()
        )));
    }

    // Stored order is (northing, easting); the projection wants (x, y).
    let mut point = (vertex[1], vertex[0], 0.0);
    transform(source, target, &mut point)
        .map_err(|e| FeedError::Projection(format!("{:?}", e)))?;

    // Geographic output from proj4rs is in radians.
    Ok(vec![point.0.to_degrees(), point.1.to_degrees()])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::parse_zone_document;
    use crate::ingest::fixtures::fixture_zone_document_json;

    fn fixture_collection() -> ZoneFeatureCollection {
        parse_zone_document(fixture_zone_document_json()).expect("fixture should parse")
    }

    fn first_polygon_ring(collection: &ZoneFeatureCollection) -> &Vec<Vec<f64>> {
        match &collection.features[0].geometry {
            Geometry::Polygon(rings) => &rings[0],
            other => panic!("expected Polygon, got {:?}", other),
        }
    }

    // --- Ground truth -------------------------------------------------------

    #[test]
    fn test_projection_origin_maps_to_10e_52n() {
        // The false origin (easting 4 321 000, northing 3 210 000) is the
        // projection centre by definition, so it must land on 10°E / 52°N.
        // This pins both the (northing, easting) input order and the
        // (lon, lat) output order.
        let reprojected = reproject_zone_collection(fixture_collection()).expect("should succeed");
        let origin = &first_polygon_ring(&reprojected)[0];

        assert!(
            (origin[0] - 10.0).abs() < 1e-3,
            "origin longitude should be ~10°E, got {}",
            origin[0]
        );
        assert!(
            (origin[1] - 52.0).abs() < 1e-3,
            "origin latitude should be ~52°N, got {}",
            origin[1]
        );
    }

    #[test]
    fn test_point_100km_east_of_origin() {
        // Second fixture vertex is 100 km due east of the false origin:
        // roughly 1.46° of longitude at 52°N, latitude nearly unchanged.
        let reprojected = reproject_zone_collection(fixture_collection()).expect("should succeed");
        let east = &first_polygon_ring(&reprojected)[1];

        assert!(
            (east[0] - 11.457).abs() < 0.02,
            "longitude ~100km east of origin should be ~11.46°E, got {}",
            east[0]
        );
        assert!(
            (east[1] - 51.989).abs() < 0.02,
            "latitude should stay ~52°N, got {}",
            east[1]
        );
    }

    // --- Axis-order consistency ---------------------------------------------

    #[test]
    fn test_polygon_and_multipolygon_share_output_order() {
        // Both geometry kinds start at the false origin in the fixture, so
        // after reprojection their first vertices must be identical, and in
        // (lon, lat) order for both.
        let reprojected = reproject_zone_collection(fixture_collection()).expect("should succeed");

        let polygon_first = first_polygon_ring(&reprojected)[0].clone();
        let multipolygon_first = match &reprojected.features[1].geometry {
            Geometry::MultiPolygon(polygons) => polygons[0][0][0].clone(),
            other => panic!("expected MultiPolygon, got {:?}", other),
        };

        assert!(
            (polygon_first[0] - multipolygon_first[0]).abs() < 1e-9
                && (polygon_first[1] - multipolygon_first[1]).abs() < 1e-9,
            "Polygon and MultiPolygon must agree on output axis order: {:?} vs {:?}",
            polygon_first,
            multipolygon_first
        );
        assert!(
            polygon_first[1] > polygon_first[0],
            "for Austria-region data latitude (~52) exceeds longitude (~10); \
             a swapped pair would invert this"
        );
    }

    // --- Pass-through and edge cases ----------------------------------------

    #[test]
    fn test_non_polygon_geometry_passes_through_unchanged() {
        let original = fixture_collection();
        let original_line = original.features[2].geometry.clone();

        let reprojected = reproject_zone_collection(original).expect("should succeed");
        assert_eq!(
            reprojected.features[2].geometry, original_line,
            "LineString coordinates must not be touched"
        );
    }

    #[test]
    fn test_properties_survive_reprojection() {
        let reprojected = reproject_zone_collection(fixture_collection()).expect("should succeed");
        assert_eq!(reprojected.features[0].properties.return_period, Some(30));
        assert_eq!(
            reprojected.features[1].properties.gml_id.as_deref(),
            Some("HistWater.102")
        );
    }

    #[test]
    fn test_short_vertex_is_a_projection_error() {
        let collection = ZoneFeatureCollection {
            features: vec![ZoneFeature {
                properties: Default::default(),
                geometry: Geometry::Polygon(vec![vec![vec![3210000.0]]]),
            }],
        };
        let result = reproject_zone_collection(collection);
        assert!(
            matches!(result, Err(FeedError::Projection(_))),
            "a one-element vertex cannot be reprojected, got {:?}",
            result
        );
    }

    #[test]
    fn test_empty_collection_reprojects_to_empty() {
        let collection = ZoneFeatureCollection { features: vec![] };
        let reprojected = reproject_zone_collection(collection).expect("should succeed");
        assert!(reprojected.features.is_empty());
    }
}
