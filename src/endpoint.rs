/// HTTP endpoint for querying the published snapshot
///
/// Provides a simple REST API for map frontends and external tools to read
/// the current state of the monitoring pipeline.
///
/// Endpoints:
/// - GET /health - Service health check + snapshot age
/// - GET /stations - Latest snapshot as a GeoJSON FeatureCollection
/// - GET /stations/{hzbnr} - Single station feature
/// - GET /alerts - Decoded risk layer
/// - GET /zones/{n} - Flood-extent document n, reprojected to WGS84

use crate::daemon::SharedSnapshot;
use crate::geo::{self, ZoneFeatureCollection, reproject};
use crate::ingest::FeedSource;
use crate::model::StationFeature;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// GeoJSON assembly
// ---------------------------------------------------------------------------

/// Renders one station as a GeoJSON feature. History bundles ride along in
/// the properties so a popup can show them without a second request.
pub fn station_feature_json(feature: &StationFeature) -> serde_json::Value {
    serde_json::json!({
        "type": "Feature",
        "properties": {
            "hzbnr": feature.hzbnr,
            "name": feature.name,
            "waterBody": feature.water_body,
            "waterLevel": feature.water_level,
            "riskCode": feature.risk_code,
            "timeStamp": feature.timestamp,
            "detailsLink": feature.details_url,
            "history": feature.history,
        },
        "geometry": {
            "type": "Point",
            "coordinates": [feature.location.longitude, feature.location.latitude]
        }
    })
}

/// Renders a station list as a GeoJSON FeatureCollection. Shared with the
/// one-shot export binary.
pub fn station_collection_json(features: &[StationFeature]) -> serde_json::Value {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": features.iter().map(station_feature_json).collect::<Vec<_>>()
    })
}

fn zone_collection_json(collection: &ZoneFeatureCollection) -> serde_json::Value {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": collection
            .features
            .iter()
            .map(|f| serde_json::json!({
                "type": "Feature",
                "properties": f.properties,
                "geometry": f.geometry,
            }))
            .collect::<Vec<_>>()
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_health(snapshot: &SharedSnapshot) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let guard = snapshot.read().unwrap();
    let body = match guard.as_ref() {
        Some(snap) => serde_json::json!({
            "status": "ok",
            "service": "pegelmon_service",
            "version": env!("CARGO_PKG_VERSION"),
            "last_refresh": snap.fetched_at.to_rfc3339(),
            "station_count": snap.features.len(),
            "dropped_records": snap.dropped_records,
        }),
        None => serde_json::json!({
            "status": "starting",
            "service": "pegelmon_service",
            "version": env!("CARGO_PKG_VERSION"),
            "last_refresh": null,
        }),
    };
    create_response(200, body)
}

fn handle_stations(snapshot: &SharedSnapshot) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let guard = snapshot.read().unwrap();
    match guard.as_ref() {
        Some(snap) => create_response(200, station_collection_json(&snap.features)),
        None => create_response(
            503,
            serde_json::json!({ "error": "no snapshot published yet" }),
        ),
    }
}

fn handle_station_query(
    snapshot: &SharedSnapshot,
    raw_id: &str,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let hzbnr: i64 = match raw_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return create_response(
                400,
                serde_json::json!({ "error": "station identifier must be numeric", "hzbnr": raw_id }),
            );
        }
    };

    let guard = snapshot.read().unwrap();
    let snap = match guard.as_ref() {
        Some(snap) => snap,
        None => {
            return create_response(
                503,
                serde_json::json!({ "error": "no snapshot published yet" }),
            );
        }
    };

    match snap.features.iter().find(|f| f.hzbnr == hzbnr) {
        Some(feature) => create_response(200, station_feature_json(feature)),
        None => create_response(
            404,
            serde_json::json!({ "error": "station not in current snapshot", "hzbnr": hzbnr }),
        ),
    }
}

fn handle_alerts(snapshot: &SharedSnapshot) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let guard = snapshot.read().unwrap();
    match guard.as_ref() {
        Some(snap) => create_response(200, serde_json::json!({ "alerts": snap.alerts })),
        None => create_response(
            503,
            serde_json::json!({ "error": "no snapshot published yet" }),
        ),
    }
}

/// Fetches zone document `n` on demand, reprojects it, and serves it as
/// WGS84 GeoJSON. Zone documents are never part of the periodic cycle.
fn handle_zone_query<S: FeedSource>(
    source: &Arc<S>,
    zone_count: u32,
    raw_index: &str,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let index: u32 = match raw_index.parse() {
        Ok(v) => v,
        Err(_) => {
            return create_response(
                400,
                serde_json::json!({ "error": "zone index must be numeric", "zone": raw_index }),
            );
        }
    };

    if index >= zone_count {
        return create_response(
            404,
            serde_json::json!({ "error": "zone index out of range", "zone": index, "count": zone_count }),
        );
    }

    let result = source
        .fetch_flood_zone(index)
        .and_then(|body| geo::parse_zone_document(&body))
        .and_then(reproject::reproject_zone_collection);

    match result {
        Ok(collection) => create_response(200, zone_collection_json(&collection)),
        Err(e) => create_response(
            502,
            serde_json::json!({ "error": e.to_string(), "zone": index }),
        ),
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start the endpoint server on the specified port. Blocks the calling
/// thread; spawn it in the background next to the refresh loop.
pub fn start_endpoint_server<S: FeedSource>(
    port: u16,
    snapshot: SharedSnapshot,
    source: Arc<S>,
    zone_count: u32,
) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /health            - Service health check");
    println!("   GET /stations          - Current station FeatureCollection");
    println!("   GET /stations/{{hzbnr}}  - Single station feature");
    println!("   GET /alerts            - Decoded risk layer");
    println!("   GET /zones/{{n}}         - Reprojected flood-extent document\n");

    for request in server.incoming_requests() {
        let url = request.url().to_string();

        let response = if url == "/health" {
            handle_health(&snapshot)
        } else if url == "/stations" {
            handle_stations(&snapshot)
        } else if let Some(id) = url.strip_prefix("/stations/") {
            handle_station_query(&snapshot, id)
        } else if url == "/alerts" {
            handle_alerts(&snapshot)
        } else if let Some(index) = url.strip_prefix("/zones/") {
            handle_zone_query(&source, zone_count, index)
        } else {
            create_response(
                404,
                serde_json::json!({
                    "error": "Not found",
                    "available_endpoints": ["/health", "/stations", "/stations/{hzbnr}", "/alerts", "/zones/{n}"]
                }),
            )
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Create HTTP response with JSON body
fn create_response(
    status_code: u16,
    json: serde_json::Value,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap();
    let bytes = body.into_bytes();

    tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeoPoint, StationFeature};

    fn sample_feature() -> StationFeature {
        StationFeature {
            hzbnr: 207068,
            name: "Korneuburg".to_string(),
            water_body: "Donau".to_string(),
            water_level: 184.3,
            location: GeoPoint { longitude: 16.3331, latitude: 48.3453 },
            risk_code: Some(100),
            timestamp: "2024-09-15T08:00:00+02:00".to_string(),
            details_url: "https://example.test/207068".to_string(),
            history: None,
        }
    }

    #[test]
    fn test_station_feature_json_shape() {
        let json = station_feature_json(&sample_feature());

        assert_eq!(json["type"], "Feature");
        assert_eq!(json["properties"]["name"], "Korneuburg");
        assert_eq!(json["properties"]["waterLevel"], 184.3);
        assert_eq!(json["geometry"]["type"], "Point");
        // GeoJSON axis order: longitude first.
        assert_eq!(json["geometry"]["coordinates"][0], 16.3331);
        assert_eq!(json["geometry"]["coordinates"][1], 48.3453);
    }

    #[test]
    fn test_station_collection_wraps_all_features() {
        let json = station_collection_json(&[sample_feature(), sample_feature()]);
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_zone_collection_json_round_trips_geometry() {
        let collection = ZoneFeatureCollection {
            features: vec![crate::geo::ZoneFeature {
                properties: Default::default(),
                geometry: crate::geo::Geometry::Point(vec![16.37, 48.21]),
            }],
        };
        let json = zone_collection_json(&collection);
        assert_eq!(json["features"][0]["geometry"]["type"], "Point");
        assert_eq!(json["features"][0]["geometry"]["coordinates"][0], 16.37);
    }
}
