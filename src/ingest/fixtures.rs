/// Test fixtures: representative JSON payloads from the upstream services.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers.
///
/// pegelaktuell GetFeature response shape:
///   response.features[]
///     .properties.messstelle — station name
///     .properties.hzbnr      — national station identifier (number)
///     .properties.gewaesser  — body of water
///     .properties.wert       — water level as a STRING with a decimal COMMA,
///                              or null when the station reported nothing
///     .properties.zeitpunkt  — ISO 8601 reading timestamp
///     .properties.gesamtcode — 3-digit composite risk code (number)
///     .properties.internet   — station detail page URL
///     .properties.lon / .lat — decimal-comma coordinate strings
///
/// Note: water level, longitude and latitude are locale-formatted strings,
/// not numbers. Parsers must handle the comma-to-point conversion.

/// Five stations: three valid (Korneuburg with code 100, Hainburg without a
/// code, Graz with code 421), one with a null water level, and one whose
/// latitude does not parse. Only the three valid records may survive
/// normalization.
#[cfg(test)]
pub(crate) fn fixture_pegel_feed_json() -> &'static str {
    r#"{
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
            "gesamtcode": 100,
            "internet": "https://www.noe.gv.at/wasserstand/#/de/Messstellen/Details/207068",
            "lon": "16,3331",
            "lat": "48,3453"
          }
        },
        {
          "type": "Feature",
          "properties": {
            "messstelle": "Hainburg Strassenbruecke",
            "hzbnr": 201525,
            "gewaesser": "Donau",
            "wert": "231,8",
            "zeitpunkt": "2024-09-15T08:00:00+02:00",
            "gesamtcode": null,
            "internet": "https://www.noe.gv.at/wasserstand/#/de/Messstellen/Details/201525",
            "lon": "16,9461",
            "lat": "48,1481"
          }
        },
        {
          "type": "Feature",
          "properties": {
            "messstelle": "Graz",
            "hzbnr": 210039,
            "gewaesser": "Mur",
            "wert": "142,7",
            "zeitpunkt": "2024-09-15T07:45:00+02:00",
            "gesamtcode": 421,
            "internet": "https://wasserwirtschaft.steiermark.at/pegel/210039",
            "lon": "15,4395",
            "lat": "47,0707"
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
        },
        {
          "type": "Feature",
          "properties": {
            "messstelle": "Bregenz",
            "hzbnr": 210500,
            "gewaesser": "Bodensee",
            "wert": "395,1",
            "zeitpunkt": "2024-09-15T08:00:00+02:00",
            "gesamtcode": 200,
            "internet": "https://vogis.cnv.at/pegel/210500",
            "lon": "9,7438",
            "lat": "n.v."
          }
        }
      ]
    }"#
}

/// Monthly maxima lookup document. Korneuburg (207068) carries a duplicate
/// year (2013 appears twice) to pin the last-wins fold policy; Hainburg
/// (201525) appears ONLY here, not in the minima or daily-mean documents.
#[cfg(test)]
pub(crate) fn fixture_monthly_maxima_json() -> &'static str {
    r#"{
      "207068": {
        "messstelle": "Korneuburg",
        "gewaesser": "Donau",
        "einzugsgebiet": "96028,9 km2",
        "dienststelle": "via donau",
        "messwerte": [
          { "jahr": 2002, "wert": 612.0 },
          { "jahr": 2013, "wert": 798.0 },
          { "jahr": 2013, "wert": 805.0 },
          { "jahr": 2020, "wert": 455.5 }
        ]
      },
      "201525": {
        "messstelle": "Hainburg Strassenbruecke",
        "gewaesser": "Donau",
        "einzugsgebiet": "104452,4 km2",
        "dienststelle": "via donau",
        "messwerte": [
          { "jahr": 2013, "wert": 862.0 }
        ]
      }
    }"#
}

/// Monthly minima lookup document. Only Korneuburg is present.
#[cfg(test)]
pub(crate) fn fixture_monthly_minima_json() -> &'static str {
    r#"{
      "207068": {
        "messstelle": "Korneuburg",
        "gewaesser": "Donau",
        "einzugsgebiet": "96028,9 km2",
        "dienststelle": "via donau",
        "messwerte": [
          { "jahr": 2003, "wert": 88.0 },
          { "jahr": 2018, "wert": 95.5 }
        ]
      }
    }"#
}

/// Daily mean lookup document. Only Korneuburg is present, and its entry has
/// an empty measurement list. Metadata without values is still a valid entry.
#[cfg(test)]
pub(crate) fn fixture_daily_mean_json() -> &'static str {
    r#"{
      "207068": {
        "messstelle": "Korneuburg",
        "gewaesser": "Donau",
        "einzugsgebiet": "96028,9 km2",
        "dienststelle": "via donau",
        "messwerte": []
      }
    }"#
}

/// Flood-extent zone document in ETRS89-LAEA (EPSG:3035). Ring vertices are
/// stored as (northing, easting), so the projection origin (easting 4 321 000,
/// northing 3 210 000) appears as [3210000.0, 4321000.0]. Contains
/// a Polygon, a MultiPolygon, and a LineString that reprojection must pass
/// through unchanged.
#[cfg(test)]
pub(crate) fn fixture_zone_document_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": {
            "gml_id": "HistWater.101",
            "localId": "AT.0008.fd1c.HW101",
            "returnPeriod": 30
          },
          "geometry": {
            "type": "Polygon",
            "coordinates": [
              [
                [3210000.0, 4321000.0],
                [3210000.0, 4421000.0],
                [3310000.0, 4421000.0],
                [3310000.0, 4321000.0],
                [3210000.0, 4321000.0]
              ]
            ]
          }
        },
        {
          "type": "Feature",
          "properties": {
            "gml_id": "HistWater.102",
            "localId": "AT.0008.fd1c.HW102",
            "returnPeriod": 100
          },
          "geometry": {
            "type": "MultiPolygon",
            "coordinates": [
              [
                [
                  [3210000.0, 4321000.0],
                  [3210000.0, 4331000.0],
                  [3220000.0, 4331000.0],
                  [3210000.0, 4321000.0]
                ]
              ]
            ]
          }
        },
        {
          "type": "Feature",
          "properties": {
            "gml_id": "HistWater.103",
            "localId": "AT.0008.fd1c.HW103",
            "returnPeriod": 300
          },
          "geometry": {
            "type": "LineString",
            "coordinates": [
              [3210000.0, 4321000.0],
              [3211000.0, 4322000.0]
            ]
          }
        }
      ]
    }"#
}
