/// Service configuration loader - parses pegelmon.toml
///
/// Separates upstream endpoint URLs and polling cadence from code, making it
/// easy to point the service at a mirror or adjust the refresh interval
/// without recompiling.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Default configuration file, expected in the working directory.
const CONFIG_PATH: &str = "pegelmon.toml";

/// Environment variable that overrides the WFS gateway key.
const API_KEY_ENV: &str = "PEGELMON_API_KEY";

// ---------------------------------------------------------------------------
// TOML structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub historic: HistoricConfig,
    #[serde(default)]
    pub zones: ZonesConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
}

/// Live station feed (WFS GetFeature gateway).
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
    /// Gateway access key. `PEGELMON_API_KEY` in the environment wins over
    /// the file value.
    pub api_key: String,
    /// WFS feature type to request.
    pub type_name: String,
}

/// Historical lookup documents (monthly maxima / minima, daily mean).
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricConfig {
    pub base_url: String,
}

/// Historical flood-extent documents, numbered GeoJSON files in EPSG:3035.
#[derive(Debug, Clone, Deserialize)]
pub struct ZonesConfig {
    pub base_url: String,
    /// Number of zone documents published upstream (indices 0..count).
    pub document_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub poll_interval_minutes: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gis.lfrz.gv.at/wmsgw/".to_string(),
            api_key: String::new(),
            type_name: "inspire:pegelaktuell".to_string(),
        }
    }
}

impl Default for HistoricConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ehyd.gv.at/eHYD/MessstellenExtraData".to_string(),
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ehyd.gv.at/eHYD/HistWater".to_string(),
            document_count: 77,
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            // Matches the upstream publication cadence of pegelaktuell.
            poll_interval_minutes: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads service configuration from `pegelmon.toml` in the working directory,
/// falling back to built-in defaults when the file does not exist.
///
/// # Panics
/// Panics if the file exists but is malformed. This is intentional: running
/// with a half-read configuration would silently poll the wrong endpoints.
pub fn load_config() -> ServiceConfig {
    let mut config = if Path::new(CONFIG_PATH).exists() {
        let contents = fs::read_to_string(CONFIG_PATH)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", CONFIG_PATH, e));
        toml::from_str(&contents)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", CONFIG_PATH, e))
    } else {
        ServiceConfig::default()
    };

    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.is_empty() {
            config.feed.api_key = key;
        }
    }

    config
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_the_austrian_services() {
        let config = ServiceConfig::default();
        assert!(config.feed.base_url.contains("gis.lfrz.gv.at"));
        assert_eq!(config.feed.type_name, "inspire:pegelaktuell");
        assert!(config.historic.base_url.contains("ehyd"));
    }

    #[test]
    fn test_default_poll_interval_is_ten_minutes() {
        assert_eq!(DaemonConfig::default().poll_interval_minutes, 10);
    }

    #[test]
    fn test_default_zone_document_count() {
        assert_eq!(ZonesConfig::default().document_count, 77);
    }

    #[test]
    fn test_partial_toml_fills_missing_sections_with_defaults() {
        let parsed: ServiceConfig = toml::from_str(
            r#"
            [daemon]
            poll_interval_minutes = 5
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(parsed.daemon.poll_interval_minutes, 5);
        assert_eq!(parsed.feed.type_name, "inspire:pegelaktuell");
        assert_eq!(parsed.zones.document_count, 77);
    }

    #[test]
    fn test_full_toml_overrides_every_section() {
        let parsed: ServiceConfig = toml::from_str(
            r#"
            [feed]
            base_url = "https://mirror.example/wfs/"
            api_key = "abc123"
            type_name = "inspire:pegelaktuell"

            [historic]
            base_url = "https://mirror.example/historic"

            [zones]
            base_url = "https://mirror.example/zones"
            document_count = 12

            [daemon]
            poll_interval_minutes = 30
            "#,
        )
        .expect("full config should parse");

        assert_eq!(parsed.feed.base_url, "https://mirror.example/wfs/");
        assert_eq!(parsed.feed.api_key, "abc123");
        assert_eq!(parsed.zones.document_count, 12);
        assert_eq!(parsed.daemon.poll_interval_minutes, 30);
    }
}
