/// Data acquisition layer.
///
/// Each upstream service gets its own file: `pegel` for the live WFS station
/// feed, `historic` for the three EHYD lookup documents. `fixtures` holds
/// test-only payloads.
///
/// The `FeedSource` trait is the seam between transport and parsing: it
/// returns raw response bodies, and the per-source modules turn those into
/// domain types. The daemon and endpoint are generic over it, which keeps the
/// full refresh cycle testable without a network.

pub mod fixtures;
pub mod historic;
pub mod pegel;

use crate::config::ServiceConfig;
use crate::model::{FeedError, HistoryKind};

// ---------------------------------------------------------------------------
// FeedSource trait
// ---------------------------------------------------------------------------

/// Fetches raw upstream documents. Implementations return the response body
/// as text; parsing stays with the per-source modules.
pub trait FeedSource {
    /// The live pegelaktuell station feed.
    fn fetch_station_feed(&self) -> Result<String, FeedError>;

    /// One of the three historical lookup documents.
    fn fetch_history_table(&self, kind: HistoryKind) -> Result<String, FeedError>;

    /// A numbered flood-extent zone document (EPSG:3035 GeoJSON).
    fn fetch_flood_zone(&self, index: u32) -> Result<String, FeedError>;
}

// ---------------------------------------------------------------------------
// Blocking HTTP implementation
// ---------------------------------------------------------------------------

/// Production `FeedSource` backed by a shared blocking reqwest client.
///
/// No retries and no explicit timeouts: a failed fetch fails the current
/// refresh cycle, and the next periodic tick tries again.
pub struct HttpFeedSource {
    config: ServiceConfig,
    client: reqwest::blocking::Client,
}

impl HttpFeedSource {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn fetch_text(&self, url: &str) -> Result<String, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpError(status.as_u16()));
        }

        response.text().map_err(|e| FeedError::Transport(e.to_string()))
    }

    /// URL of a numbered zone document, e.g. `.../HistWater_12.geojson`.
    pub fn zone_url(&self, index: u32) -> String {
        format!("{}_{}.geojson", self.config.zones.base_url, index)
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch_station_feed(&self) -> Result<String, FeedError> {
        self.fetch_text(&pegel::build_feed_url(&self.config.feed))
    }

    fn fetch_history_table(&self, kind: HistoryKind) -> Result<String, FeedError> {
        self.fetch_text(&historic::build_history_url(&self.config.historic, kind))
    }

    fn fetch_flood_zone(&self, index: u32) -> Result<String, FeedError> {
        self.fetch_text(&self.zone_url(index))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_url_numbers_the_document() {
        let source = HttpFeedSource::new(ServiceConfig::default());
        let url = source.zone_url(12);
        assert!(url.ends_with("HistWater_12.geojson"), "got: {}", url);
    }
}
