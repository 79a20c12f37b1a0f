//! Session-wide settings: service endpoints, fallback coordinates and the
//! initial map zoom.

use crate::location::Coordinate;

/// Nominatim place-search endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// OpenStreetMap XYZ raster tile template.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the tile provider. Displayed verbatim.
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Fallback origin (New Delhi) used until geolocation or a search replaces it.
pub const DEFAULT_ORIGIN: Coordinate = Coordinate::new(28.6139, 77.2090);

/// Fallback destination (Indore).
pub const DEFAULT_DESTINATION: Coordinate = Coordinate::new(22.7196, 75.8577);

pub const DEFAULT_ZOOM: u8 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub search_endpoint: String,
    pub tile_url: String,
    pub tile_attribution: String,
    pub default_origin: Coordinate,
    pub default_destination: Coordinate,
    pub initial_zoom: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: TILE_ATTRIBUTION.to_string(),
            default_origin: DEFAULT_ORIGIN,
            default_destination: DEFAULT_DESTINATION,
            initial_zoom: DEFAULT_ZOOM,
        }
    }
}

impl SessionConfig {
    /// Replace the search endpoint, ignoring empty overrides.
    pub fn with_search_endpoint(mut self, endpoint: Option<&str>) -> Self {
        if let Some(url) = endpoint.filter(|s| !s.is_empty()) {
            self.search_endpoint = url.to_string();
        }
        self
    }

    /// Replace the tile template, ignoring empty overrides.
    pub fn with_tile_url(mut self, tile_url: Option<&str>) -> Self {
        if let Some(url) = tile_url.filter(|s| !s.is_empty()) {
            self.tile_url = url.to_string();
        }
        self
    }
}
