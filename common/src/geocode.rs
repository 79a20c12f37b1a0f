//! Place-name lookups against a Nominatim-compatible search service.
//!
//! Transport lives with the platform adapters (browser `fetch`, `reqwest`);
//! this module owns the URL shape and the interpretation of the reply so
//! every adapter reports the same outcomes.

use std::fmt;
use std::future::Future;

use serde::Deserialize;

use crate::location::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeError {
    /// The service answered with an empty candidate list.
    NotFound,
    /// Transport failure, non-2xx status or an unreadable body.
    Network(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Location not found"),
            Self::Network(reason) => write!(f, "Geocoding request failed: {}", reason),
        }
    }
}

impl std::error::Error for GeocodeError {}

/// Resolves free-text place names to coordinates.
///
/// Implementations issue exactly one request per call and keep no state
/// between calls, so origin and destination lookups may run concurrently.
pub trait Geocoder {
    fn resolve(&self, place: &str) -> impl Future<Output = Result<Coordinate, GeocodeError>>;
}

/// One candidate from the search reply. Nominatim sends numbers as strings.
#[derive(Debug, Deserialize)]
struct SearchPlace {
    lat: String,
    lon: String,
}

/// Build `<endpoint>?format=json&q=<place>`. The place is sent as typed,
/// blanks included.
pub fn search_url(endpoint: &str, place: &str) -> String {
    format!("{}?format=json&q={}", endpoint, percent_encode(place))
}

/// Interpret a finished HTTP exchange.
pub fn interpret_response(status: u16, body: &str) -> Result<Coordinate, GeocodeError> {
    if !(200..300).contains(&status) {
        return Err(GeocodeError::Network(format!("HTTP {}", status)));
    }
    parse_search_response(body)
}

/// Take the first candidate of a search reply.
pub fn parse_search_response(body: &str) -> Result<Coordinate, GeocodeError> {
    let candidates: Vec<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| GeocodeError::Network(format!("Parse search response: {}", e)))?;

    let first = candidates.into_iter().next().ok_or(GeocodeError::NotFound)?;
    let place: SearchPlace = serde_json::from_value(first)
        .map_err(|e| GeocodeError::Network(format!("Parse search result: {}", e)))?;

    let lat = parse_degrees(&place.lat)?;
    let lon = parse_degrees(&place.lon)?;
    Coordinate::try_new(lat, lon).map_err(|e| GeocodeError::Network(e.to_string()))
}

fn parse_degrees(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::Network(format!("Invalid coordinate value {:?}", raw)))
}

fn percent_encode(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}
