//! The location state store.
//!
//! Origin, destination and the derived distance only change through the
//! transition methods below, and each of them recomputes the distance before
//! returning, so no reader ever sees a distance from a half-updated pair.

use std::fmt;

use crate::config::SessionConfig;
use crate::geocode::GeocodeError;
use crate::geolocate::GeolocationError;
use crate::location::{format_distance_km, Coordinate};

/// Which of the two coordinates a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Where the current origin came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginSource {
    Fallback,
    Device,
    Search,
}

/// A failure the user must acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NotFound,
    LookupFailed,
    GeolocationFailed,
    GeolocationUnsupported,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound => "Location not found. Please try again.",
            Self::LookupFailed => "Error fetching coordinates. Please try again later.",
            Self::GeolocationFailed => "Unable to fetch your location",
            Self::GeolocationUnsupported => "Geolocation is not supported by your browser.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Issued when a lookup starts; handed back when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub endpoint: Endpoint,
    seq: u64,
}

/// Snapshot of the three observable fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationState {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LocationStore {
    state: LocationState,
    origin_source: OriginSource,
    next_origin_seq: u64,
    next_destination_seq: u64,
    stale_applied: u64,
}

impl LocationStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            state: LocationState {
                origin: config.default_origin,
                destination: config.default_destination,
                distance_km: None,
            },
            origin_source: OriginSource::Fallback,
            next_origin_seq: 1,
            next_destination_seq: 1,
            stale_applied: 0,
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.state.origin
    }

    pub fn destination(&self) -> Coordinate {
        self.state.destination
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.state.distance_km
    }

    /// Distance rounded to two decimals, e.g. "170.46".
    pub fn distance_label(&self) -> Option<String> {
        self.state.distance_km.map(format_distance_km)
    }

    pub fn origin_source(&self) -> OriginSource {
        self.origin_source
    }

    pub fn snapshot(&self) -> LocationState {
        self.state
    }

    /// Number of completed lookups applied after a newer lookup for the same
    /// endpoint had already started.
    pub fn stale_applied(&self) -> u64 {
        self.stale_applied
    }

    /// Apply the one-shot startup geolocation result.
    ///
    /// On failure the fallback origin stays in place and still counts as a
    /// valid origin, so the distance becomes present either way.
    pub fn apply_geolocation(
        &mut self,
        result: Result<Coordinate, GeolocationError>,
    ) -> Option<Notice> {
        match result {
            Ok(coordinate) => {
                tracing::info!(%coordinate, "Origin set from device position");
                self.origin_source = OriginSource::Device;
                self.set(Endpoint::Origin, coordinate);
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "Geolocation failed, keeping fallback origin");
                self.recompute();
                Some(match err {
                    GeolocationError::Unavailable => Notice::GeolocationUnsupported,
                    GeolocationError::PermissionDenied => Notice::GeolocationFailed,
                })
            }
        }
    }

    /// Record the start of a lookup for `endpoint`.
    pub fn begin_lookup(&mut self, endpoint: Endpoint) -> LookupTicket {
        let counter = match endpoint {
            Endpoint::Origin => &mut self.next_origin_seq,
            Endpoint::Destination => &mut self.next_destination_seq,
        };
        let seq = *counter;
        *counter += 1;
        tracing::debug!(%endpoint, seq, "Lookup started");
        LookupTicket { endpoint, seq }
    }

    /// Apply a finished lookup. Results are applied in completion order:
    /// a slow lookup that finishes after a newer one still overwrites it.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<Coordinate, GeocodeError>,
    ) -> Option<Notice> {
        let endpoint = ticket.endpoint;
        match result {
            Ok(coordinate) => {
                if ticket.seq + 1 < self.next_seq(endpoint) {
                    self.stale_applied += 1;
                    tracing::warn!(
                        %endpoint,
                        seq = ticket.seq,
                        latest = self.next_seq(endpoint) - 1,
                        "Applying response from a superseded lookup"
                    );
                }
                tracing::info!(%endpoint, %coordinate, "Lookup resolved");
                if endpoint == Endpoint::Origin {
                    self.origin_source = OriginSource::Search;
                }
                self.set(endpoint, coordinate);
                None
            }
            Err(GeocodeError::NotFound) => {
                tracing::warn!(%endpoint, "Lookup returned no candidates");
                Some(Notice::NotFound)
            }
            Err(err) => {
                tracing::warn!(%endpoint, error = %err, "Lookup failed");
                Some(Notice::LookupFailed)
            }
        }
    }

    fn next_seq(&self, endpoint: Endpoint) -> u64 {
        match endpoint {
            Endpoint::Origin => self.next_origin_seq,
            Endpoint::Destination => self.next_destination_seq,
        }
    }

    fn set(&mut self, endpoint: Endpoint, coordinate: Coordinate) {
        match endpoint {
            Endpoint::Origin => self.state.origin = coordinate,
            Endpoint::Destination => self.state.destination = coordinate,
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.state.distance_km = Some(self.state.origin.distance_km(&self.state.destination));
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
