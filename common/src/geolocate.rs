use std::fmt;
use std::future::Future;

use crate::location::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    /// The host platform has no geolocation capability.
    Unavailable,
    /// The platform reported an error: denial, timeout or no fix.
    PermissionDenied,
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "Geolocation is not supported"),
            Self::PermissionDenied => write!(f, "Unable to fetch current position"),
        }
    }
}

impl std::error::Error for GeolocationError {}

/// One-shot source of the device's current position.
pub trait GeolocationSource {
    fn current_coordinate(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>>;
}
