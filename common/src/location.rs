use std::fmt;

use serde::{Deserialize, Serialize};

/// Equatorial radius in meters, the sphere most web mapping tools measure on.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    NotFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => write!(f, "Coordinate is not a finite number"),
            Self::LatitudeOutOfRange(v) => write!(f, "Latitude {v} outside [-90, 90]"),
            Self::LongitudeOutOfRange(v) => write!(f, "Longitude {v} outside [-180, 180]"),
        }
    }
}

impl std::error::Error for CoordinateError {}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from untrusted input, rejecting NaN, infinities and
    /// values outside the valid latitude/longitude ranges.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Haversine distance in kilometers between two points, rounded to whole
    /// meters.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding can push `a` a hair past 1.0 for antipodal pairs.
        let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

        (EARTH_RADIUS_M * c).round() / 1000.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Format a distance for display, e.g. "714.23".
pub fn format_distance_km(km: f64) -> String {
    format!("{:.2}", km)
}
