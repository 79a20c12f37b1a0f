pub mod config;
pub mod geocode;
pub mod geolocate;
pub mod location;
pub mod map;
pub mod session;
pub mod workflow;
