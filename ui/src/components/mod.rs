pub mod app;
pub mod geolocation;
pub mod location_state;
pub mod location_view;
pub mod map_view;
pub mod nominatim;
pub mod notify;
