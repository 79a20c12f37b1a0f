//! Async glue between the platform adapters and the location store.
//!
//! Lookups are never cancelled: a newer search does not abort an older one
//! and both results are applied in the order they complete. Dropping the
//! future before it finishes is the only way to stop a result from landing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geocode::Geocoder;
use crate::geolocate::GeolocationSource;
use crate::session::{Endpoint, LocationStore, Notice};

/// Scoped mutable access to the session's store.
pub trait StoreHandle {
    fn update<R>(&mut self, f: impl FnOnce(&mut LocationStore) -> R) -> R;
}

impl StoreHandle for Rc<RefCell<LocationStore>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut LocationStore) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Ask the device for its position once and seed the origin with it.
pub async fn seed_origin<L, S>(source: &L, store: &mut S) -> Option<Notice>
where
    L: GeolocationSource,
    S: StoreHandle,
{
    let result = source.current_coordinate().await;
    store.update(|s| s.apply_geolocation(result))
}

/// Resolve `place` and write the result into `endpoint`.
pub async fn search_place<G, S>(
    geocoder: &G,
    store: &mut S,
    endpoint: Endpoint,
    place: &str,
) -> Option<Notice>
where
    G: Geocoder,
    S: StoreHandle,
{
    let ticket = store.update(|s| s.begin_lookup(endpoint));
    tracing::debug!(%endpoint, place, "Resolving place name");
    let result = geocoder.resolve(place).await;
    store.update(|s| s.complete_lookup(ticket, result))
}
