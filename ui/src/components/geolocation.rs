//! The browser's one-shot `navigator.geolocation.getCurrentPosition`,
//! bridged into a future.

use locmap_common::geolocate::{GeolocationError, GeolocationSource};
use locmap_common::location::Coordinate;

pub struct BrowserGeolocation;

impl GeolocationSource for BrowserGeolocation {
    async fn current_coordinate(&self) -> Result<Coordinate, GeolocationError> {
        #[cfg(target_family = "wasm")]
        {
            wasm_impl::current_position().await
        }
        #[cfg(not(target_family = "wasm"))]
        {
            Err(GeolocationError::Unavailable)
        }
    }
}

#[cfg(target_family = "wasm")]
mod wasm_impl {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    use super::*;

    type Outcome = Result<Coordinate, GeolocationError>;

    pub async fn current_position() -> Outcome {
        let geolocation = match web_sys::window().map(|w| w.navigator().geolocation()) {
            Some(Ok(g)) => g,
            _ => return Err(GeolocationError::Unavailable),
        };

        let (tx, rx) = oneshot::channel::<Outcome>();
        // Only one of the two callbacks ever fires.
        let tx = Rc::new(RefCell::new(Some(tx)));

        let on_success = {
            let tx = tx.clone();
            Closure::wrap(Box::new(move |position: web_sys::GeolocationPosition| {
                let coords = position.coords();
                let outcome = Coordinate::try_new(coords.latitude(), coords.longitude())
                    .map_err(|_| GeolocationError::PermissionDenied);
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(outcome);
                }
            }) as Box<dyn FnMut(web_sys::GeolocationPosition)>)
        };

        let on_error = {
            let tx = tx.clone();
            Closure::wrap(Box::new(move |err: JsValue| {
                web_sys::console::error_2(&"Error fetching geolocation:".into(), &err);
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(GeolocationError::PermissionDenied));
                }
            }) as Box<dyn FnMut(JsValue)>)
        };

        if geolocation
            .get_current_position_with_error_callback(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
            )
            .is_err()
        {
            return Err(GeolocationError::Unavailable);
        }
        // The platform holds the callbacks until it answers.
        on_success.forget();
        on_error.forget();

        rx.await.unwrap_or(Err(GeolocationError::PermissionDenied))
    }
}
