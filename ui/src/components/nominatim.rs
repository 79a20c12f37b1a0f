//! Browser geocoding client.
//!
//! One GET per lookup against the configured search endpoint; no retries,
//! no caching.

use locmap_common::geocode::{interpret_response, search_url, GeocodeError, Geocoder};
use locmap_common::location::Coordinate;

#[derive(Clone, Debug)]
pub struct NominatimClient {
    endpoint: String,
}

impl NominatimClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Geocoder for NominatimClient {
    async fn resolve(&self, place: &str) -> Result<Coordinate, GeocodeError> {
        let url = search_url(&self.endpoint, place);
        tracing::debug!(%url, "Place search");
        let (status, body) = fetch_text(&url).await.map_err(GeocodeError::Network)?;
        interpret_response(status, &body)
    }
}

#[cfg(target_family = "wasm")]
fn js_failure(step: &str, err: wasm_bindgen::JsValue) -> String {
    match err.as_string() {
        Some(text) => format!("{}: {}", step, text),
        None => format!("{}: {:?}", step, err),
    }
}

/// GET `url` and hand back the status with the raw body; status
/// interpretation is left to the caller.
#[cfg(target_family = "wasm")]
async fn fetch_text(url: &str) -> Result<(u16, String), String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let init = web_sys::RequestInit::new();
    init.set_method("GET");
    init.set_mode(web_sys::RequestMode::Cors);

    let request = web_sys::Request::new_with_str_and_init(url, &init)
        .map_err(|e| js_failure("place search request", e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| js_failure("place search headers", e))?;

    let window = web_sys::window().ok_or_else(|| "no browser window".to_string())?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_failure("place search unreachable", e))?
        .dyn_into()
        .map_err(|_| "place search returned a non-Response value".to_string())?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| js_failure("place search body", e))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| js_failure("place search body", e))?
        .as_string()
        .unwrap_or_default();

    Ok((status, body))
}

#[cfg(not(target_family = "wasm"))]
async fn fetch_text(_url: &str) -> Result<(u16, String), String> {
    Err("place search needs a browser".to_string())
}
