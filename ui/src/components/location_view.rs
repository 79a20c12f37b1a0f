use dioxus::prelude::*;

use locmap_common::session::{Endpoint, LocationStore};
use locmap_common::workflow::{search_place, seed_origin};

use super::geolocation::BrowserGeolocation;
use super::location_state::{use_location_store, use_session_config, StoreSignal};
use super::map_view::MapView;
use super::nominatim::NominatimClient;
use super::notify::notify;

/// Start a lookup. Earlier lookups keep running and land when they finish.
fn run_search(
    store: Signal<LocationStore>,
    geocoder: NominatimClient,
    endpoint: Endpoint,
    place: String,
) {
    spawn(async move {
        let mut handle = StoreSignal(store);
        if let Some(notice) = search_place(&geocoder, &mut handle, endpoint, &place).await {
            notify(notice);
        }
    });
}

#[component]
pub fn LocationView() -> Element {
    let store = use_location_store();
    let config = use_session_config();
    let mut origin_query = use_signal(String::new);
    let mut destination_query = use_signal(String::new);

    // Seed the origin from the device once per session.
    use_effect(move || {
        spawn(async move {
            let mut handle = StoreSignal(store);
            if let Some(notice) = seed_origin(&BrowserGeolocation, &mut handle).await {
                notify(notice);
            }
        });
    });

    let origin_geocoder = NominatimClient::new(config.search_endpoint.clone());
    let destination_geocoder = origin_geocoder.clone();
    let distance = store.read().distance_label();

    rsx! {
        div { class: "location-view",
            h3 { "Map with Current Location and Destination Search" }
            div { class: "distance",
                if let Some(km) = distance {
                    p { "Distance to destination: {km} km" }
                }
            }

            div { class: "search-bar",
                input {
                    r#type: "text",
                    placeholder: "Search current location",
                    value: "{origin_query}",
                    oninput: move |evt| origin_query.set(evt.value()),
                }
                button {
                    onclick: move |_| {
                        run_search(
                            store,
                            origin_geocoder.clone(),
                            Endpoint::Origin,
                            origin_query.read().clone(),
                        )
                    },
                    "Search Current Location"
                }

                input {
                    r#type: "text",
                    placeholder: "Search destination location",
                    value: "{destination_query}",
                    oninput: move |evt| destination_query.set(evt.value()),
                }
                button {
                    onclick: move |_| {
                        run_search(
                            store,
                            destination_geocoder.clone(),
                            Endpoint::Destination,
                            destination_query.read().clone(),
                        )
                    },
                    "Search Destination"
                }
            }

            MapView {}
        }
    }
}
