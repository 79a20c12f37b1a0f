use dioxus::prelude::*;

use locmap_common::session::LocationStore;

use super::location_state::session_config;
use super::location_view::LocationView;
use super::map_view::LEAFLET_CSS;

#[component]
pub fn App() -> Element {
    let config = use_context_provider(session_config);
    use_context_provider(|| Signal::new(LocationStore::new(&config)));

    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        div { class: "locmap-app",
            header { class: "app-header",
                h1 { "Real-Time Location Map" }
            }
            main {
                LocationView {}
            }
        }
    }
}
