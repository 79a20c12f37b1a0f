use dioxus::prelude::*;

use locmap_common::config::SessionConfig;
use locmap_common::session::LocationStore;
use locmap_common::workflow::StoreHandle;

/// Build-time configuration. Empty or unset variables keep the defaults.
pub fn session_config() -> SessionConfig {
    SessionConfig::default()
        .with_search_endpoint(option_env!("LOCMAP_SEARCH_URL"))
        .with_tile_url(option_env!("LOCMAP_TILE_URL"))
}

/// The session's location store, provided at the top of the app.
pub fn use_location_store() -> Signal<LocationStore> {
    use_context::<Signal<LocationStore>>()
}

pub fn use_session_config() -> SessionConfig {
    use_context::<SessionConfig>()
}

/// Lets the shared workflow write through the reactive signal, so every
/// transition notifies subscribers exactly once.
#[derive(Clone, Copy)]
pub struct StoreSignal(pub Signal<LocationStore>);

impl StoreHandle for StoreSignal {
    fn update<R>(&mut self, f: impl FnOnce(&mut LocationStore) -> R) -> R {
        f(&mut self.0.write())
    }
}
