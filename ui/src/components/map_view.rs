//! Leaflet map driven by the location store.
//!
//! Rust decides what changed (`MapSync`); a small JS runtime installed once
//! per page applies the commands and queues them until Leaflet has loaded.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use serde_json::{json, Value};

use locmap_common::config::SessionConfig;
use locmap_common::map::{MapCommand, MapSync};

use super::location_state::{use_location_store, use_session_config};

pub const MAP_ELEMENT_ID: &str = "locmap-map";

pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Page runtime. Loads Leaflet itself and drains queued commands from the
/// script's `onload`; commands arriving afterwards apply immediately.
const MAP_RUNTIME: &str = r#"(function (leafletSrc) {
    if (window.locmapRun) { return; }
    var state = { map: null, origin: null, destination: null, queue: [] };
    function marker(existing, cmd) {
        if (existing) { existing.setLatLng([cmd.lat, cmd.lon]); return existing; }
        return L.marker([cmd.lat, cmd.lon]).addTo(state.map);
    }
    function apply(cmd) {
        switch (cmd.op) {
            case "mount":
                state.map = L.map(cmd.element).setView([cmd.lat, cmd.lon], cmd.zoom);
                L.tileLayer(cmd.tileUrl, { attribution: cmd.attribution }).addTo(state.map);
                break;
            case "origin":
                state.origin = marker(state.origin, cmd);
                break;
            case "destination":
                state.destination = marker(state.destination, cmd);
                break;
            case "recenter":
                state.map.setView([cmd.lat, cmd.lon], state.map.getZoom());
                break;
            case "teardown":
                if (state.map) { state.map.remove(); }
                state.map = null; state.origin = null; state.destination = null;
                break;
        }
    }
    function flush() {
        if (typeof L === "undefined") { return; }
        while (state.queue.length) { apply(state.queue.shift()); }
    }
    if (typeof L === "undefined") {
        var script = document.createElement("script");
        script.src = leafletSrc;
        script.onload = flush;
        document.head.appendChild(script);
    }
    window.locmapRun = function (cmd) { state.queue.push(cmd); flush(); };
})"#;

/// Script that installs the runtime, loading Leaflet from `leaflet_src`.
fn runtime_script(leaflet_src: &str) -> String {
    format!("{}({});", MAP_RUNTIME, Value::from(leaflet_src))
}

/// JSON payload understood by the page runtime.
fn command_payload(command: &MapCommand, config: &SessionConfig) -> Value {
    match command {
        MapCommand::Mount { center, zoom } => json!({
            "op": "mount",
            "element": MAP_ELEMENT_ID,
            "lat": center.latitude,
            "lon": center.longitude,
            "zoom": zoom,
            "tileUrl": config.tile_url,
            "attribution": config.tile_attribution,
        }),
        MapCommand::PlaceOrigin(c) => json!({ "op": "origin", "lat": c.latitude, "lon": c.longitude }),
        MapCommand::PlaceDestination(c) => {
            json!({ "op": "destination", "lat": c.latitude, "lon": c.longitude })
        }
        MapCommand::Recenter(c) => json!({ "op": "recenter", "lat": c.latitude, "lon": c.longitude }),
    }
}

fn run_script(js_code: &str) {
    #[cfg(target_family = "wasm")]
    {
        if let Err(e) = js_sys::eval(js_code) {
            web_sys::console::error_2(&"[MAP] script failed:".into(), &e);
        }
    }
    #[cfg(not(target_family = "wasm"))]
    {
        tracing::trace!("Map script (no browser): {}", js_code);
    }
}

fn send(payload: &Value) {
    run_script(&format!("window.locmapRun({});", payload));
}

#[component]
pub fn MapView() -> Element {
    let store = use_location_store();
    let config = use_session_config();
    let sync = use_hook(|| Rc::new(RefCell::new(MapSync::new())));

    use_hook(|| run_script(&runtime_script(LEAFLET_JS)));

    use_effect(move || {
        let state = store.read().snapshot();
        let commands = sync
            .borrow_mut()
            .sync(state.origin, state.destination, config.initial_zoom);
        for command in &commands {
            tracing::debug!(?command, "Map update");
            send(&command_payload(command, &config));
        }
    });

    use_drop(|| send(&json!({ "op": "teardown" })));

    rsx! {
        div {
            id: MAP_ELEMENT_ID,
            class: "map-canvas",
            style: "height: 500px; width: 100%;",
        }
    }
}
