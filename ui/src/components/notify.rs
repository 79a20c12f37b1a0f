use locmap_common::session::Notice;

/// Show a blocking notification for a failed lookup or geolocation.
pub fn notify(notice: Notice) {
    tracing::warn!("{}", notice);

    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(notice.message()) {
                web_sys::console::error_1(&e);
            }
        }
    }
}
