//! Thin wrappers over `window` calls the dashboard needs.

use leptos::logging::warn;
use wasm_bindgen::JsValue;

/// Show a blocking alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window()
        && let Err(err) = window.alert_with_message(message)
    {
        warn!("alert failed: {err:?}");
    }
}

/// Ask for confirmation. Anything but an explicit "OK" counts as no.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Full page navigation (leaves the client-side router).
pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window()
        && let Err(err) = window.location().set_href(url)
    {
        warn!("navigation to {url} failed: {err:?}");
    }
}

/// Render an RFC 3339 timestamp in the viewer's locale.
pub fn locale_time(rfc3339: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(rfc3339));
    String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
}
