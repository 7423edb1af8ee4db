#![forbid(unsafe_code)]

//! Navigator-based host identity capture.

use js_sys::Reflect;
use wasm_bindgen::JsValue;

use vitro_core::capability::HostIdentity;

/// Capture the ambient host identifiers for capability detection.
///
/// Unreadable identifiers become `None`, which detection treats as
/// fail-closed. Call after the surface is attached to the document so the
/// answer matches the live environment rather than a pre-render pass.
#[must_use]
pub fn probe_host() -> HostIdentity {
    let Some(window) = web_sys::window() else {
        return HostIdentity::headless();
    };
    let navigator = window.navigator();

    let has_vendor_global = Reflect::get(window.as_ref(), &JsValue::from_str("chrome"))
        .map(|marker| !marker.is_undefined())
        .unwrap_or(false);

    HostIdentity {
        user_agent: navigator.user_agent().ok(),
        vendor: Some(navigator.vendor()),
        has_vendor_global,
    }
}
