#![forbid(unsafe_code)]

//! Web/WASM host integration for Vitro.
//!
//! This crate binds the host-agnostic pipeline to a real document:
//!
//! - [`probe`] captures navigator identifiers into a
//!   [`HostIdentity`](vitro_core::capability::HostIdentity),
//! - [`dom`] owns one element handle per filter stage and implements the
//!   stage sink over `setAttribute`,
//! - [`surface`] mounts the container, upgrades it with the filter subtree
//!   when the engine is capable, and wires ResizeObserver notifications to
//!   deferred map regeneration.
//!
//! [`style`] (class and inline-style synthesis) and [`static_markup`]
//! (serialized subtree for snapshot/server rendering) are platform-agnostic
//! and unit-tested on the host; everything touching `web-sys` is gated to
//! `wasm32`.

use std::fmt;

pub mod static_markup;
pub mod style;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod probe;
#[cfg(target_arch = "wasm32")]
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use surface::GlassSurface;

/// Errors from web host integration.
///
/// Only mounting can fail; sync work after a successful mount degrades
/// silently by design.
#[derive(Debug)]
pub enum WebHostError {
    /// No `window` object (not running in a browsing context).
    WindowUnavailable,
    /// No `document` on the window.
    DocumentUnavailable,
    /// A DOM call failed; the message carries the host's diagnostic.
    Dom(String),
}

impl fmt::Display for WebHostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowUnavailable => write!(f, "no window available"),
            Self::DocumentUnavailable => write!(f, "no document available"),
            Self::Dom(msg) => write!(f, "dom error: {msg}"),
        }
    }
}

impl std::error::Error for WebHostError {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebHostError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }
}
