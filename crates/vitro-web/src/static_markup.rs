#![forbid(unsafe_code)]

//! Static markup rendering.
//!
//! Serializes the exact subtree a live mount builds through the DOM: the
//! container, the filter-definition host (iff capable), and the content
//! wrapper. Hosts without a live document use it for server-side or
//! snapshot rendering, and tests use it to pin the capable-iff-present
//! contract without a browser.

use std::fmt::Write as _;

use vitro_core::config::SurfaceConfig;
use vitro_render::filter::filter_markup;
use vitro_render::ids::SurfaceIds;

use crate::style::{CONTENT_CLASS, container_class, container_style};

/// Render the surface subtree as markup.
///
/// `capable` mirrors the probe result: the filter-definition subtree is
/// present exactly when it is `true`, matching what a live mount builds.
#[must_use]
pub fn render_static(config: &SurfaceConfig, capable: bool, ids: &SurfaceIds) -> String {
    let mut html = String::with_capacity(2048);
    let _ = write!(
        html,
        r#"<div class="{}" style="{}">"#,
        container_class(capable, &config.class_name),
        container_style(config, capable, &ids.filter),
    );
    if capable {
        html.push_str(&filter_markup(ids));
    }
    let _ = write!(html, r#"<div class="{CONTENT_CLASS}"></div></div>"#);
    html
}
