#![forbid(unsafe_code)]

//! Container class and inline-style synthesis.
//!
//! The container carries a stable class contract (`glass-surface` plus a
//! `--svg`/`--fallback` modifier) and exposes its tuning through CSS custom
//! properties, so page stylesheets can restyle surfaces without reaching
//! into the filter. The concrete backdrop declarations are inlined as well:
//! the capable path references the filter by id, the fallback substitutes a
//! flat translucent fill with a plain backdrop blur.

use std::fmt::Write as _;

use vitro_core::config::SurfaceConfig;

/// Base class present on every container.
pub const CONTAINER_CLASS: &str = "glass-surface";
/// Modifier class when the filter pipeline is active.
pub const SVG_MODE_CLASS: &str = "glass-surface--svg";
/// Modifier class when rendering the plain fallback.
pub const FALLBACK_MODE_CLASS: &str = "glass-surface--fallback";
/// Class of the content wrapper inside the container.
pub const CONTENT_CLASS: &str = "glass-surface__content";

/// Minimum fallback fill alpha so the surface reads as glass even with
/// frost disabled.
const FALLBACK_MIN_FILL_ALPHA: f64 = 0.1;

/// Blur radius of the fallback backdrop, in px.
const FALLBACK_BLUR_PX: f64 = 10.0;

/// Compose the container's class attribute.
#[must_use]
pub fn container_class(capable: bool, extra: &str) -> String {
    let mode = if capable { SVG_MODE_CLASS } else { FALLBACK_MODE_CLASS };
    if extra.is_empty() {
        format!("{CONTAINER_CLASS} {mode}")
    } else {
        format!("{CONTAINER_CLASS} {mode} {extra}")
    }
}

/// Compose the container's inline style.
///
/// Caller overrides come first so the geometry, custom properties, and
/// backdrop declarations computed here always win.
#[must_use]
pub fn container_style(config: &SurfaceConfig, capable: bool, filter_id: &str) -> String {
    let mut css = String::with_capacity(256);
    if !config.style.is_empty() {
        css.push_str(config.style.trim_end_matches(';'));
        css.push(';');
    }

    let _ = write!(
        css,
        "width:{};height:{};border-radius:{}px;",
        config.width.to_css(),
        config.height.to_css(),
        config.border_radius,
    );
    let _ = write!(
        css,
        "--glass-frost:{};--glass-saturation:{};",
        config.background_opacity, config.saturation,
    );

    if capable {
        let _ = write!(css, "--filter-id:url(#{filter_id});");
        let _ = write!(
            css,
            "background:hsl(0 0% 100% / {});backdrop-filter:url(#{filter_id}) saturate({});",
            config.background_opacity, config.saturation,
        );
    } else {
        css.push_str("--filter-id:none;");
        let fill = if config.background_opacity > 0.0 {
            config.background_opacity
        } else {
            FALLBACK_MIN_FILL_ALPHA
        };
        let _ = write!(
            css,
            "background:hsl(0 0% 100% / {fill});backdrop-filter:blur({FALLBACK_BLUR_PX}px) saturate({});",
            config.saturation,
        );
    }
    css
}
