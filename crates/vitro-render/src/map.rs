#![forbid(unsafe_code)]

//! Displacement-map synthesis.
//!
//! The map is a self-contained SVG image encoding a per-pixel offset field
//! shaped like a rounded rectangle with soft edges:
//!
//! - an opaque black backdrop establishes the zero-displacement baseline,
//! - a horizontal transparent→red gradient encodes one displacement axis,
//! - a vertical transparent→blue gradient, composited with the configured
//!   blend mode, encodes the perpendicular axis,
//! - a blurred greyscale inset rectangle flattens the core region so the
//!   backdrop reads as undistorted glass away from the edges.
//!
//! # Invariants
//!
//! - **Deterministic**: identical `(size, ids, config)` inputs produce a
//!   byte-identical data URI. No randomness, no timestamps.
//! - **Measured geometry**: callers pass the *measured* box; an unmeasured
//!   or degenerate box falls back to [`FALLBACK_MAP_SIZE`] instead of
//!   producing a zero-size image.
//! - **Non-negative inset**: `border_width` is clamped to `[0, 1]` so the
//!   inset rectangle never has negative dimensions.

use std::fmt::Write as _;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use vitro_core::config::SurfaceConfig;
use vitro_core::geometry::Size;

use crate::ids::SurfaceIds;

/// Nominal dimensions substituted when the container has not been measured.
pub const FALLBACK_MAP_SIZE: Size = Size::new(400.0, 200.0);

/// The `encodeURIComponent` character set: everything except alphanumerics
/// and `- _ . ! ~ * ' ( )` is percent-encoded.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Width of the soft-edge band for a measured box.
///
/// Proportional to the smaller dimension so the band scales with aspect
/// ratio: `min(width, height) * border_width / 2`, with `border_width`
/// clamped to `[0, 1]`.
#[must_use]
pub fn edge_size(size: Size, border_width: f64) -> f64 {
    size.min_dimension() * (border_width.clamp(0.0, 1.0) * 0.5)
}

/// Synthesize the displacement map for a measured box as a data URI.
///
/// Pure string construction from numeric inputs; no I/O. A degenerate
/// `size` falls back to [`FALLBACK_MAP_SIZE`].
#[must_use]
pub fn synthesize_map(size: Size, ids: &SurfaceIds, config: &SurfaceConfig) -> String {
    let size = if size.is_empty() { FALLBACK_MAP_SIZE } else { size };
    let (w, h) = (size.width, size.height);
    let edge = edge_size(size, config.border_width);
    let inner_w = w - edge * 2.0;
    let inner_h = h - edge * 2.0;
    let radius = config.border_radius;

    let mut svg = String::with_capacity(1024);
    let _ = write!(
        svg,
        r#"<svg viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = write!(
        svg,
        r##"<defs><linearGradient id="{red}" x1="100%" y1="0%" x2="0%" y2="0%"><stop offset="0%" stop-color="#00000000"/><stop offset="100%" stop-color="#FF0000"/></linearGradient><linearGradient id="{blue}" x1="0%" y1="0%" x2="0%" y2="100%"><stop offset="0%" stop-color="#00000000"/><stop offset="100%" stop-color="#0000FF"/></linearGradient></defs>"##,
        red = ids.red_gradient,
        blue = ids.blue_gradient,
    );
    let _ = write!(svg, r#"<rect x="0" y="0" width="{w}" height="{h}" fill="black"/>"#);
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{w}" height="{h}" rx="{radius}" fill="url(#{red})"/>"#,
        red = ids.red_gradient,
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{w}" height="{h}" rx="{radius}" fill="url(#{blue})" style="mix-blend-mode: {blend}"/>"#,
        blue = ids.blue_gradient,
        blend = config.blend_mode,
    );
    let _ = write!(
        svg,
        r#"<rect x="{edge}" y="{edge}" width="{inner_w}" height="{inner_h}" rx="{radius}" fill="hsl(0 0% {brightness}% / {opacity})" style="filter:blur({blur}px)"/>"#,
        brightness = config.brightness,
        opacity = config.opacity,
        blur = config.blur,
    );
    svg.push_str("</svg>");

    vitro_core::trace!(width = w, height = h, bytes = svg.len(), "map synthesized");

    format!("data:image/svg+xml,{}", utf8_percent_encode(&svg, URI_COMPONENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitro_core::config::BlendMode;

    fn ids() -> SurfaceIds {
        SurfaceIds::for_instance(0)
    }

    fn decoded(uri: &str) -> String {
        let payload = uri.strip_prefix("data:image/svg+xml,").unwrap();
        percent_encoding::percent_decode_str(payload)
            .decode_utf8()
            .unwrap()
            .into_owned()
    }

    #[test]
    fn identical_inputs_yield_identical_uris() {
        let config = SurfaceConfig::default();
        let a = synthesize_map(Size::new(400.0, 200.0), &ids(), &config);
        let b = synthesize_map(Size::new(400.0, 200.0), &ids(), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn viewbox_reflects_measured_size() {
        let config = SurfaceConfig::default();
        let svg = decoded(&synthesize_map(Size::new(800.0, 400.0), &ids(), &config));
        assert!(svg.contains(r#"viewBox="0 0 800 400""#), "{svg}");
    }

    #[test]
    fn degenerate_size_falls_back_to_nominal_dimensions() {
        let config = SurfaceConfig::default();
        let zero = synthesize_map(Size::new(0.0, 0.0), &ids(), &config);
        let fallback = synthesize_map(FALLBACK_MAP_SIZE, &ids(), &config);
        assert_eq!(zero, fallback);
        assert!(decoded(&zero).contains(r#"viewBox="0 0 400 200""#));
    }

    #[test]
    fn edge_band_scales_with_smaller_dimension() {
        assert_eq!(edge_size(Size::new(400.0, 200.0), 0.1), 10.0);
        assert_eq!(edge_size(Size::new(200.0, 400.0), 0.1), 10.0);
    }

    #[test]
    fn border_width_is_clamped() {
        // 150% border width behaves like 100%: the inset rect collapses to
        // zero size instead of going negative.
        assert_eq!(edge_size(Size::new(100.0, 100.0), 1.5), 50.0);
        assert_eq!(edge_size(Size::new(100.0, 100.0), -0.5), 0.0);
    }

    #[test]
    fn layers_appear_in_composite_order() {
        let config = SurfaceConfig::default().with_blend_mode(BlendMode::Screen);
        let svg = decoded(&synthesize_map(Size::new(400.0, 200.0), &ids(), &config));

        let black = svg.find(r#"fill="black""#).unwrap();
        let red = svg.find("url(#red-grad-0)").unwrap();
        let blue = svg.find("url(#blue-grad-0)").unwrap();
        let core = svg.find("hsl(0 0% 50% / 0.93)").unwrap();
        assert!(black < red && red < blue && blue < core);
        assert!(svg.contains("mix-blend-mode: screen"));
    }

    #[test]
    fn core_region_is_inset_by_edge_size() {
        // 400x200 at border_width 0.1: edge = 200 * 0.05 = 10.
        let config = SurfaceConfig::default().with_border_width(0.1);
        let svg = decoded(&synthesize_map(Size::new(400.0, 200.0), &ids(), &config));
        assert!(svg.contains(r#"<rect x="10" y="10" width="380" height="180""#), "{svg}");
    }

    #[test]
    fn uri_contains_no_raw_delimiters() {
        let config = SurfaceConfig::default();
        let uri = synthesize_map(Size::new(400.0, 200.0), &ids(), &config);
        let payload = uri.strip_prefix("data:image/svg+xml,").unwrap();
        assert!(!payload.contains('<'));
        assert!(!payload.contains('>'));
        assert!(!payload.contains('"'));
        assert!(!payload.contains('#'));
    }
}
