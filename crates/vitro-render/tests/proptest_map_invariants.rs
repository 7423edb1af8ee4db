//! Property-based invariant tests for displacement-map synthesis.
//!
//! These verify the map contract for any plausible inputs:
//!
//! 1. Determinism: identical `(size, ids, config)` yield byte-identical URIs.
//! 2. Edge band width equals `min(w, h) * border_width / 2` on the valid range.
//! 3. The inset core rectangle never has negative dimensions, for any
//!    `border_width` (clamping).
//! 4. The embedded viewBox reflects the measured size; degenerate sizes fall
//!    back to the nominal 400×200.
//! 5. The payload is fully percent-encoded (no raw markup delimiters survive).

use proptest::prelude::*;
use vitro_core::config::SurfaceConfig;
use vitro_core::geometry::Size;
use vitro_render::{FALLBACK_MAP_SIZE, SurfaceIds, edge_size, synthesize_map};

// ── Helpers ─────────────────────────────────────────────────────────────

fn size_strategy() -> impl Strategy<Value = Size> {
    (1.0f64..=4000.0, 1.0f64..=4000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn config_strategy() -> impl Strategy<Value = SurfaceConfig> {
    (
        0.0f64..=1.0,
        0.0f64..=100.0,
        0.0f64..=50.0,
        -400.0f64..=400.0,
    )
        .prop_map(|(border_width, border_radius, blur, distortion_scale)| {
            SurfaceConfig::default()
                .with_border_width(border_width)
                .with_border_radius(border_radius)
                .with_blur(blur)
                .with_distortion_scale(distortion_scale)
        })
}

fn ids() -> SurfaceIds {
    SurfaceIds::for_instance(0)
}

fn decode(uri: &str) -> String {
    let payload = uri.strip_prefix("data:image/svg+xml,").expect("data URI prefix");
    percent_encoding::percent_decode_str(payload)
        .decode_utf8()
        .expect("utf-8 payload")
        .into_owned()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn synthesis_is_deterministic(size in size_strategy(), config in config_strategy()) {
        let a = synthesize_map(size, &ids(), &config);
        let b = synthesize_map(size, &ids(), &config);
        prop_assert_eq!(a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Edge band geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edge_band_matches_formula(size in size_strategy(), bw in 0.0f64..=1.0) {
        let expected = size.min_dimension() * (bw * 0.5);
        prop_assert_eq!(edge_size(size, bw), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Inset rectangle never negative
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inset_never_negative(size in size_strategy(), bw in -2.0f64..=3.0) {
        let edge = edge_size(size, bw);
        prop_assert!(edge >= 0.0);
        // Inset on both sides of the smaller dimension can at most consume it.
        prop_assert!(size.min_dimension() - edge * 2.0 >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. viewBox reflects geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn viewbox_embeds_measured_size(size in size_strategy(), config in config_strategy()) {
        let svg = decode(&synthesize_map(size, &ids(), &config));
        let expected = format!(r#"viewBox="0 0 {} {}""#, size.width, size.height);
        prop_assert!(svg.contains(&expected), "missing {} in {}", expected, svg);
    }
}

proptest! {
    #[test]
    fn degenerate_sizes_fall_back(w in -100.0f64..=0.0, h in -100.0f64..=0.0) {
        let config = SurfaceConfig::default();
        let svg = decode(&synthesize_map(Size::new(w, h), &ids(), &config));
        let expected = format!(
            r#"viewBox="0 0 {} {}""#,
            FALLBACK_MAP_SIZE.width, FALLBACK_MAP_SIZE.height
        );
        prop_assert!(svg.contains(&expected));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Payload is fully encoded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn payload_has_no_raw_delimiters(size in size_strategy(), config in config_strategy()) {
        let uri = synthesize_map(size, &ids(), &config);
        prop_assert!(uri.starts_with("data:image/svg+xml,"));
        let payload = &uri["data:image/svg+xml,".len()..];
        for raw in ['<', '>', '"', '#', ' '] {
            prop_assert!(!payload.contains(raw), "raw {:?} in payload", raw);
        }
    }
}
