#![forbid(unsafe_code)]

//! The filter graph: a static chain of compositing stages.
//!
//! Topology never changes at runtime; stage identities are stable and only
//! numeric/string attributes are rewritten. The chain is:
//!
//! 1. image input — the synthesized displacement map, stretched to fill,
//! 2. three per-channel displacement stages over the live backdrop,
//! 3. three channel-isolation stages (zero the other channels, keep alpha),
//! 4. two sequential screen-mode blends recombining the channels,
//! 5. a final Gaussian blur with configurable radius.
//!
//! The staggered per-channel displacement magnitudes are what produce the
//! chromatic-aberration fringing characteristic of the effect.

use std::fmt::Write as _;

use vitro_core::config::{MapChannel, SurfaceConfig};

use crate::ids::SurfaceIds;
use crate::sink::StageSink;

/// Stable identity of one filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// The map image input.
    MapImage,
    /// Displacement of the backdrop driven by the red-channel magnitude.
    DisplaceRed,
    /// Displacement driven by the green-channel magnitude.
    DisplaceGreen,
    /// Displacement driven by the blue-channel magnitude.
    DisplaceBlue,
    /// Isolation of the red channel of its displaced input.
    IsolateRed,
    /// Isolation of the green channel.
    IsolateGreen,
    /// Isolation of the blue channel.
    IsolateBlue,
    /// Screen blend of the red and green isolations.
    BlendRedGreen,
    /// Screen blend folding in the blue isolation.
    BlendOutput,
    /// Final blur over the recombined image.
    OutputBlur,
}

impl StageId {
    /// All stages in document order.
    pub const ALL: [Self; 10] = [
        Self::MapImage,
        Self::DisplaceRed,
        Self::IsolateRed,
        Self::DisplaceGreen,
        Self::IsolateGreen,
        Self::DisplaceBlue,
        Self::IsolateBlue,
        Self::BlendRedGreen,
        Self::BlendOutput,
        Self::OutputBlur,
    ];

    /// Short diagnostic name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MapImage => "map-image",
            Self::DisplaceRed => "displace-red",
            Self::DisplaceGreen => "displace-green",
            Self::DisplaceBlue => "displace-blue",
            Self::IsolateRed => "isolate-red",
            Self::IsolateGreen => "isolate-green",
            Self::IsolateBlue => "isolate-blue",
            Self::BlendRedGreen => "blend-red-green",
            Self::BlendOutput => "blend-output",
            Self::OutputBlur => "output-blur",
        }
    }
}

/// Class of the invisible host element carrying the filter definition.
pub const FILTER_HOST_CLASS: &str = "glass-surface__filter";

/// Inline style hiding the filter host from layout and pointers.
pub const FILTER_HOST_STYLE: &str =
    "visibility:hidden;position:absolute;width:0;height:0;pointer-events:none";

/// 5x4 color matrix keeping only the red channel (alpha passes through).
const ISOLATE_RED_MATRIX: &str = "1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1 0";
/// 5x4 color matrix keeping only the green channel.
const ISOLATE_GREEN_MATRIX: &str = "0 0 0 0 0 0 1 0 0 0 0 0 0 0 0 0 0 0 1 0";
/// 5x4 color matrix keeping only the blue channel.
const ISOLATE_BLUE_MATRIX: &str = "0 0 0 0 0 0 0 0 0 0 0 0 1 0 0 0 0 0 1 0";

/// One stage of the static topology: primitive element name plus its fixed
/// initial attributes. Dynamic attributes (scale, channel selectors, map
/// href, blur radius) are written through [`StageSink`] during sync.
#[derive(Debug, Clone, Copy)]
pub struct StageSpec {
    /// Stage identity.
    pub id: StageId,
    /// SVG filter-primitive element name.
    pub element: &'static str,
    /// Fixed attributes applied at construction time.
    pub attrs: &'static [(&'static str, &'static str)],
}

const TOPOLOGY: [StageSpec; 10] = [
    StageSpec {
        id: StageId::MapImage,
        element: "feImage",
        attrs: &[
            ("x", "0"),
            ("y", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("preserveAspectRatio", "none"),
            ("result", "map"),
        ],
    },
    StageSpec {
        id: StageId::DisplaceRed,
        element: "feDisplacementMap",
        attrs: &[("in", "SourceGraphic"), ("in2", "map"), ("result", "dispRed")],
    },
    StageSpec {
        id: StageId::IsolateRed,
        element: "feColorMatrix",
        attrs: &[
            ("in", "dispRed"),
            ("type", "matrix"),
            ("values", ISOLATE_RED_MATRIX),
            ("result", "red"),
        ],
    },
    StageSpec {
        id: StageId::DisplaceGreen,
        element: "feDisplacementMap",
        attrs: &[
            ("in", "SourceGraphic"),
            ("in2", "map"),
            ("result", "dispGreen"),
        ],
    },
    StageSpec {
        id: StageId::IsolateGreen,
        element: "feColorMatrix",
        attrs: &[
            ("in", "dispGreen"),
            ("type", "matrix"),
            ("values", ISOLATE_GREEN_MATRIX),
            ("result", "green"),
        ],
    },
    StageSpec {
        id: StageId::DisplaceBlue,
        element: "feDisplacementMap",
        attrs: &[
            ("in", "SourceGraphic"),
            ("in2", "map"),
            ("result", "dispBlue"),
        ],
    },
    StageSpec {
        id: StageId::IsolateBlue,
        element: "feColorMatrix",
        attrs: &[
            ("in", "dispBlue"),
            ("type", "matrix"),
            ("values", ISOLATE_BLUE_MATRIX),
            ("result", "blue"),
        ],
    },
    StageSpec {
        id: StageId::BlendRedGreen,
        element: "feBlend",
        attrs: &[("in", "red"), ("in2", "green"), ("mode", "screen"), ("result", "rg")],
    },
    StageSpec {
        id: StageId::BlendOutput,
        element: "feBlend",
        attrs: &[("in", "rg"), ("in2", "blue"), ("mode", "screen"), ("result", "output")],
    },
    StageSpec {
        id: StageId::OutputBlur,
        element: "feGaussianBlur",
        // Placeholder radius; the first sync overwrites it with the
        // configured displace value.
        attrs: &[("in", "output"), ("stdDeviation", "0.7")],
    },
];

/// The static stage topology in document order.
#[must_use]
pub const fn stage_topology() -> &'static [StageSpec] {
    &TOPOLOGY
}

/// Serialize the invisible filter-definition subtree.
///
/// Hosts that construct real elements walk [`stage_topology`] instead; this
/// serialization exists for inspection and for asserting the
/// capable-iff-present contract in tests.
#[must_use]
pub fn filter_markup(ids: &SurfaceIds) -> String {
    let mut out = String::with_capacity(1536);
    let _ = write!(
        out,
        r#"<svg class="{FILTER_HOST_CLASS}" style="{FILTER_HOST_STYLE}" aria-hidden="true" xmlns="http://www.w3.org/2000/svg"><defs><filter id="{}" color-interpolation-filters="sRGB" x="0%" y="0%" width="100%" height="100%">"#,
        ids.filter,
    );
    for spec in stage_topology() {
        let _ = write!(out, "<{}", spec.element);
        for (name, value) in spec.attrs {
            let _ = write!(out, r#" {name}="{value}""#);
        }
        out.push_str("/>");
    }
    out.push_str("</filter></defs></svg>");
    out
}

/// Runtime parameters mirrored onto the filter stages.
///
/// A pure function of [`SurfaceConfig`]; after a sync completes, no stage
/// attribute may diverge from the bindings computed here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBindings {
    /// Displacement magnitude for the red stage.
    pub red_scale: f64,
    /// Displacement magnitude for the green stage.
    pub green_scale: f64,
    /// Displacement magnitude for the blue stage.
    pub blue_scale: f64,
    /// Map channel driving horizontal displacement, shared by all stages.
    pub x_channel: MapChannel,
    /// Map channel driving vertical displacement, shared by all stages.
    pub y_channel: MapChannel,
    /// Radius of the final blur stage.
    pub displace: f64,
}

impl StageBindings {
    /// Compute the bindings for a config.
    #[must_use]
    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self {
            red_scale: config.scale_for(MapChannel::R),
            green_scale: config.scale_for(MapChannel::G),
            blue_scale: config.scale_for(MapChannel::B),
            x_channel: config.x_channel,
            y_channel: config.y_channel,
            displace: config.displace,
        }
    }
}

/// Write the displacement magnitudes, channel selectors, and blur radius
/// onto their stages.
pub fn apply_bindings<S: StageSink>(sink: &mut S, bindings: &StageBindings) {
    let scales = [
        (StageId::DisplaceRed, bindings.red_scale),
        (StageId::DisplaceGreen, bindings.green_scale),
        (StageId::DisplaceBlue, bindings.blue_scale),
    ];
    for (stage, scale) in scales {
        sink.set_stage_attr(stage, "scale", &scale.to_string());
        sink.set_stage_attr(stage, "xChannelSelector", bindings.x_channel.as_str());
        sink.set_stage_attr(stage, "yChannelSelector", bindings.y_channel.as_str());
    }
    sink.set_stage_attr(
        StageId::OutputBlur,
        "stdDeviation",
        &bindings.displace.to_string(),
    );
}

/// Swap the image-input stage's source to a freshly synthesized map URI.
pub fn apply_map<S: StageSink>(sink: &mut S, uri: &str) {
    sink.set_stage_attr(StageId::MapImage, "href", uri);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;

    #[test]
    fn topology_covers_every_stage_once() {
        let mut seen: Vec<StageId> = stage_topology().iter().map(|s| s.id).collect();
        seen.dedup();
        assert_eq!(seen.len(), StageId::ALL.len());
        assert_eq!(seen, StageId::ALL);
    }

    #[test]
    fn markup_chains_results_in_order() {
        let markup = filter_markup(&SurfaceIds::for_instance(3));
        assert!(markup.contains(r#"<filter id="glass-filter-3""#));
        assert!(markup.contains(r#"color-interpolation-filters="sRGB""#));

        // The recombination chain reads each upstream result exactly where
        // the original graph does.
        let rg = markup.find(r#"<feBlend in="red" in2="green" mode="screen" result="rg""#);
        let output = markup.find(r#"<feBlend in="rg" in2="blue" mode="screen" result="output""#);
        let blur = markup.find(r#"<feGaussianBlur in="output""#);
        assert!(rg.is_some() && output.is_some() && blur.is_some(), "{markup}");
        assert!(rg < output && output < blur);
    }

    #[test]
    fn bindings_offset_each_channel() {
        let config = SurfaceConfig::default()
            .with_distortion_scale(-100.0)
            .with_red_offset(5.0);
        let bindings = StageBindings::from_config(&config);
        assert_eq!(bindings.red_scale, -95.0);
        assert_eq!(bindings.green_scale, -90.0);
        assert_eq!(bindings.blue_scale, -80.0);
    }

    #[test]
    fn apply_bindings_writes_through_the_sink() {
        let config = SurfaceConfig::default()
            .with_distortion_scale(-100.0)
            .with_red_offset(5.0);
        let mut sink = RecordingSink::new();
        apply_bindings(&mut sink, &StageBindings::from_config(&config));

        assert_eq!(sink.last(StageId::DisplaceRed, "scale"), Some("-95"));
        assert_eq!(sink.last(StageId::DisplaceRed, "xChannelSelector"), Some("R"));
        assert_eq!(sink.last(StageId::DisplaceRed, "yChannelSelector"), Some("G"));
        assert_eq!(sink.last(StageId::OutputBlur, "stdDeviation"), Some("0"));
    }

    #[test]
    fn apply_map_targets_the_image_input() {
        let mut sink = RecordingSink::new();
        apply_map(&mut sink, "data:image/svg+xml,abc");
        assert_eq!(sink.writes.len(), 1);
        assert_eq!(sink.last(StageId::MapImage, "href"), Some("data:image/svg+xml,abc"));
    }
}
