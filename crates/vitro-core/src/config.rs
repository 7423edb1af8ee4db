#![forbid(unsafe_code)]

//! Surface configuration.
//!
//! [`SurfaceConfig`] is the immutable-per-render parameter bundle supplied by
//! the caller. Every field has a default; none are validated beyond what the
//! map synthesizer clamps at generation time — out-of-range visual values are
//! left for the host compositor to clamp naturally.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A nominal extent: a pixel count or a raw CSS expression (`"100%"`, `"auto"`).
///
/// Nominal extents size the container only. The displacement map is always
/// generated from the *measured* box, never from these values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    /// Fixed length in CSS pixels.
    Px(f64),
    /// Raw CSS length expression, passed through verbatim.
    Css(String),
}

impl Dimension {
    /// Render as a CSS length value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Px(px) => format!("{px}px"),
            Self::Css(expr) => expr.clone(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Css(expr) => f.write_str(expr),
        }
    }
}

impl From<f64> for Dimension {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl From<&str> for Dimension {
    fn from(expr: &str) -> Self {
        Self::Css(expr.to_string())
    }
}

/// Which color channel of the displacement map drives an axis of displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MapChannel {
    /// Red channel.
    R,
    /// Green channel.
    G,
    /// Blue channel.
    B,
}

impl MapChannel {
    /// Channel selector value as used by the displacement stages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::R => "R",
            Self::G => "G",
            Self::B => "B",
        }
    }
}

impl fmt::Display for MapChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapChannel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" | "r" => Ok(Self::R),
            "G" | "g" => Ok(Self::G),
            "B" | "b" => Ok(Self::B),
            _ => Err(()),
        }
    }
}

/// Compositing mode applied between the map's two gradient layers.
///
/// These are the standard CSS `mix-blend-mode` keywords. The mode shapes the
/// two-axis direction field where the red and blue gradients overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
    PlusDarker,
    PlusLighter,
}

impl BlendMode {
    /// The CSS keyword for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
            Self::PlusDarker => "plus-darker",
            Self::PlusLighter => "plus-lighter",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "multiply" => Ok(Self::Multiply),
            "screen" => Ok(Self::Screen),
            "overlay" => Ok(Self::Overlay),
            "darken" => Ok(Self::Darken),
            "lighten" => Ok(Self::Lighten),
            "color-dodge" => Ok(Self::ColorDodge),
            "color-burn" => Ok(Self::ColorBurn),
            "hard-light" => Ok(Self::HardLight),
            "soft-light" => Ok(Self::SoftLight),
            "difference" => Ok(Self::Difference),
            "exclusion" => Ok(Self::Exclusion),
            "hue" => Ok(Self::Hue),
            "saturation" => Ok(Self::Saturation),
            "color" => Ok(Self::Color),
            "luminosity" => Ok(Self::Luminosity),
            "plus-darker" => Ok(Self::PlusDarker),
            "plus-lighter" => Ok(Self::PlusLighter),
            _ => Err(()),
        }
    }
}

/// Visual parameters for a glass surface.
///
/// All fields are public; [`SurfaceConfig::default`] matches the reference
/// tuning. Builder-style `with_*` methods exist for every field so call sites
/// can override a handful of knobs without struct-update noise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceConfig {
    /// Nominal container width.
    pub width: Dimension,
    /// Nominal container height.
    pub height: Dimension,
    /// Corner radius in pixels, shared by the container and the map shape.
    pub border_radius: f64,
    /// Soft-edge band width as a fraction of the smaller measured dimension.
    pub border_width: f64,
    /// Greyscale tone of the map's core region, 0–100.
    pub brightness: f64,
    /// Alpha of the map's core region, 0–1.
    pub opacity: f64,
    /// Blur radius (px) applied to the map's core region.
    pub blur: f64,
    /// Post-composite blur stdDeviation applied after channel recombination.
    pub displace: f64,
    /// Frost intensity of the container fill, 0–1.
    pub background_opacity: f64,
    /// Backdrop saturation multiplier.
    pub saturation: f64,
    /// Base displacement magnitude, signed.
    pub distortion_scale: f64,
    /// Added to `distortion_scale` for the red displacement stage.
    pub red_offset: f64,
    /// Added to `distortion_scale` for the green displacement stage.
    pub green_offset: f64,
    /// Added to `distortion_scale` for the blue displacement stage.
    pub blue_offset: f64,
    /// Map channel driving horizontal displacement.
    pub x_channel: MapChannel,
    /// Map channel driving vertical displacement.
    pub y_channel: MapChannel,
    /// Blend mode between the map's red and blue gradient layers.
    pub blend_mode: BlendMode,
    /// Extra class name(s) for the container.
    pub class_name: String,
    /// Inline style overrides for the container, raw CSS declarations.
    pub style: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: Dimension::Px(200.0),
            height: Dimension::Px(80.0),
            border_radius: 20.0,
            border_width: 0.07,
            brightness: 50.0,
            opacity: 0.93,
            blur: 11.0,
            displace: 0.0,
            background_opacity: 0.0,
            saturation: 1.0,
            distortion_scale: -180.0,
            red_offset: 0.0,
            green_offset: 10.0,
            blue_offset: 20.0,
            x_channel: MapChannel::R,
            y_channel: MapChannel::G,
            blend_mode: BlendMode::Difference,
            class_name: String::new(),
            style: String::new(),
        }
    }
}

impl SurfaceConfig {
    /// Create a config with the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-channel displacement magnitude: `distortion_scale` plus the
    /// channel's offset.
    #[must_use]
    pub fn scale_for(&self, channel: MapChannel) -> f64 {
        let offset = match channel {
            MapChannel::R => self.red_offset,
            MapChannel::G => self.green_offset,
            MapChannel::B => self.blue_offset,
        };
        self.distortion_scale + offset
    }

    #[must_use]
    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = width.into();
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = height.into();
        self
    }

    #[must_use]
    pub fn with_border_radius(mut self, border_radius: f64) -> Self {
        self.border_radius = border_radius;
        self
    }

    #[must_use]
    pub fn with_border_width(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: f64) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }

    #[must_use]
    pub fn with_displace(mut self, displace: f64) -> Self {
        self.displace = displace;
        self
    }

    #[must_use]
    pub fn with_background_opacity(mut self, background_opacity: f64) -> Self {
        self.background_opacity = background_opacity;
        self
    }

    #[must_use]
    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
        self
    }

    #[must_use]
    pub fn with_distortion_scale(mut self, distortion_scale: f64) -> Self {
        self.distortion_scale = distortion_scale;
        self
    }

    #[must_use]
    pub fn with_red_offset(mut self, red_offset: f64) -> Self {
        self.red_offset = red_offset;
        self
    }

    #[must_use]
    pub fn with_green_offset(mut self, green_offset: f64) -> Self {
        self.green_offset = green_offset;
        self
    }

    #[must_use]
    pub fn with_blue_offset(mut self, blue_offset: f64) -> Self {
        self.blue_offset = blue_offset;
        self
    }

    #[must_use]
    pub fn with_x_channel(mut self, x_channel: MapChannel) -> Self {
        self.x_channel = x_channel;
        self
    }

    #[must_use]
    pub fn with_y_channel(mut self, y_channel: MapChannel) -> Self {
        self.y_channel = y_channel;
        self
    }

    #[must_use]
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}
