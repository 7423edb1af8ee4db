#![forbid(unsafe_code)]

//! Rendering-engine capability detection.
//!
//! The filter pipeline's image-input stage is known to render incorrectly on
//! engines that do not composite nested blend-mode layers inside a
//! dynamically generated image: instead of refraction the backdrop shows a
//! raw flat-color artifact. That behavior is not reliably feature-detectable,
//! so detection is an engine allow-list over ambient host identifiers rather
//! than a probe of the broken primitive itself.
//!
//! # Detection Strategy
//!
//! [`EngineCapabilities::detect`] enables the filter pipeline only if ALL of:
//!
//! - the vendor global marker is present (`window.chrome` on Blink hosts),
//! - the vendor-identity string contains `"Google"`,
//! - the lowercased user-agent does not contain `"firefox"` (spoofing guard).
//!
//! # Invariants
//!
//! 1. **Determinism**: identical [`HostIdentity`] inputs always produce the
//!    same result.
//! 2. **Fail closed**: missing identifiers disable the pipeline. False
//!    negatives (plain fallback on a capable engine) are preferred over false
//!    positives (corrupted effect).
//! 3. **One probe per mount**: callers capture identity once, after the
//!    component is attached to the document, and never re-probe.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `user_agent` or `vendor` unreadable | Pipeline disabled |
//! | Vendor marker absent | Pipeline disabled |
//! | Spoofed UA containing "firefox" | Pipeline disabled |
//!
//! # Predefined Profiles
//!
//! For tests and simulation, [`HostIdentity`] and [`EngineCapabilities`] ship
//! profiles for the engines that matter here: `chromium()`, `gecko()`,
//! `webkit()`, and `headless()`.

use std::fmt;

use crate::capability_override;

/// Vendor-identity substring required for the filter pipeline.
const VENDOR_ALLOW: &str = "Google";

/// User-agent substring (lowercased) that disables the pipeline outright.
const ENGINE_DENY: &str = "firefox";

/// Ambient host identifiers read once per mount.
///
/// Each string is `Option` because hosts can withhold any of them; `None`
/// fails closed. Construction is the only host-specific part of detection,
/// which keeps the decision rule itself testable without a real browser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostIdentity {
    /// The host's user-agent string, verbatim.
    pub user_agent: Option<String>,
    /// The host's vendor-identity string (`navigator.vendor`).
    pub vendor: Option<String>,
    /// Whether the vendor-specific global marker is present.
    pub has_vendor_global: bool,
}

impl HostIdentity {
    /// Identity with no readable identifiers (fails closed).
    #[must_use]
    pub const fn headless() -> Self {
        Self {
            user_agent: None,
            vendor: None,
            has_vendor_global: false,
        }
    }

    /// A Blink-engine host (Chrome, Edge, Brave, Arc, Opera).
    #[must_use]
    pub fn chromium() -> Self {
        Self {
            user_agent: Some(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/126.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            vendor: Some("Google Inc.".to_string()),
            has_vendor_global: true,
        }
    }

    /// A Gecko-engine host (Firefox). Empty vendor string, no global marker.
    #[must_use]
    pub fn gecko() -> Self {
        Self {
            user_agent: Some(
                "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0"
                    .to_string(),
            ),
            vendor: Some(String::new()),
            has_vendor_global: false,
        }
    }

    /// A WebKit-engine host (Safari).
    #[must_use]
    pub fn webkit() -> Self {
        Self {
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/17.4 Safari/605.1.15"
                    .to_string(),
            ),
            vendor: Some("Apple Computer, Inc.".to_string()),
            has_vendor_global: false,
        }
    }
}

/// Known engine profile identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineProfile {
    /// Blink engine (Chrome, Edge, Brave, Arc, Opera).
    Chromium,
    /// Gecko engine (Firefox).
    Gecko,
    /// WebKit engine (Safari).
    WebKit,
    /// No host identifiers available (server render, tests).
    Headless,
    /// Auto-detected from a [`HostIdentity`].
    Detected,
}

impl EngineProfile {
    /// Get the profile name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Gecko => "gecko",
            Self::WebKit => "webkit",
            Self::Headless => "headless",
            Self::Detected => "detected",
        }
    }

    /// Get all predefined profile identifiers (excluding `Detected`).
    #[must_use]
    pub const fn all_predefined() -> &'static [Self] {
        &[Self::Chromium, Self::Gecko, Self::WebKit, Self::Headless]
    }
}

impl std::str::FromStr for EngineProfile {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chromium" | "chrome" | "blink" => Ok(Self::Chromium),
            "gecko" | "firefox" => Ok(Self::Gecko),
            "webkit" | "safari" => Ok(Self::WebKit),
            "headless" | "none" => Ok(Self::Headless),
            "detected" | "auto" => Ok(Self::Detected),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EngineProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine capability model.
///
/// Describes whether the host engine can composite the filter pipeline
/// without visual corruption. Use [`detect`](Self::detect) with a captured
/// [`HostIdentity`], or a predefined profile for simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCapabilities {
    profile: EngineProfile,
    /// Whether the image-input filter pipeline renders correctly.
    pub filter_pipeline: bool,
}

impl Default for EngineCapabilities {
    fn default() -> Self {
        Self::headless()
    }
}

impl EngineCapabilities {
    /// Get the profile identifier for this capability set.
    #[must_use]
    pub const fn profile(&self) -> EngineProfile {
        self.profile
    }

    /// Blink-engine host: filter pipeline enabled.
    #[must_use]
    pub const fn chromium() -> Self {
        Self {
            profile: EngineProfile::Chromium,
            filter_pipeline: true,
        }
    }

    /// Gecko-engine host: filter pipeline disabled (map gradient renders raw).
    #[must_use]
    pub const fn gecko() -> Self {
        Self {
            profile: EngineProfile::Gecko,
            filter_pipeline: false,
        }
    }

    /// WebKit-engine host: filter pipeline disabled.
    #[must_use]
    pub const fn webkit() -> Self {
        Self {
            profile: EngineProfile::WebKit,
            filter_pipeline: false,
        }
    }

    /// No identifiers available: everything disabled.
    #[must_use]
    pub const fn headless() -> Self {
        Self {
            profile: EngineProfile::Headless,
            filter_pipeline: false,
        }
    }

    /// Create capabilities from a profile identifier.
    ///
    /// `Detected` yields the fail-closed [`headless`](Self::headless) set;
    /// real detection needs a [`HostIdentity`].
    #[must_use]
    pub const fn from_profile(profile: EngineProfile) -> Self {
        match profile {
            EngineProfile::Chromium => Self::chromium(),
            EngineProfile::Gecko => Self::gecko(),
            EngineProfile::WebKit => Self::webkit(),
            EngineProfile::Headless | EngineProfile::Detected => Self::headless(),
        }
    }

    /// Detect capabilities from captured host identifiers.
    ///
    /// Deterministic and side-effect free. Any unreadable identifier fails
    /// closed.
    #[must_use]
    pub fn detect(identity: &HostIdentity) -> Self {
        let filter_pipeline = match (&identity.user_agent, &identity.vendor) {
            (Some(user_agent), Some(vendor)) => {
                identity.has_vendor_global
                    && vendor.contains(VENDOR_ALLOW)
                    && !user_agent.to_lowercase().contains(ENGINE_DENY)
            }
            _ => false,
        };

        Self {
            profile: EngineProfile::Detected,
            filter_pipeline,
        }
    }

    /// Detect capabilities, then apply any active thread-local override.
    ///
    /// See [`capability_override`](crate::capability_override) for the
    /// override mechanism.
    #[must_use]
    pub fn detect_with_overrides(identity: &HostIdentity) -> Self {
        let mut caps = Self::detect(identity);
        caps.filter_pipeline = capability_override::resolve(caps.filter_pipeline);
        caps
    }
}
