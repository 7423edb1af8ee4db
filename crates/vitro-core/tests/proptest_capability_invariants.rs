//! Property-based invariant tests for engine capability detection.
//!
//! These verify the decision rule for arbitrary identifier strings:
//!
//! 1. Detection is deterministic.
//! 2. Without the vendor global marker, the pipeline is never enabled.
//! 3. A user-agent containing the competing-engine substring (any casing)
//!    is never enabled.
//! 4. A missing identifier always fails closed.
//! 5. Enabling requires the vendor-allow substring in the vendor string.

use proptest::prelude::*;
use vitro_core::capability::{EngineCapabilities, HostIdentity};

// ── Helpers ─────────────────────────────────────────────────────────────

fn identity_strategy() -> impl Strategy<Value = HostIdentity> {
    (
        proptest::option::of("[ -~]{0,64}"),
        proptest::option::of("[ -~]{0,32}"),
        any::<bool>(),
    )
        .prop_map(|(user_agent, vendor, has_vendor_global)| HostIdentity {
            user_agent,
            vendor,
            has_vendor_global,
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn detection_is_deterministic(identity in identity_strategy()) {
        prop_assert_eq!(
            EngineCapabilities::detect(&identity),
            EngineCapabilities::detect(&identity)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. The vendor global marker is required
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_marker_never_enables(mut identity in identity_strategy()) {
        identity.has_vendor_global = false;
        prop_assert!(!EngineCapabilities::detect(&identity).filter_pipeline);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Competing-engine user agents never enable, any casing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn competing_engine_ua_never_enables(
        mut identity in identity_strategy(),
        prefix in "[ -~]{0,16}",
        suffix in "[ -~]{0,16}",
        upper in any::<bool>(),
    ) {
        let marker = if upper { "FireFox" } else { "firefox" };
        identity.user_agent = Some(format!("{prefix}{marker}{suffix}"));
        prop_assert!(!EngineCapabilities::detect(&identity).filter_pipeline);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Missing identifiers fail closed
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_identifiers_fail_closed(mut identity in identity_strategy()) {
        identity.user_agent = None;
        prop_assert!(!EngineCapabilities::detect(&identity).filter_pipeline);

        identity.user_agent = Some("Mozilla/5.0".to_string());
        identity.vendor = None;
        prop_assert!(!EngineCapabilities::detect(&identity).filter_pipeline);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Enabling requires the vendor-allow substring
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn enabled_implies_vendor_substring(identity in identity_strategy()) {
        if EngineCapabilities::detect(&identity).filter_pipeline {
            let vendor = identity.vendor.as_deref().unwrap_or_default();
            prop_assert!(vendor.contains("Google"));
            prop_assert!(identity.has_vendor_global);
        }
    }
}
