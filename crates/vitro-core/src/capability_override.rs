#![forbid(unsafe_code)]

//! Runtime capability override injection for testing.
//!
//! Tests need to simulate capable and incapable hosts without a real browser.
//! This module provides a thread-local override stack for the capability
//! decision, so detection can be forced either way in a scoped region.
//!
//! - **Thread-local**: overrides on one thread never affect another, keeping
//!   parallel test runs isolated.
//! - **Stackable**: nested overrides win over outer ones; popping restores
//!   the previous state.
//! - **RAII-based**: guards remove their override on drop, including on
//!   panic or early return.

use std::cell::RefCell;

/// Override specification for engine capabilities.
///
/// `Some(true)` forces the filter pipeline ON, `Some(false)` forces it OFF,
/// `None` leaves detection untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityOverride {
    pub filter_pipeline: Option<bool>,
}

impl CapabilityOverride {
    /// Create a new empty override (nothing overridden).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter_pipeline: None,
        }
    }

    /// Force the filter pipeline on, regardless of host identity.
    #[must_use]
    pub const fn force_capable() -> Self {
        Self {
            filter_pipeline: Some(true),
        }
    }

    /// Force the filter pipeline off (simulate an unsupported engine).
    #[must_use]
    pub const fn force_fallback() -> Self {
        Self {
            filter_pipeline: Some(false),
        }
    }
}

thread_local! {
    static OVERRIDE_STACK: RefCell<Vec<CapabilityOverride>> = const { RefCell::new(Vec::new()) };
}

/// RAII guard removing its override when dropped.
#[derive(Debug)]
pub struct OverrideGuard {
    _private: (),
}

impl Drop for OverrideGuard {
    fn drop(&mut self) {
        OVERRIDE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Push an override onto the current thread's stack.
///
/// The override stays active until the returned guard is dropped.
#[must_use]
pub fn push_capability_override(override_cfg: CapabilityOverride) -> OverrideGuard {
    OVERRIDE_STACK.with(|stack| {
        stack.borrow_mut().push(override_cfg);
    });
    OverrideGuard { _private: () }
}

/// Run `f` with the given override active, then restore the previous state.
pub fn with_capability_override<R>(override_cfg: CapabilityOverride, f: impl FnOnce() -> R) -> R {
    let _guard = push_capability_override(override_cfg);
    f()
}

/// Resolve the filter-pipeline decision against the active override stack.
///
/// The innermost override with an opinion wins; with no active opinion the
/// detected base value passes through.
#[must_use]
pub fn resolve(base: bool) -> bool {
    OVERRIDE_STACK.with(|stack| {
        stack
            .borrow()
            .iter()
            .rev()
            .find_map(|o| o.filter_pipeline)
            .unwrap_or(base)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{EngineCapabilities, HostIdentity};

    #[test]
    fn no_override_passes_base_through() {
        assert!(resolve(true));
        assert!(!resolve(false));
    }

    #[test]
    fn override_wins_over_detection() {
        with_capability_override(CapabilityOverride::force_capable(), || {
            let caps = EngineCapabilities::detect_with_overrides(&HostIdentity::gecko());
            assert!(caps.filter_pipeline);
        });

        with_capability_override(CapabilityOverride::force_fallback(), || {
            let caps = EngineCapabilities::detect_with_overrides(&HostIdentity::chromium());
            assert!(!caps.filter_pipeline);
        });
    }

    #[test]
    fn inner_override_shadows_outer() {
        with_capability_override(CapabilityOverride::force_capable(), || {
            with_capability_override(CapabilityOverride::force_fallback(), || {
                assert!(!resolve(true));
            });
            // Outer override restored after the inner guard drops.
            assert!(resolve(false));
        });
        assert!(!resolve(false));
    }

    #[test]
    fn empty_override_defers() {
        with_capability_override(CapabilityOverride::new(), || {
            assert!(resolve(true));
            assert!(!resolve(false));
        });
    }

    #[test]
    fn guard_cleans_up_on_drop() {
        {
            let _guard = push_capability_override(CapabilityOverride::force_capable());
            assert!(resolve(false));
        }
        assert!(!resolve(false));
    }
}
