#![forbid(unsafe_code)]

//! Pure sync planning.
//!
//! A plan is the list of side effects needed to bring the rendered effect in
//! line with the current configuration and measured geometry. Planning never
//! touches the host: the pipeline applies plans through its stage sink.
//!
//! # Decision Rule
//!
//! 1. While the engine is incapable, every trigger plans nothing — the
//!    fallback container needs no stage work.
//! 2. Capability grant and configuration changes plan a *full* sync: map
//!    regeneration plus a complete stage rebind. The whole parameter set is
//!    recomputed even for fields that only affect one side; the split below
//!    exists only for resize.
//! 3. Resize plans map regeneration only — stage bindings are a function of
//!    configuration, not geometry.

use vitro_core::config::SurfaceConfig;
use vitro_core::geometry::Size;
use vitro_render::filter::StageBindings;
use vitro_render::ids::SurfaceIds;
use vitro_render::map::synthesize_map;

/// What caused a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// The capability probe resolved to capable.
    CapabilityGranted,
    /// A configuration field changed.
    ConfigChanged,
    /// The container's measured box changed.
    Resized,
}

/// One side effect of a sync.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    /// Swap the image-input stage to a freshly synthesized map.
    RegenerateMap {
        /// The new data URI.
        uri: String,
    },
    /// Rewrite all dynamic stage parameters.
    BindStages {
        /// The bindings to mirror onto the stages.
        bindings: StageBindings,
    },
}

/// Compute the side effects for a trigger.
///
/// Pure: identical inputs yield identical plans. `measured` is the lazily
/// read container box; `None` (or a degenerate box) synthesizes at the
/// nominal fallback dimensions.
#[must_use]
pub fn plan(
    trigger: SyncTrigger,
    capable: bool,
    config: &SurfaceConfig,
    ids: &SurfaceIds,
    measured: Option<Size>,
) -> Vec<SyncAction> {
    if !capable {
        return Vec::new();
    }

    let uri = synthesize_map(measured.unwrap_or_default(), ids, config);
    match trigger {
        SyncTrigger::CapabilityGranted | SyncTrigger::ConfigChanged => vec![
            SyncAction::RegenerateMap { uri },
            SyncAction::BindStages {
                bindings: StageBindings::from_config(config),
            },
        ],
        SyncTrigger::Resized => vec![SyncAction::RegenerateMap { uri }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> SurfaceIds {
        SurfaceIds::for_instance(0)
    }

    #[test]
    fn incapable_plans_nothing() {
        let config = SurfaceConfig::default();
        for trigger in [
            SyncTrigger::CapabilityGranted,
            SyncTrigger::ConfigChanged,
            SyncTrigger::Resized,
        ] {
            assert!(plan(trigger, false, &config, &ids(), None).is_empty());
        }
    }

    #[test]
    fn config_change_plans_full_sync() {
        let config = SurfaceConfig::default();
        let actions = plan(
            SyncTrigger::ConfigChanged,
            true,
            &config,
            &ids(),
            Some(Size::new(400.0, 200.0)),
        );
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], SyncAction::RegenerateMap { .. }));
        assert!(matches!(actions[1], SyncAction::BindStages { .. }));
    }

    #[test]
    fn resize_plans_map_regeneration_only() {
        let config = SurfaceConfig::default();
        let actions = plan(
            SyncTrigger::Resized,
            true,
            &config,
            &ids(),
            Some(Size::new(800.0, 400.0)),
        );
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], SyncAction::RegenerateMap { .. }));
    }

    #[test]
    fn planning_is_pure() {
        let config = SurfaceConfig::default();
        let measured = Some(Size::new(640.0, 360.0));
        assert_eq!(
            plan(SyncTrigger::ConfigChanged, true, &config, &ids(), measured),
            plan(SyncTrigger::ConfigChanged, true, &config, &ids(), measured),
        );
    }
}
