#![forbid(unsafe_code)]

//! The per-surface pipeline driver.
//!
//! One [`SurfacePipeline`] exists per mounted surface. It owns the stage
//! sink, the current configuration, and the derived render state, and it is
//! the only writer of stage attributes.
//!
//! # Lifecycle
//!
//! ```text
//! new (incapable, no stage work)
//!   └─ grant_capability        — at most once, after host attach
//!        ├─ update_config      — full sync per change
//!        ├─ request/complete   — deferred, map-only resize regeneration
//!        └─ teardown           — invalidates tickets, stops all stage work
//! ```
//!
//! # Invariants
//!
//! - No stage mutation while incapable or after teardown.
//! - The map URI is always synthesized from the measurement closure's
//!   current answer, never from nominal configuration.
//! - Deferred regeneration is latest-wins: issuing a new ticket invalidates
//!   outstanding ones, and teardown invalidates them all.

use vitro_core::config::SurfaceConfig;
use vitro_core::geometry::Size;
use vitro_render::filter::{StageBindings, apply_bindings, apply_map};
use vitro_render::ids::SurfaceIds;
use vitro_render::sink::StageSink;

use crate::sync::{SyncAction, SyncTrigger, plan};

/// Permission to complete one deferred map regeneration.
///
/// Stamped with the pipeline epoch at issue time; completion against a
/// pipeline whose epoch has moved on is silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenTicket {
    epoch: u64,
}

/// Drives one surface's sync work against its stage sink.
#[derive(Debug)]
pub struct SurfacePipeline<S: StageSink> {
    sink: S,
    ids: SurfaceIds,
    config: SurfaceConfig,
    capable: bool,
    alive: bool,
    epoch: u64,
    map_uri: Option<String>,
    bindings: Option<StageBindings>,
}

impl<S: StageSink> SurfacePipeline<S> {
    /// Create a pipeline in the incapable, pre-probe state.
    ///
    /// No stage work happens until [`grant_capability`](Self::grant_capability).
    #[must_use]
    pub fn new(sink: S, ids: SurfaceIds, config: SurfaceConfig) -> Self {
        Self {
            sink,
            ids,
            config,
            capable: false,
            alive: true,
            epoch: 0,
            map_uri: None,
            bindings: None,
        }
    }

    /// Whether the capability probe has resolved to capable.
    #[must_use]
    pub fn is_capable(&self) -> bool {
        self.capable
    }

    /// Whether the pipeline has been torn down.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        !self.alive
    }

    /// The element ids this surface's markup references.
    #[must_use]
    pub fn ids(&self) -> &SurfaceIds {
        &self.ids
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The last synthesized map URI, if a sync has run.
    #[must_use]
    pub fn map_uri(&self) -> Option<&str> {
        self.map_uri.as_deref()
    }

    /// The stage bindings mirrored by the last full sync.
    #[must_use]
    pub fn bindings(&self) -> Option<&StageBindings> {
        self.bindings.as_ref()
    }

    /// Read access to the sink, for inspection in tests.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the pipeline and return its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Record the probe result and, when capable, run the first full sync.
    ///
    /// The probe resolves exactly once per mount; repeated grants are
    /// ignored, as is a grant after teardown.
    pub fn grant_capability(&mut self, measure: impl FnOnce() -> Option<Size>) {
        if !self.alive || self.capable {
            return;
        }
        self.capable = true;
        vitro_core::debug!("capability granted, running initial sync");
        self.run(SyncTrigger::CapabilityGranted, measure);
    }

    /// Replace the configuration and re-sync.
    ///
    /// An unchanged configuration is a no-op. While incapable the new
    /// configuration is stored but no stage work happens.
    pub fn update_config(
        &mut self,
        config: SurfaceConfig,
        measure: impl FnOnce() -> Option<Size>,
    ) {
        if !self.alive || config == self.config {
            return;
        }
        self.config = config;
        self.run(SyncTrigger::ConfigChanged, measure);
    }

    /// Request a deferred, map-only regeneration (the resize path).
    ///
    /// Returns `None` while incapable or after teardown. Issuing a new
    /// ticket invalidates any outstanding one: resize bursts collapse to
    /// the final completion (latest-wins).
    #[must_use]
    pub fn request_deferred_regen(&mut self) -> Option<RegenTicket> {
        if !self.alive || !self.capable {
            return None;
        }
        self.epoch += 1;
        Some(RegenTicket { epoch: self.epoch })
    }

    /// Complete a deferred regeneration.
    ///
    /// Returns `true` if the regeneration ran; `false` if the ticket was
    /// stale (superseded or torn down) and was dropped without touching any
    /// stage.
    pub fn complete_deferred_regen(
        &mut self,
        ticket: RegenTicket,
        measure: impl FnOnce() -> Option<Size>,
    ) -> bool {
        if !self.alive || ticket.epoch != self.epoch {
            vitro_core::debug!("stale deferred regeneration dropped");
            return false;
        }
        self.run(SyncTrigger::Resized, measure);
        true
    }

    /// Tear the pipeline down: invalidate outstanding tickets and refuse all
    /// further stage work.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.epoch += 1;
        vitro_core::debug!("pipeline torn down");
    }

    fn run(&mut self, trigger: SyncTrigger, measure: impl FnOnce() -> Option<Size>) {
        // Measurement is deferred to here so the map always reflects the
        // box as laid out at sync time.
        let measured = if self.capable { measure() } else { None };
        let actions = plan(trigger, self.capable, &self.config, &self.ids, measured);
        for action in actions {
            match action {
                SyncAction::RegenerateMap { uri } => {
                    apply_map(&mut self.sink, &uri);
                    self.map_uri = Some(uri);
                }
                SyncAction::BindStages { bindings } => {
                    apply_bindings(&mut self.sink, &bindings);
                    self.bindings = Some(bindings);
                }
            }
        }
    }
}
