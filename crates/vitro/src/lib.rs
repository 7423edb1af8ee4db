#![forbid(unsafe_code)]

//! Vitro public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use vitro_core::capability::{EngineCapabilities, EngineProfile, HostIdentity};
pub use vitro_core::capability_override::{
    CapabilityOverride, OverrideGuard, push_capability_override, with_capability_override,
};
pub use vitro_core::config::{BlendMode, Dimension, MapChannel, SurfaceConfig};
pub use vitro_core::geometry::Size;

// --- Render re-exports -----------------------------------------------------

pub use vitro_render::filter::{
    StageBindings, StageId, StageSpec, apply_bindings, apply_map, filter_markup, stage_topology,
};
pub use vitro_render::ids::SurfaceIds;
pub use vitro_render::map::{FALLBACK_MAP_SIZE, edge_size, synthesize_map};
pub use vitro_render::sink::{RecordingSink, StageSink, StageWrite};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use vitro_runtime::{RegenTicket, SurfacePipeline, SyncAction, SyncTrigger, plan};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use vitro_web::WebHostError;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use vitro_web::GlassSurface;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BlendMode, Dimension, EngineCapabilities, HostIdentity, MapChannel, Size, StageBindings,
        StageId, StageSink, SurfaceConfig, SurfaceIds,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{SurfacePipeline, SyncTrigger};

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub use crate::GlassSurface;
}

pub use vitro_core as core;
pub use vitro_render as render;

#[cfg(feature = "runtime")]
pub use vitro_runtime as runtime;

#[cfg(feature = "web")]
pub use vitro_web as web;
