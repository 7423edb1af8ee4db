#![forbid(unsafe_code)]

//! Render: displacement-map synthesis and the filter-graph model.
//!
//! Everything here is pure string and data work. Host mutation goes through
//! the narrow [`sink::StageSink`] interface so the graph can be driven
//! against a real DOM or a recording fake interchangeably.

pub mod filter;
pub mod ids;
pub mod map;
pub mod sink;

pub use filter::{
    FILTER_HOST_CLASS, FILTER_HOST_STYLE, StageBindings, StageId, StageSpec, apply_bindings,
    apply_map, filter_markup, stage_topology,
};
pub use ids::SurfaceIds;
pub use map::{FALLBACK_MAP_SIZE, edge_size, synthesize_map};
pub use sink::{RecordingSink, StageSink, StageWrite};
