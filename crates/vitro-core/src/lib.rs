#![forbid(unsafe_code)]

//! Core: geometry, surface configuration, and engine capability detection.

pub mod capability;
pub mod capability_override;
pub mod config;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
