#![forbid(unsafe_code)]

//! Per-instance element identifiers.
//!
//! Each mounted surface owns one filter definition and two gradient
//! definitions; their ids must be unique within the document so several
//! surfaces can coexist. Ids are derived from a process-wide monotonic
//! counter, which keeps generated markup deterministic for a fixed instance
//! number.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

/// The document-unique ids referenced by one surface's generated markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceIds {
    /// Id of the filter definition the container's backdrop references.
    pub filter: String,
    /// Id of the horizontal (red) gradient inside the displacement map.
    pub red_gradient: String,
    /// Id of the vertical (blue) gradient inside the displacement map.
    pub blue_gradient: String,
}

impl SurfaceIds {
    /// Build the id set for a given instance number.
    #[must_use]
    pub fn for_instance(instance: u64) -> Self {
        Self {
            filter: format!("glass-filter-{instance}"),
            red_gradient: format!("red-grad-{instance}"),
            blue_gradient: format!("blue-grad-{instance}"),
        }
    }

    /// Allocate the next unused instance's id set.
    #[must_use]
    pub fn allocate() -> Self {
        Self::for_instance(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}
