#![forbid(unsafe_code)]

//! DOM-backed filter construction and the element-handle stage sink.

use std::collections::HashMap;

use web_sys::{Document, Element};

use vitro_render::filter::{FILTER_HOST_CLASS, FILTER_HOST_STYLE, StageId, stage_topology};
use vitro_render::ids::SurfaceIds;
use vitro_render::sink::StageSink;

use crate::WebHostError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A [`StageSink`] writing through owned element handles.
///
/// Holds exactly the stage elements of one surface's filter; the sync
/// pipeline mutates attributes through this and nothing else. An empty sink
/// backs the fallback path, where no stage work is ever planned.
#[derive(Debug, Default)]
pub struct DomStageSink {
    stages: HashMap<StageId, Element>,
}

impl DomStageSink {
    /// Sink with no stages, for the fallback path.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The element backing a stage, if the filter subtree was built.
    #[must_use]
    pub fn stage(&self, id: StageId) -> Option<&Element> {
        self.stages.get(&id)
    }
}

impl StageSink for DomStageSink {
    fn set_stage_attr(&mut self, stage: StageId, name: &str, value: &str) {
        let Some(element) = self.stages.get(&stage) else {
            // Unreachable through the pipeline: no plan targets a stage
            // that was never built.
            vitro_core::warn!(stage = stage.as_str(), "write to missing stage dropped");
            return;
        };
        if element.set_attribute(name, value).is_err() {
            vitro_core::warn!(
                stage = stage.as_str(),
                attr = name,
                "host rejected stage attribute"
            );
        }
    }
}

/// Build the invisible filter-definition subtree.
///
/// Returns the hidden `<svg>` host (to be inserted into the container) and
/// the sink holding a handle per stage. Topology comes from
/// [`stage_topology`]; this function only materializes it.
pub fn build_filter_subtree(
    document: &Document,
    ids: &SurfaceIds,
) -> Result<(Element, DomStageSink), WebHostError> {
    let host = document.create_element_ns(Some(SVG_NS), "svg")?;
    host.set_attribute("class", FILTER_HOST_CLASS)?;
    host.set_attribute("style", FILTER_HOST_STYLE)?;
    host.set_attribute("aria-hidden", "true")?;

    let defs = document.create_element_ns(Some(SVG_NS), "defs")?;
    host.append_child(&defs)?;

    let filter = document.create_element_ns(Some(SVG_NS), "filter")?;
    filter.set_attribute("id", &ids.filter)?;
    filter.set_attribute("color-interpolation-filters", "sRGB")?;
    filter.set_attribute("x", "0%")?;
    filter.set_attribute("y", "0%")?;
    filter.set_attribute("width", "100%")?;
    filter.set_attribute("height", "100%")?;
    defs.append_child(&filter)?;

    let mut sink = DomStageSink::empty();
    for spec in stage_topology() {
        let element = document.create_element_ns(Some(SVG_NS), spec.element)?;
        for (name, value) in spec.attrs {
            element.set_attribute(name, value)?;
        }
        filter.append_child(&element)?;
        sink.stages.insert(spec.id, element);
    }

    Ok((host, sink))
}
