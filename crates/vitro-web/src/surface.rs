#![forbid(unsafe_code)]

//! A mounted glass surface.
//!
//! [`GlassSurface::mount`] attaches the container in fallback presentation,
//! probes the engine once attached, and upgrades to the filter pipeline only
//! when the probe allows it — a fallback-first order so no frame ever shows
//! a half-initialized filter.
//!
//! Resize notifications can arrive mid-layout with non-final box
//! measurements, so the observer callback only *requests* regeneration; the
//! actual re-measure and map swap run from a zero-delay timeout after layout
//! settles. Ticket epochs make stale timeouts (superseded bursts, fired
//! after unmount) drop silently, so timers are never cleared explicitly.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, ResizeObserver};

use vitro_core::capability::EngineCapabilities;
use vitro_core::config::SurfaceConfig;
use vitro_core::geometry::Size;
use vitro_render::ids::SurfaceIds;
use vitro_runtime::SurfacePipeline;

use crate::WebHostError;
use crate::dom::{DomStageSink, build_filter_subtree};
use crate::probe::probe_host;
use crate::style;

type SharedPipeline = Rc<RefCell<SurfacePipeline<DomStageSink>>>;

/// One mounted surface: container, content wrapper, and sync pipeline.
pub struct GlassSurface {
    container: Element,
    content: Element,
    pipeline: SharedPipeline,
    capable: bool,
    observer: Option<ResizeObserver>,
    // Kept alive for the observer's lifetime; dropped on unmount.
    _resize_callback: Option<Closure<dyn FnMut()>>,
}

impl GlassSurface {
    /// Mount a surface into `parent`.
    pub fn mount(parent: &Element, config: SurfaceConfig) -> Result<Self, WebHostError> {
        let window = web_sys::window().ok_or(WebHostError::WindowUnavailable)?;
        let document = window.document().ok_or(WebHostError::DocumentUnavailable)?;
        let ids = SurfaceIds::allocate();

        let container = document.create_element("div")?;
        let content = document.create_element("div")?;
        content.set_attribute("class", style::CONTENT_CLASS)?;
        container.append_child(&content)?;
        container.set_attribute("class", &style::container_class(false, &config.class_name))?;
        container.set_attribute("style", &style::container_style(&config, false, &ids.filter))?;
        parent.append_child(&container)?;

        // Probe only after attach; the capability is fixed for this mount.
        let capable =
            EngineCapabilities::detect_with_overrides(&probe_host()).filter_pipeline;

        let sink = if capable {
            let (host, sink) = build_filter_subtree(&document, &ids)?;
            container.insert_before(&host, Some(content.as_ref()))?;
            container.set_attribute("class", &style::container_class(true, &config.class_name))?;
            container.set_attribute("style", &style::container_style(&config, true, &ids.filter))?;
            sink
        } else {
            DomStageSink::empty()
        };

        let mut pipeline = SurfacePipeline::new(sink, ids, config);
        if capable {
            let target = container.clone();
            pipeline.grant_capability(move || measure(&target));
        }
        let pipeline: SharedPipeline = Rc::new(RefCell::new(pipeline));

        let (observer, resize_callback) = if capable {
            let state = Rc::clone(&pipeline);
            let target = container.clone();
            let callback = Closure::<dyn FnMut()>::new(move || {
                schedule_deferred_regen(&state, &target);
            });
            let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
            observer.observe(&container);
            (Some(observer), Some(callback))
        } else {
            (None, None)
        };

        vitro_core::debug!(capable, "glass surface mounted");
        Ok(Self {
            container,
            content,
            pipeline,
            capable,
            observer,
            _resize_callback: resize_callback,
        })
    }

    /// The container element.
    #[must_use]
    pub fn container(&self) -> &Element {
        &self.container
    }

    /// The content wrapper; callers append their children here.
    #[must_use]
    pub fn content(&self) -> &Element {
        &self.content
    }

    /// Whether this mount runs the filter pipeline.
    #[must_use]
    pub fn is_capable(&self) -> bool {
        self.capable
    }

    /// Apply a new configuration: restyle the container and re-sync the
    /// filter stages.
    pub fn update_config(&self, config: SurfaceConfig) -> Result<(), WebHostError> {
        let filter_id = self.pipeline.borrow().ids().filter.clone();
        self.container.set_attribute(
            "class",
            &style::container_class(self.capable, &config.class_name),
        )?;
        self.container.set_attribute(
            "style",
            &style::container_style(&config, self.capable, &filter_id),
        )?;

        let target = self.container.clone();
        self.pipeline
            .borrow_mut()
            .update_config(config, move || measure(&target));
        Ok(())
    }

    /// Detach the observer, invalidate pending regenerations, and remove the
    /// subtree from the document.
    pub fn unmount(self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
        self.pipeline.borrow_mut().teardown();
        self.container.remove();
        vitro_core::debug!("glass surface unmounted");
    }
}

/// Measure the container's current layout box.
fn measure(element: &Element) -> Option<Size> {
    let rect = element.get_bounding_client_rect();
    let size = Size::new(rect.width(), rect.height());
    if size.is_empty() { None } else { Some(size) }
}

/// Request a ticket and arrange its completion after layout settles.
fn schedule_deferred_regen(pipeline: &SharedPipeline, container: &Element) {
    let Some(ticket) = pipeline.borrow_mut().request_deferred_regen() else {
        return;
    };

    let state = Rc::clone(pipeline);
    let target = container.clone();
    let completion = Closure::once_into_js(move || {
        let _ = state
            .borrow_mut()
            .complete_deferred_regen(ticket, || measure(&target));
    });

    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            completion.unchecked_ref(),
            0,
        );
    }
}
