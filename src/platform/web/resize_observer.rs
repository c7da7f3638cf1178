//=========================================================================
// Web Resize Observer
//
// Wraps the browser's ResizeObserver and converts each callback into a
// `ResizeBatch` for the bridge.
//
// Notes:
// - `devicePixelContentBoxSize` is missing on some engines, so it is
//   read reflectively; absent or non-array values mean "re-measure".
// - One observer serves every element; `observe()` keeps no state of its
//   own, the browser already ignores repeated observation.
//
//=========================================================================

use std::rc::Rc;

use js_sys::{Array, Reflect};
use log::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ResizeObserver, ResizeObserverEntry, ResizeObserverSize, Window};

use super::describe_js_error;
use super::module::JsModule;
use crate::bridge::EventBridge;
use crate::core::platform_bridge::{BridgeError, PlatformEvent, ResizeObservation};
use crate::core::signal::{BoxSize, ElementId, ResizeBatch, ResizeRecord};

//=== Conversion ==========================================================

/// Builds a record from an element id and its `devicePixelContentBoxSize`.
pub(crate) fn record_from_box_sizes(target: String, boxes: &JsValue) -> ResizeRecord {
    match boxes.dyn_ref::<Array>() {
        Some(list) => {
            let sizes = list
                .iter()
                .map(|item| {
                    let size: ResizeObserverSize = item.unchecked_into();
                    BoxSize::new(size.inline_size(), size.block_size())
                })
                .collect();
            ResizeRecord::exact(target, sizes)
        }
        None => ResizeRecord::logical(target),
    }
}

fn record_from_entry(entry: ResizeObserverEntry) -> ResizeRecord {
    let target = entry.target().id();
    let boxes = Reflect::get(&entry, &JsValue::from_str("devicePixelContentBoxSize"))
        .unwrap_or(JsValue::UNDEFINED);
    record_from_box_sizes(target, &boxes)
}

pub(crate) fn batch_from_entries(entries: &Array) -> ResizeBatch {
    entries
        .iter()
        .map(|entry| record_from_entry(entry.unchecked_into()))
        .collect()
}

//=== WebResizeObserver ===================================================

pub struct WebResizeObserver {
    window: Window,
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl WebResizeObserver {
    /// Creates an observer feeding `bridge`, or `None` when the browser has
    /// no ResizeObserver.
    pub fn new(window: Window, bridge: Rc<EventBridge<JsModule>>) -> Option<Self> {
        let supported = Reflect::has(&window, &JsValue::from_str("ResizeObserver")).unwrap_or(false);
        if !supported {
            info!(target: "platform::web", "no resize observer");
            return None;
        }

        let callback = Closure::wrap(Box::new(move |entries: Array| {
            let batch = batch_from_entries(&entries);
            trace!(target: "platform::web", "ResizeObserver fired ({} records)", batch.len());
            bridge.dispatch(&PlatformEvent::Resized(batch));
        }) as Box<dyn FnMut(Array)>);

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => Some(Self {
                window,
                observer,
                _callback: callback,
            }),
            Err(e) => {
                warn!(target: "platform::web", "ResizeObserver construction failed: {}", describe_js_error(&e));
                None
            }
        }
    }
}

impl ResizeObservation for WebResizeObserver {
    fn observe(&self, element_id: &ElementId) -> Result<(), BridgeError> {
        let element = self
            .window
            .document()
            .and_then(|document| document.get_element_by_id(element_id.as_str()))
            .ok_or_else(|| BridgeError::ElementNotFound(element_id.clone()))?;

        self.observer.observe(&element);
        debug!(target: "platform::web", "Observing '{}'", element_id);
        Ok(())
    }
}

impl Drop for WebResizeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

//=========================================================================
// Browser Tests
//=========================================================================
