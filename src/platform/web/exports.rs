//=========================================================================
// Web Exports
//
// `#[wasm_bindgen]` surface used by the page's glue script:
//
// ```text
//   init_logging("info");
//   const bridge = new HostBridge();
//   bridge.observe("canvasdiv");
//   await bridge.start(() => import("./module.js"), initPlate);
// ```
//
// Errors cross the boundary as JS `Error`s carrying the `BridgeError`
// message.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use log::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::module::{load_module, EntryPoints, JsModule};
use super::resize_observer::WebResizeObserver;
use super::{describe_js_error, WebSignals};
use crate::bridge::{BridgeBuilder, EventBridge};
use crate::core::module::{InitHook, ModuleLoader};
use crate::core::platform_bridge::{BridgeError, ResizeObservation};
use crate::core::signal::ElementId;
use crate::logging;

//=== Error Conversion ====================================================

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Wraps a JS init hook so a thrown exception becomes a bridge error.
fn js_init_hook(hook: Function) -> InitHook {
    Box::new(move || {
        hook.call0(&JsValue::NULL)
            .map(|_| ())
            .map_err(|e| BridgeError::InitHook(describe_js_error(&e)))
    })
}

//=== HostBridge ==========================================================

/// Page-facing bridge between the browser and a loaded module.
#[wasm_bindgen]
pub struct HostBridge {
    bridge: Rc<EventBridge<JsModule>>,
    entry_points: EntryPoints,
    resize_observer: Option<WebResizeObserver>,
    signals: Rc<RefCell<Option<WebSignals>>>,
}

#[wasm_bindgen]
impl HostBridge {
    /// Creates an unloaded bridge. `color_scheme_query` overrides the dark
    /// preference media query.
    #[wasm_bindgen(constructor)]
    pub fn new(color_scheme_query: Option<String>) -> HostBridge {
        let mut builder = BridgeBuilder::new();
        if let Some(query) = color_scheme_query.filter(|q| !q.trim().is_empty()) {
            builder = builder.with_color_scheme_query(query);
        }

        let bridge = Rc::new(builder.build::<JsModule>());
        let resize_observer = web_sys::window().and_then(|window| WebResizeObserver::new(window, Rc::clone(&bridge)));

        HostBridge {
            bridge,
            entry_points: EntryPoints::default(),
            resize_observer,
            signals: Rc::new(RefCell::new(None)),
        }
    }

    /// Starts forwarding resizes of the element with this id.
    ///
    /// A no-op when the browser has no ResizeObserver.
    pub fn observe(&self, element_id: &str) -> Result<(), JsValue> {
        match &self.resize_observer {
            Some(observer) => Ok(observer.observe(&ElementId::new(element_id))?),
            None => {
                info!(target: "platform::web", "no resize observer; ignoring '{}'", element_id);
                Ok(())
            }
        }
    }

    /// Loads the module from `factory`, runs `init_hook`, then arms the
    /// color-scheme and fragment subscriptions.
    ///
    /// Resolves to the resulting state name (`"armed"` or `"idle"`).
    pub fn start(&self, factory: Function, init_hook: Option<Function>) -> Promise {
        let bridge = Rc::clone(&self.bridge);
        let slot = Rc::clone(&self.signals);
        let entry_points = self.entry_points.clone();

        future_to_promise(async move {
            let window = web_sys::window()
                .ok_or_else(|| BridgeError::Subscription("no global window".to_string()))?;
            let loader = ModuleLoader::new().with_optional_init_hook(init_hook.map(js_init_hook));
            let mut signals = WebSignals::new(Rc::clone(&bridge), window);

            let result = bridge
                .start(loader, load_module(factory, entry_points), &mut signals)
                .await;

            // A rejected second start must not replace the live listeners.
            if !matches!(result, Err(BridgeError::AlreadyStarted)) {
                slot.borrow_mut().replace(signals);
            }

            let state = result.map_err(|e| {
                error!(target: "platform::web", "Bridge start failed: {}", e);
                e
            })?;
            Ok(JsValue::from_str(&state.to_string()))
        })
    }

    /// Current lifecycle state: `unloaded`, `loading`, `idle` or `armed`.
    pub fn state(&self) -> String {
        self.bridge.state().to_string()
    }
}

//=== Logging =============================================================

/// Routes `log` output to the browser console at `level` and installs the
/// panic hook.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> Result<(), JsValue> {
    let level: Level = level
        .parse()
        .map_err(|_| JsValue::from(js_sys::Error::new(&format!("unknown log level: {}", level))))?;
    Ok(logging::init(level)?)
}

//=========================================================================
// Browser Tests
//=========================================================================
