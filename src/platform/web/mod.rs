//=========================================================================
// Web Host
//
// Browser backend built on web-sys. Everything runs on the page's single
// thread: host callbacks share the bridge through `Rc` and call straight
// into it, so there is no channel and no pump.
//
// Architecture:
// ```text
//   matchMedia("change") ──┐
//   window("hashchange") ──┼──> Closure ──> Rc<EventBridge<JsModule>> ──> JS entry points
//   ResizeObserver ────────┘
// ```
//
// Components:
// - `WebSignals`: color-scheme and fragment subscriptions (armed by the bridge)
// - `resize_observer`: ResizeObserver capability and batch conversion
// - `module`: JS module handle and factory loading
// - `exports`: `#[wasm_bindgen]` surface (`HostBridge`, `init_logging`)
//
//=========================================================================

//=== Submodules ==========================================================

pub mod exports;
pub mod module;
pub mod resize_observer;

//=== External Crates =====================================================

use std::rc::Rc;

use log::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HashChangeEvent, Location, MediaQueryList, MediaQueryListEvent, Window};

//=== Internal Imports ====================================================

use crate::bridge::EventBridge;
use crate::core::forward::FragmentNotification;
use crate::core::platform_bridge::{BridgeError, PlatformEvent, SignalSource};
use crate::core::signal::Fragment;
use module::JsModule;

pub use exports::{init_logging, HostBridge};
pub use module::{load_module, EntryPoints};
pub use resize_observer::WebResizeObserver;

//=== Helpers =============================================================

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

//=== HashChange ==========================================================

/// One `hashchange` notification, read against the live location.
pub(crate) struct HashChange<'a> {
    event: &'a HashChangeEvent,
    location: &'a Location,
}

impl FragmentNotification for HashChange<'_> {
    fn suppress_default(&self) {
        self.event.prevent_default();
    }

    fn current_fragment(&self) -> Fragment {
        match self.location.hash() {
            Ok(hash) => Fragment::new(hash),
            Err(e) => {
                warn!(target: "platform::web", "location.hash unreadable: {}", describe_js_error(&e));
                Fragment::new("")
            }
        }
    }
}

//=== WebSignals ==========================================================

type ColorListener = Closure<dyn FnMut(MediaQueryListEvent)>;
type FragmentListener = Closure<dyn FnMut(HashChangeEvent)>;

/// Browser subscriptions for color-scheme and fragment changes.
///
/// Registered closures are owned here and unregistered on drop, so the
/// value must live as long as the bridge should keep forwarding.
pub struct WebSignals {
    bridge: Rc<EventBridge<JsModule>>,
    window: Window,
    color_listener: Option<(MediaQueryList, ColorListener)>,
    fragment_listener: Option<FragmentListener>,
}

impl WebSignals {
    pub fn new(bridge: Rc<EventBridge<JsModule>>, window: Window) -> Self {
        Self {
            bridge,
            window,
            color_listener: None,
            fragment_listener: None,
        }
    }

    pub fn color_scheme_armed(&self) -> bool {
        self.color_listener.is_some()
    }

    pub fn fragment_armed(&self) -> bool {
        self.fragment_listener.is_some()
    }
}

impl SignalSource for WebSignals {
    fn arm_color_scheme(&mut self) -> Result<(), BridgeError> {
        let query = self.bridge.config().color_scheme_query.clone();

        let list = match self.window.match_media(&query) {
            Ok(Some(list)) => list,
            Ok(None) => {
                info!(target: "platform::web", "matchMedia unsupported; color scheme not forwarded");
                return Ok(());
            }
            Err(e) => return Err(BridgeError::Subscription(describe_js_error(&e))),
        };

        let bridge = Rc::clone(&self.bridge);
        let listener = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            bridge.dispatch(&PlatformEvent::ColorSchemeChanged {
                prefers_dark: event.matches(),
            });
        }) as Box<dyn FnMut(MediaQueryListEvent)>);

        list.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .map_err(|e| BridgeError::Subscription(describe_js_error(&e)))?;

        debug!(target: "platform::web", "Listening for '{}'", query);
        self.color_listener = Some((list, listener));
        Ok(())
    }

    fn arm_fragment(&mut self) -> Result<(), BridgeError> {
        let bridge = Rc::clone(&self.bridge);
        let location = self.window.location();
        let listener = Closure::wrap(Box::new(move |event: HashChangeEvent| {
            bridge.on_fragment_notification(&HashChange {
                event: &event,
                location: &location,
            });
        }) as Box<dyn FnMut(HashChangeEvent)>);

        self.window
            .add_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref())
            .map_err(|e| BridgeError::Subscription(describe_js_error(&e)))?;

        debug!(target: "platform::web", "Listening for hashchange");
        self.fragment_listener = Some(listener);
        Ok(())
    }
}

impl Drop for WebSignals {
    fn drop(&mut self) {
        if let Some((list, listener)) = self.color_listener.take() {
            let _ = list.remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
        }
        if let Some(listener) = self.fragment_listener.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref());
        }
    }
}

//=========================================================================
// Browser Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::bridge::BridgeBuilder;

    wasm_bindgen_test_configure!(run_in_browser);

    fn window() -> Window {
        web_sys::window().unwrap()
    }

    #[wasm_bindgen_test]
    fn arming_registers_both_listeners() {
        let bridge = Rc::new(BridgeBuilder::new().build::<JsModule>());
        let mut signals = WebSignals::new(bridge, window());

        signals.arm_color_scheme().unwrap();
        signals.arm_fragment().unwrap();

        assert!(signals.color_scheme_armed());
        assert!(signals.fragment_armed());
    }

    #[wasm_bindgen_test]
    fn hash_change_reads_live_location() {
        let location = window().location();
        location.set_hash("#panel2").unwrap();

        let event = HashChangeEvent::new("hashchange").unwrap();
        let notification = HashChange {
            event: &event,
            location: &location,
        };

        assert_eq!(notification.current_fragment(), Fragment::new("#panel2"));
    }

    #[wasm_bindgen_test]
    fn describe_js_error_prefers_strings() {
        assert_eq!(describe_js_error(&JsValue::from_str("boom")), "boom");
        assert!(!describe_js_error(&JsValue::from_f64(1.0)).is_empty());
    }
}
