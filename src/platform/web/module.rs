//=========================================================================
// JS Module Handle
//
// Resolves the external module's entry points once and calls them for the
// bridge.
//
// Notes:
// - Entry points are looked up by name when the module resolves; a
//   missing one fails the load instead of the first forwarded signal.
// - Exceptions thrown by an entry point are logged and swallowed.
//
//=========================================================================

use js_sys::{Function, Promise, Reflect};
use log::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::describe_js_error;
use crate::core::module::ModuleHandle;
use crate::core::platform_bridge::BridgeError;
use crate::core::signal::ColorMode;

//=== EntryPoints =========================================================

/// Export names the bridge calls on the loaded module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoints {
    pub resize_exact: String,
    pub resize: String,
    pub color_mode_change: String,
    pub fragment_change: String,
}

impl Default for EntryPoints {
    fn default() -> Self {
        Self {
            resize_exact: "f_canvas_resize_exact".to_string(),
            resize: "f_canvas_resize".to_string(),
            color_mode_change: "f_color_mode_change".to_string(),
            fragment_change: "f_fragment_change".to_string(),
        }
    }
}

impl EntryPoints {
    pub fn with_resize_exact(mut self, name: impl Into<String>) -> Self {
        self.resize_exact = name.into();
        self
    }

    pub fn with_resize(mut self, name: impl Into<String>) -> Self {
        self.resize = name.into();
        self
    }

    pub fn with_color_mode_change(mut self, name: impl Into<String>) -> Self {
        self.color_mode_change = name.into();
        self
    }

    pub fn with_fragment_change(mut self, name: impl Into<String>) -> Self {
        self.fragment_change = name.into();
        self
    }
}

//=== JsModule ============================================================

/// A loaded JS module with its four entry points resolved.
pub struct JsModule {
    module: JsValue,
    resize_exact: Function,
    resize: Function,
    color_mode_change: Function,
    fragment_change: Function,
}

impl JsModule {
    /// Resolves every entry point on `module`.
    ///
    /// # Errors
    ///
    /// [`BridgeError::MissingEntryPoint`] naming the first export that is
    /// absent or not callable.
    pub fn resolve(module: JsValue, entry_points: &EntryPoints) -> Result<Self, BridgeError> {
        let lookup = |name: &str| -> Result<Function, BridgeError> {
            Reflect::get(&module, &JsValue::from_str(name))
                .ok()
                .and_then(|value| value.dyn_into::<Function>().ok())
                .ok_or_else(|| BridgeError::MissingEntryPoint(name.to_string()))
        };

        Ok(Self {
            resize_exact: lookup(&entry_points.resize_exact)?,
            resize: lookup(&entry_points.resize)?,
            color_mode_change: lookup(&entry_points.color_mode_change)?,
            fragment_change: lookup(&entry_points.fragment_change)?,
            module,
        })
    }

    fn report(entry_point: &str, result: Result<JsValue, JsValue>) {
        if let Err(e) = result {
            warn!(target: "platform::web", "{} threw: {}", entry_point, describe_js_error(&e));
        }
    }
}

impl ModuleHandle for JsModule {
    fn resize_exact(&self, element_id: &str, inline_size: f64, block_size: f64) {
        let result = self.resize_exact.call3(
            &self.module,
            &JsValue::from_str(element_id),
            &JsValue::from_f64(inline_size),
            &JsValue::from_f64(block_size),
        );
        Self::report("resize_exact", result);
    }

    fn resize(&self, element_id: &str) {
        let result = self.resize.call1(&self.module, &JsValue::from_str(element_id));
        Self::report("resize", result);
    }

    fn color_mode_change(&self, mode: ColorMode) {
        let result = self
            .color_mode_change
            .call1(&self.module, &JsValue::from(mode.code()));
        Self::report("color_mode_change", result);
    }

    fn fragment_change(&self, fragment: &str) {
        let result = self.fragment_change.call1(&self.module, &JsValue::from_str(fragment));
        Self::report("fragment_change", result);
    }
}

//=== Loading =============================================================

/// Calls the module factory and awaits the module it produces.
///
/// The factory may return the module itself or a promise of it.
pub async fn load_module(factory: Function, entry_points: EntryPoints) -> Result<JsModule, BridgeError> {
    let produced = factory
        .call0(&JsValue::NULL)
        .map_err(|e| BridgeError::ModuleLoad(describe_js_error(&e)))?;

    let module = JsFuture::from(Promise::resolve(&produced))
        .await
        .map_err(|e| BridgeError::ModuleLoad(describe_js_error(&e)))?;

    debug!(target: "platform::web", "Module resolved");
    JsModule::resolve(module, &entry_points)
}

//=========================================================================
// Browser Tests
//=========================================================================
