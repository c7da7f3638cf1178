//=========================================================================
// Canvas Host Bridge — Library Root
//
// Connects an externally loaded rendering module to its host's signals:
// element resizes, the dark color-scheme preference and URL fragment
// navigation.
//
// Responsibilities:
// - Expose the bridge facade (`EventBridge`, `BridgeBuilder`)
// - Keep host backends (`platform`) behind a small, target-selected API
// - Keep forwarding rules in `core`, independent of any host
//
// Typical usage (native):
// ```no_run
// use canvas_host_bridge::prelude::*;
//
// fn run<M: ModuleHandle + Send + 'static>(module: M) -> Result<(), BridgeError> {
//     let bridge = BridgeBuilder::new().build::<M>();
//     let loader = ModuleLoader::new().with_init_hook(|| Ok(()));
//     NativeHost::new(bridge, loader).run(module)
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the forwarding rules and the host contract. It is public
// so custom hosts can drive an `EventBridge` directly.
//
pub mod core;

//--- Host Backends -------------------------------------------------------
//
// `platform` contains the Winit backend on desktop targets and the
// web-sys backend (with the `#[wasm_bindgen]` exports) on wasm32.
//
pub mod platform;

//--- Facade & Support ----------------------------------------------------

pub mod bridge;
pub mod logging;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use bridge::{BridgeBuilder, BridgeState, EventBridge};
pub use crate::core::platform_bridge::BridgeError;
