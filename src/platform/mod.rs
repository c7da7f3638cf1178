//=========================================================================
// Platform Layer
//
// Host backends that feed `PlatformEvent`s into the bridge.
//
// - `native` (desktop): Winit window on the main thread, bridge on a core
//   thread, crossbeam channel in between
// - `web` (wasm32): web-sys callbacks calling the bridge directly
//
// Exactly one backend is compiled per target.
//
//=========================================================================

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod web;
