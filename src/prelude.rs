//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use canvas_host_bridge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Bridge facade
pub use crate::bridge::{BridgeBuilder, BridgeConfig, BridgeState, EventBridge};

// Module contract and loading
pub use crate::core::module::{InitHook, ModuleCall, ModuleHandle, ModuleLoader};

// Host signals
pub use crate::core::signal::{BoxSize, ColorMode, ElementId, Fragment, ResizeBatch, ResizeRecord};

// Host contract
pub use crate::core::platform_bridge::{BridgeError, PlatformEvent, SignalSource};

// Host backends
#[cfg(not(target_arch = "wasm32"))]
pub use crate::platform::native::NativeHost;

#[cfg(target_arch = "wasm32")]
pub use crate::platform::web::{EntryPoints, HostBridge};
