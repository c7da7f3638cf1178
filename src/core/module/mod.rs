//=========================================================================
// External Module
//=========================================================================
//
// The opaque render/compute module and how the bridge obtains it.
//
// Components:
// - `handle`: the four entry points and resolved `ModuleCall`s
// - `loader`: one-shot async resolution plus the optional init hook
//
//=========================================================================

//=== Module Declarations =================================================

pub mod handle;
pub mod loader;

//=== Public API ==========================================================

pub use handle::{ModuleCall, ModuleHandle};
pub use loader::{HookOutcome, InitHook, ModuleLoader};
