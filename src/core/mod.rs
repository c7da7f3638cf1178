//=========================================================================
// Bridge Core
//
// Platform-agnostic half of the bridge. Nothing here touches a browser or
// a window; backends in `platform` translate host callbacks into these
// types and hand them over.
//
// Responsibilities:
// - Normalize host signals (`signal`)
// - Define the external module contract and its one-shot loader (`module`)
// - Resolve each signal into module calls (`forward`)
// - Define the host ↔ core contract and the channel pump (`platform_bridge`)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod forward;
pub mod module;
pub mod platform_bridge;
pub mod signal;
