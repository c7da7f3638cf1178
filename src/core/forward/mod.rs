//=========================================================================
// Forwarders
//=========================================================================
//
// Resolve normalized host signals into module calls and apply them.
//
// Components:
// - `resize`: resize batches → `resize_exact` / `resize`
// - `color`: dark-scheme transitions → `color_mode_change`
// - `fragment`: hash navigation → `fragment_change`
//
// Every forwarder does a bounded amount of work per notification and never
// suspends.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod color;
pub mod fragment;
pub mod resize;

//=== Public API ==========================================================

pub use color::ColorSchemeForwarder;
pub use fragment::{FragmentForwarder, FragmentNotification};
pub use resize::ResizeForwarder;
