//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges host backends (web-sys/Winit) with the forwarding core.
//
// This module defines the contract between host implementations and the
// bridge, so backends can be swapped without changing core code.
//
// Components:
// - `interface`: Event types, arming traits and error definitions
// - `event_collector`: Core-side channel drain for threaded hosts
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use event_collector::{SignalPump, TickControl};
pub use interface::{BridgeError, PlatformEvent, ResizeObservation, SignalSource};
