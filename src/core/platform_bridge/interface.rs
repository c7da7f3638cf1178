//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Host-to-core interface types (events, errors and arming contracts).
//
// Defines the contract between host backends (web-sys, Winit) and the
// bridge core, so a backend can be swapped without touching the
// forwarding logic.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::signal::{ElementId, Fragment, ResizeBatch};

//=== PlatformEvent =======================================================

/// Normalized signal sent from a host backend to the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// One resize notification batch.
    Resized(ResizeBatch),

    /// The dark color-scheme preference changed.
    ColorSchemeChanged { prefers_dark: bool },

    /// The URL fragment changed. The host has already suppressed its own
    /// navigation and read the fragment at notification time.
    FragmentChanged(Fragment),

    /// The host is shutting down (native window closed).
    HostClosed,
}

//=== BridgeError =========================================================

/// Errors raised while setting up or arming the bridge.
///
/// None of these is ever surfaced to a user interface; hosts log them.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// `observe()` was asked for an element the host does not have.
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// The resolved module does not expose a required entry point.
    #[error("module entry point missing: {0}")]
    MissingEntryPoint(String),

    /// The external loading mechanism failed to produce the module.
    #[error("module load failed: {0}")]
    ModuleLoad(String),

    /// The application initialization hook failed.
    #[error("init hook failed: {0}")]
    InitHook(String),

    /// A host subscription could not be registered.
    #[error("subscription failed: {0}")]
    Subscription(String),

    /// The native event loop could not be created or run.
    #[error("event loop error: {0}")]
    EventLoop(String),

    /// `start()` was called on a bridge that already left `Unloaded`.
    #[error("bridge already started")]
    AlreadyStarted,

    /// The logging sink could not be installed.
    #[error("logging init failed: {0}")]
    Logging(String),
}

//=== SignalSource ========================================================

/// Host-side subscriptions the bridge arms once the init hook has run.
///
/// Each method is called at most once, and only after the module handle is
/// ready and the init hook returned successfully.
pub trait SignalSource {
    /// Subscribes to dark color-scheme preference changes.
    fn arm_color_scheme(&mut self) -> Result<(), BridgeError>;

    /// Subscribes to URL fragment navigation.
    fn arm_fragment(&mut self) -> Result<(), BridgeError>;
}

//=== ResizeObservation ===================================================

/// Host resize-observation capability.
///
/// Backends only hand one of these out when the host actually supports
/// resize observation.
pub trait ResizeObservation {
    /// Starts observing `element_id`. Observing an element twice is allowed
    /// and keeps no extra state.
    fn observe(&self, element_id: &ElementId) -> Result<(), BridgeError>;
}

//=========================================================================
// Unit Tests
//=========================================================================
