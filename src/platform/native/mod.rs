//=========================================================================
// Native Host
//
// Bridges a Winit desktop window with the bridge core thread via MPSC.
//
// Architecture:
// ```text
//  Main Thread:                      Core Thread:
//  ┌───────────────────────────┐    ┌──────────────────────┐
//  │  ModuleLoader (block_on)  │    │                      │
//  │   ↓ init hook, arming     │    │  SignalPump          │
//  │  Winit Event Loop         │    │   ↓                  │
//  │   ↓                       │    │  EventBridge         │
//  │  event_mapper             │    │   ↓                  │
//  │   ↓                       │    │  ModuleHandle        │
//  │  MPSC Channel ────────────┼───►│                      │
//  └───────────────────────────┘    └──────────────────────┘
//                PlatformEvent
// ```
//
// Key Design Decisions:
// - **Window = observed element**: the window is registered under the
//   configured element id when it is created; there is nothing else to
//   observe on a desktop host
// - **Physical size = device-pixel box**: `Resized` carries exact sizes,
//   `ScaleFactorChanged` asks the module to re-measure
// - **No fragment source**: arming fragment forwarding is a logged no-op
// - **Graceful channel disconnect**: if the core thread dies, the platform
//   logs a warning but keeps running so the window can still be closed
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== External Crates =====================================================

use std::thread;

use crossbeam_channel::{bounded, Sender};
use futures::executor::block_on;
use futures::future::ready;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::bridge::{BridgeConfig, BridgeState, EventBridge};
use crate::core::module::{ModuleHandle, ModuleLoader};
use crate::core::platform_bridge::{BridgeError, PlatformEvent, SignalPump, SignalSource};
use crate::core::signal::ElementId;
use event_mapper::map_window_event;

//=== NativeSignals =======================================================

/// Arming state for the native host's subscriptions.
#[derive(Debug, Default)]
pub(crate) struct NativeSignals {
    color_scheme: bool,
}

impl SignalSource for NativeSignals {
    fn arm_color_scheme(&mut self) -> Result<(), BridgeError> {
        debug!(target: "platform::native", "Theme changes armed");
        self.color_scheme = true;
        Ok(())
    }

    fn arm_fragment(&mut self) -> Result<(), BridgeError> {
        info!(target: "platform::native", "Native host has no URL fragment; fragment forwarding disabled");
        Ok(())
    }
}

//=== NativeHost ==========================================================

/// Runs a bridge against a desktop window.
///
/// # Lifecycle
///
/// 1. Starts the bridge on the calling thread (module, init hook, arming)
/// 2. Spawns the core thread running a [`SignalPump`]
/// 3. Runs the Winit event loop (blocks here)
/// 4. On window close: `HostClosed` → pump exits → core thread joins
pub struct NativeHost<M: ModuleHandle> {
    bridge: EventBridge<M>,
    loader: ModuleLoader,
}

impl<M: ModuleHandle + Send + 'static> NativeHost<M> {
    pub fn new(bridge: EventBridge<M>, loader: ModuleLoader) -> Self {
        Self { bridge, loader }
    }

    /// Loads `module` and blocks until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns bridge start errors, thread spawn failures and event loop
    /// errors. A panicking core thread is logged, not returned.
    pub fn run(self, module: M) -> Result<(), BridgeError> {
        let config = self.bridge.config().clone();
        let mut signals = NativeSignals::default();

        //--- 1. Load module, run hook, arm ------------------------------
        let state = block_on(self.bridge.start(self.loader, ready(Ok(module)), &mut signals))?;
        info!(target: "platform::native", "Bridge started ({})", state);

        //--- 2. Spawn the core thread ------------------------------------
        let (tx, rx) = bounded(config.channel_capacity);
        let pump = SignalPump::new(rx, self.bridge);
        let core_handle = thread::Builder::new()
            .name("bridge-core".to_string())
            .spawn(move || pump.run())
            .map_err(|e| BridgeError::EventLoop(e.to_string()))?;

        //--- 3. Run the window loop --------------------------------------
        let platform = NativePlatform::new(tx, &config, state == BridgeState::Armed, signals.color_scheme);
        let result = platform.run();

        //--- 4. Wait for the core thread ---------------------------------
        match core_handle.join() {
            Ok(_) => info!(target: "platform::native", "Core thread terminated cleanly"),
            Err(e) => error!(target: "platform::native", "Core thread panicked: {:?}", e),
        }

        result
    }
}

//=== NativePlatform ======================================================

/// Window owner and event forwarder.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// mapped events to the core thread.
///
/// # Fields
///
/// - `window`: Created lazily in `resumed()`
/// - `element_id`: Id the window's resizes are reported under
/// - `resize_armed` / `color_armed`: Which events are forwarded at all
pub(crate) struct NativePlatform {
    window: Option<Window>,
    element_id: ElementId,
    title: String,
    event_sender: Sender<PlatformEvent>,
    resize_armed: bool,
    color_armed: bool,
}

impl NativePlatform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        config: &BridgeConfig,
        resize_armed: bool,
        color_armed: bool,
    ) -> Self {
        info!(target: "platform::native", "Native platform initialized");
        Self {
            window: None,
            element_id: config.window_element_id.clone(),
            title: config.window_title.clone(),
            event_sender,
            resize_armed,
            color_armed,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    pub(crate) fn run(mut self) -> Result<(), BridgeError> {
        debug!(target: "platform::native", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(|e| BridgeError::EventLoop(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| BridgeError::EventLoop(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    fn is_forwarded(&self, event: &PlatformEvent) -> bool {
        match event {
            PlatformEvent::Resized(_) => self.resize_armed,
            PlatformEvent::ColorSchemeChanged { .. } => self.color_armed,
            PlatformEvent::FragmentChanged(_) => false,
            PlatformEvent::HostClosed => true,
        }
    }

    /// Sends an event to the core thread.
    ///
    /// If the channel is disconnected (core thread panicked or exited
    /// early), logs a warning and drops the event.
    fn forward(&self, event: PlatformEvent) {
        if !self.is_forwarded(&event) {
            trace!(target: "platform::native", "Not armed, ignoring {:?}", event);
            return;
        }

        if self.event_sender.send(event).is_err() {
            warn!(target: "platform::native", "Channel disconnected, dropping event");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for NativePlatform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform::native", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform::native",
                    "Observing window as '{}': {}x{} @ {}x DPI",
                    self.element_id,
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform::native", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::HostClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            info!(target: "platform::native", "Window close requested");
            self.forward(PlatformEvent::HostClosed);
            event_loop.exit();
            return;
        }

        if let Some(mapped) = map_window_event(&event, &self.element_id) {
            self.forward(mapped);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
