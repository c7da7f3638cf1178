//=========================================================================
// Event Bridge
//
// Main entry point and coordinator for the bridge.
//
// Architecture:
// ```text
//     BridgeBuilder  ──build()──>  EventBridge  ──start()──>  [Armed]
//         │                            │
//         ├─ with_color_scheme_query() ├─ loads module (ModuleLoader)
//         ├─ with_channel_capacity()   ├─ runs init hook
//         └─ with_window_*()           └─ arms SignalSource
//
//   Unloaded ─► Loading ─► Idle ─► Armed
//                           │
//                           └─ (no init hook: stays here)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::{Cell, OnceCell};
use std::fmt;
use std::future::Future;

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::forward::{
    ColorSchemeForwarder, FragmentForwarder, FragmentNotification, ResizeForwarder,
};
use crate::core::module::{HookOutcome, ModuleHandle, ModuleLoader};
use crate::core::platform_bridge::{BridgeError, PlatformEvent, SignalSource};
use crate::core::signal::ElementId;

//=== BridgeState =========================================================

/// Lifecycle of an [`EventBridge`].
///
/// There is no torn-down state; a bridge lives as long as its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// `start()` has not been called.
    Unloaded,

    /// Waiting for the external module to resolve.
    Loading,

    /// Module loaded, subscriptions not armed. Terminal when there is no
    /// init hook.
    Idle,

    /// Subscriptions armed; host signals are forwarded.
    Armed,
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Idle => "idle",
            Self::Armed => "armed",
        };
        f.write_str(name)
    }
}

//=== BridgeConfig ========================================================

/// Host-facing settings for a bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Media query whose `matches` means "prefers dark".
    pub color_scheme_query: String,

    /// Capacity of the host → core channel (threaded hosts only).
    pub channel_capacity: usize,

    /// Element id a native window reports its resizes under.
    pub window_element_id: ElementId,

    /// Title of the native window.
    pub window_title: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            color_scheme_query: "(prefers-color-scheme: dark)".to_string(),
            channel_capacity: 128,
            window_element_id: ElementId::new("canvasdiv"),
            window_title: "Canvas Host".to_string(),
        }
    }
}

//=== BridgeBuilder =======================================================

/// Builder for configuring and constructing an [`EventBridge`].
///
/// # Default Values
///
/// - **Color-scheme query**: `(prefers-color-scheme: dark)`
/// - **Channel capacity**: 128 events
/// - **Window element id**: `canvasdiv`
///
/// # Examples
///
/// ```no_run
/// use canvas_host_bridge::prelude::*;
/// # struct Renderer;
/// # impl ModuleHandle for Renderer {
/// #     fn resize_exact(&self, _: &str, _: f64, _: f64) {}
/// #     fn resize(&self, _: &str) {}
/// #     fn color_mode_change(&self, _: ColorMode) {}
/// #     fn fragment_change(&self, _: &str) {}
/// # }
///
/// let bridge = BridgeBuilder::new()
///     .with_channel_capacity(256)
///     .build::<Renderer>();
/// assert_eq!(bridge.state(), BridgeState::Unloaded);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BridgeBuilder {
    config: BridgeConfig,
}

impl BridgeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: BridgeConfig::default(),
        }
    }

    /// Sets the media query used for the color-scheme subscription.
    ///
    /// # Panics
    ///
    /// Panics if `query` is empty.
    pub fn with_color_scheme_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        assert!(!query.trim().is_empty(), "Color scheme query must not be empty");
        self.config.color_scheme_query = query;
        self
    }

    /// Sets the channel capacity for host → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    /// Sets the element id a native window's resizes are reported under.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    pub fn with_window_element_id(mut self, id: impl Into<ElementId>) -> Self {
        let id = id.into();
        assert!(!id.as_str().is_empty(), "Window element id must not be empty");
        self.config.window_element_id = id;
        self
    }

    /// Sets the native window title.
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    /// Builds an unloaded bridge for module type `M`.
    pub fn build<M: ModuleHandle>(self) -> EventBridge<M> {
        debug!(
            target: "bridge",
            "Building bridge (query: {}, channel: {})",
            self.config.color_scheme_query,
            self.config.channel_capacity
        );
        EventBridge::new(self.config)
    }
}

//=== EventBridge =========================================================

/// Owns the module handle and forwards host signals into it.
///
/// The handle is stored once, when the loader resolves, and is only ever
/// read afterwards. Host callbacks share the bridge by reference (`Rc` on
/// the web, moved to the core thread on native hosts).
pub struct EventBridge<M: ModuleHandle> {
    config: BridgeConfig,
    state: Cell<BridgeState>,
    module: OnceCell<M>,
}

impl<M: ModuleHandle> EventBridge<M> {
    //--- Construction -----------------------------------------------------

    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            state: Cell::new(BridgeState::Unloaded),
            module: OnceCell::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn state(&self) -> BridgeState {
        self.state.get()
    }

    pub fn is_armed(&self) -> bool {
        self.state.get() == BridgeState::Armed
    }

    /// The loaded module handle, once resolved.
    pub fn module(&self) -> Option<&M> {
        self.module.get()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Loads the module, runs the init hook, then arms `signals`.
    ///
    /// # Lifecycle
    ///
    /// 1. `Unloaded → Loading`, await `source`
    /// 2. Store the handle, `Loading → Idle`
    /// 3. Run the loader's init hook (if any)
    /// 4. Hook present: arm color-scheme and fragment subscriptions,
    ///    `Idle → Armed`. Hook absent: stay `Idle`.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::AlreadyStarted`] unless the bridge is `Unloaded`
    /// - load, hook and subscription errors, unchanged
    pub async fn start<F, S>(
        &self,
        loader: ModuleLoader,
        source: F,
        signals: &mut S,
    ) -> Result<BridgeState, BridgeError>
    where
        F: Future<Output = Result<M, BridgeError>>,
        S: SignalSource + ?Sized,
    {
        if self.state.get() != BridgeState::Unloaded {
            return Err(BridgeError::AlreadyStarted);
        }

        self.transition(BridgeState::Loading);
        let loaded = loader.load(source, &self.module).await;
        if self.module.get().is_some() {
            self.transition(BridgeState::Idle);
        }

        match loaded? {
            HookOutcome::Absent => Ok(BridgeState::Idle),
            HookOutcome::Ran => {
                signals.arm_color_scheme()?;
                signals.arm_fragment()?;
                self.transition(BridgeState::Armed);
                Ok(BridgeState::Armed)
            }
        }
    }

    //--- Forwarding -------------------------------------------------------

    /// Forwards one host event. Returns the number of module calls made.
    ///
    /// Events reaching a bridge that is not armed are dropped.
    pub fn dispatch(&self, event: &PlatformEvent) -> usize {
        let Some(module) = self.armed_module() else {
            trace!(target: "bridge", "Dropping {:?} (bridge {})", event, self.state.get());
            return 0;
        };

        match event {
            PlatformEvent::Resized(batch) => ResizeForwarder::forward(batch, module),
            PlatformEvent::ColorSchemeChanged { prefers_dark } => {
                ColorSchemeForwarder::forward(*prefers_dark, module)
            }
            PlatformEvent::FragmentChanged(fragment) => {
                FragmentForwarder::resolve(fragment.clone()).apply(module);
                1
            }
            PlatformEvent::HostClosed => 0,
        }
    }

    /// Handles a fragment notification delivered straight from a host
    /// callback: suppresses the default, reads the fragment, forwards it.
    pub fn on_fragment_notification<N: FragmentNotification + ?Sized>(&self, notification: &N) -> usize {
        match self.armed_module() {
            Some(module) => FragmentForwarder::forward(notification, module),
            None => {
                trace!(target: "bridge", "Dropping fragment notification (bridge {})", self.state.get());
                0
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn armed_module(&self) -> Option<&M> {
        if self.is_armed() {
            self.module.get()
        } else {
            None
        }
    }

    fn transition(&self, next: BridgeState) {
        let prev = self.state.replace(next);
        info!(target: "bridge::loader", "Bridge {} -> {}", prev, next);
    }
}

//=========================================================================
// Test Support
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use futures::future::ready;

    use super::testing::{armed_bridge, CountingSignals};
    use super::*;
    use crate::core::module::handle::testing::RecordingModule;
    use crate::core::module::ModuleCall;
    use crate::core::signal::{BoxSize, ColorMode, Fragment, ResizeBatch, ResizeRecord};

    /// Arming order probe: records whether the hook had run when arming.
    struct OrderedSignals {
        hook_ran: Rc<Cell<bool>>,
        armed_after_hook: bool,
    }

    impl SignalSource for OrderedSignals {
        fn arm_color_scheme(&mut self) -> Result<(), BridgeError> {
            self.armed_after_hook = self.hook_ran.get();
            Ok(())
        }

        fn arm_fragment(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }
    }

    struct FailingSignals;

    impl SignalSource for FailingSignals {
        fn arm_color_scheme(&mut self) -> Result<(), BridgeError> {
            Err(BridgeError::Subscription("matchMedia unavailable".into()))
        }

        fn arm_fragment(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }
    }

    fn recording() -> futures::future::Ready<Result<RecordingModule, BridgeError>> {
        ready(Ok(RecordingModule::new()))
    }

    //=====================================================================
    // BridgeBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = BridgeBuilder::new();
        assert_eq!(builder.config.color_scheme_query, "(prefers-color-scheme: dark)");
        assert_eq!(builder.config.channel_capacity, 128);
        assert_eq!(builder.config.window_element_id.as_str(), "canvasdiv");
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let bridge = BridgeBuilder::new()
            .with_color_scheme_query("(prefers-color-scheme: light)")
            .with_channel_capacity(16)
            .with_window_element_id("viewer")
            .with_window_title("Viewer")
            .build::<RecordingModule>();

        assert_eq!(bridge.config().channel_capacity, 16);
        assert_eq!(bridge.config().window_element_id.as_str(), "viewer");
        assert_eq!(bridge.config().window_title, "Viewer");
        assert_eq!(bridge.state(), BridgeState::Unloaded);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        BridgeBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Color scheme query must not be empty")]
    fn builder_with_empty_query_panics() {
        BridgeBuilder::new().with_color_scheme_query("  ");
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn start_with_hook_arms_both_subscriptions() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let mut signals = CountingSignals::default();
        let loader = ModuleLoader::new().with_init_hook(|| Ok(()));

        let state = block_on(bridge.start(loader, recording(), &mut signals)).unwrap();

        assert_eq!(state, BridgeState::Armed);
        assert!(bridge.is_armed());
        assert_eq!(signals.color_armed, 1);
        assert_eq!(signals.fragment_armed, 1);
    }

    #[test]
    fn hook_runs_before_any_arming() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let hook_ran = Rc::new(Cell::new(false));
        let mut signals = OrderedSignals {
            hook_ran: Rc::clone(&hook_ran),
            armed_after_hook: false,
        };

        let flag = Rc::clone(&hook_ran);
        let loader = ModuleLoader::new().with_init_hook(move || {
            flag.set(true);
            Ok(())
        });

        block_on(bridge.start(loader, recording(), &mut signals)).unwrap();

        assert!(signals.armed_after_hook);
    }

    #[test]
    fn start_without_hook_stays_idle_and_arms_nothing() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let mut signals = CountingSignals::default();

        let state = block_on(bridge.start(ModuleLoader::new(), recording(), &mut signals)).unwrap();

        assert_eq!(state, BridgeState::Idle);
        assert_eq!(signals.color_armed, 0);
        assert_eq!(signals.fragment_armed, 0);
        assert!(bridge.module().is_some());
    }

    #[test]
    fn idle_bridge_forwards_nothing() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let mut signals = CountingSignals::default();
        block_on(bridge.start(ModuleLoader::new(), recording(), &mut signals)).unwrap();

        let events = [
            PlatformEvent::Resized(ResizeBatch::new(vec![ResizeRecord::logical("main")])),
            PlatformEvent::ColorSchemeChanged { prefers_dark: true },
            PlatformEvent::FragmentChanged(Fragment::new("#a")),
        ];
        let forwarded: usize = events.iter().map(|e| bridge.dispatch(e)).sum();

        assert_eq!(forwarded, 0);
        assert!(bridge.module().unwrap().calls().is_empty());
    }

    #[test]
    fn unloaded_bridge_forwards_nothing() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let event = PlatformEvent::ColorSchemeChanged { prefers_dark: true };
        assert_eq!(bridge.dispatch(&event), 0);
    }

    #[test]
    fn second_start_is_rejected() {
        let bridge = armed_bridge();
        let mut signals = CountingSignals::default();

        let result = block_on(bridge.start(ModuleLoader::new(), recording(), &mut signals));

        assert!(matches!(result, Err(BridgeError::AlreadyStarted)));
        assert_eq!(signals.color_armed, 0);
        assert_eq!(bridge.state(), BridgeState::Armed);
    }

    #[test]
    fn failing_hook_leaves_bridge_idle() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let mut signals = CountingSignals::default();
        let loader =
            ModuleLoader::new().with_init_hook(|| Err(BridgeError::InitHook("initPlate threw".into())));

        let result = block_on(bridge.start(loader, recording(), &mut signals));

        assert!(matches!(result, Err(BridgeError::InitHook(_))));
        assert_eq!(bridge.state(), BridgeState::Idle);
        assert_eq!(signals.color_armed, 0);
    }

    #[test]
    fn failed_load_stays_loading() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let mut signals = CountingSignals::default();
        let source = ready(Err(BridgeError::ModuleLoad("fetch failed".into())));

        let result = block_on(bridge.start(ModuleLoader::new(), source, &mut signals));

        assert!(matches!(result, Err(BridgeError::ModuleLoad(_))));
        assert_eq!(bridge.state(), BridgeState::Loading);
        assert!(bridge.module().is_none());
    }

    #[test]
    fn arming_failure_propagates() {
        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        let loader = ModuleLoader::new().with_init_hook(|| Ok(()));

        let result = block_on(bridge.start(loader, recording(), &mut FailingSignals));

        assert!(matches!(result, Err(BridgeError::Subscription(_))));
        assert_eq!(bridge.state(), BridgeState::Idle);
    }

    //=====================================================================
    // Dispatch Tests
    //=====================================================================

    #[test]
    fn resize_scenario_exact() {
        let bridge = armed_bridge();
        let batch = ResizeBatch::new(vec![ResizeRecord::exact(
            "main",
            vec![BoxSize::new(800.0, 600.0)],
        )]);

        assert_eq!(bridge.dispatch(&PlatformEvent::Resized(batch)), 1);
        assert_eq!(
            bridge.module().unwrap().calls(),
            vec![ModuleCall::ResizeExact {
                element_id: "main".into(),
                size: BoxSize::new(800.0, 600.0),
            }]
        );
    }

    #[test]
    fn resize_scenario_remeasure() {
        let bridge = armed_bridge();
        let batch = ResizeBatch::new(vec![ResizeRecord::logical("main")]);

        bridge.dispatch(&PlatformEvent::Resized(batch));

        assert_eq!(
            bridge.module().unwrap().calls(),
            vec![ModuleCall::Resize { element_id: "main".into() }]
        );
    }

    #[test]
    fn color_scheme_scenario() {
        let bridge = armed_bridge();

        bridge.dispatch(&PlatformEvent::ColorSchemeChanged { prefers_dark: true });

        assert_eq!(
            bridge.module().unwrap().calls(),
            vec![ModuleCall::ColorModeChange(ColorMode::Dark)]
        );
    }

    #[test]
    fn channel_fragment_is_forwarded_verbatim() {
        let bridge = armed_bridge();

        bridge.dispatch(&PlatformEvent::FragmentChanged(Fragment::new("#panel2")));

        assert_eq!(
            bridge.module().unwrap().calls(),
            vec![ModuleCall::FragmentChange(Fragment::new("#panel2"))]
        );
    }

    #[test]
    fn host_closed_forwards_nothing() {
        let bridge = armed_bridge();
        assert_eq!(bridge.dispatch(&PlatformEvent::HostClosed), 0);
    }

    #[test]
    fn fragment_notification_on_unarmed_bridge_is_dropped() {
        struct Never;

        impl FragmentNotification for Never {
            fn suppress_default(&self) {
                panic!("Unarmed bridge must not touch the notification");
            }

            fn current_fragment(&self) -> Fragment {
                panic!("Unarmed bridge must not read the fragment");
            }
        }

        let bridge = BridgeBuilder::new().build::<RecordingModule>();
        assert_eq!(bridge.on_fragment_notification(&Never), 0);
    }
}
