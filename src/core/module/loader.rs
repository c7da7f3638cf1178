//=========================================================================
// Module Loader
//=========================================================================
//
// Resolves the external module once and runs the application init hook.
//
// Lifecycle:
// ```text
//   ModuleLoader ──load(source, slot)──> slot holds handle
//        │                                    │
//        └─ init_hook: Option<InitHook> ──────┴─> hook() runs once
// ```
//
// `load` consumes the loader and the slot is write-once, so the module
// resolves at most once and the hook can never run twice. Whatever
// subscriptions depend on the hook are armed by the caller afterwards.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::OnceCell;
use std::future::Future;

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::BridgeError;

//=== InitHook ============================================================

/// Application-supplied initialization callback.
///
/// Runs synchronously with no arguments once the module handle is ready.
/// Returning an error keeps the bridge from arming.
pub type InitHook = Box<dyn FnOnce() -> Result<(), BridgeError>>;

//=== HookOutcome =========================================================

/// Whether an init hook was present and ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The hook ran and returned successfully.
    Ran,

    /// No hook was configured. The module is loaded but stays inert.
    Absent,
}

//=== ModuleLoader ========================================================

/// One-shot loader for the external module.
#[derive(Default)]
pub struct ModuleLoader {
    init_hook: Option<InitHook>,
}

impl ModuleLoader {
    /// Creates a loader without an init hook.
    pub fn new() -> Self {
        Self { init_hook: None }
    }

    /// Sets the init hook run after the module resolves.
    pub fn with_init_hook<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Result<(), BridgeError> + 'static,
    {
        self.init_hook = Some(Box::new(hook));
        self
    }

    /// Sets or clears the init hook from an optional value.
    pub fn with_optional_init_hook(mut self, hook: Option<InitHook>) -> Self {
        self.init_hook = hook;
        self
    }

    pub fn has_init_hook(&self) -> bool {
        self.init_hook.is_some()
    }

    /// Awaits `source`, stores the handle in `slot`, then runs the hook.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::AlreadyStarted`] if `slot` already holds a module
    /// - whatever `source` fails with (the external loading mechanism)
    /// - the hook's own error
    pub async fn load<M, F>(self, source: F, slot: &OnceCell<M>) -> Result<HookOutcome, BridgeError>
    where
        F: Future<Output = Result<M, BridgeError>>,
    {
        if slot.get().is_some() {
            return Err(BridgeError::AlreadyStarted);
        }

        debug!(target: "bridge::loader", "Awaiting module");
        let module = source.await?;

        slot.set(module).map_err(|_| BridgeError::AlreadyStarted)?;
        info!(target: "bridge::loader", "Module handle ready");

        match self.init_hook {
            Some(hook) => {
                debug!(target: "bridge::loader", "Running init hook");
                hook()?;
                Ok(HookOutcome::Ran)
            }
            None => {
                info!(target: "bridge::loader", "No init hook configured; module stays inert");
                Ok(HookOutcome::Absent)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use futures::future::{ready, Ready};

    use super::*;

    fn ok_source(value: u32) -> Ready<Result<u32, BridgeError>> {
        ready(Ok(value))
    }

    #[test]
    fn load_without_hook_is_absent() {
        let slot = OnceCell::new();
        let outcome = block_on(ModuleLoader::new().load(ok_source(7), &slot)).unwrap();

        assert_eq!(outcome, HookOutcome::Absent);
        assert_eq!(slot.get(), Some(&7));
    }

    #[test]
    fn hook_runs_once_after_handle_is_stored() {
        let slot = Rc::new(OnceCell::new());
        let runs = Rc::new(Cell::new(0));

        let slot_in_hook = Rc::clone(&slot);
        let runs_in_hook = Rc::clone(&runs);
        let loader = ModuleLoader::new().with_init_hook(move || {
            assert_eq!(slot_in_hook.get(), Some(&42), "Handle must be ready before hook");
            runs_in_hook.set(runs_in_hook.get() + 1);
            Ok(())
        });

        let outcome = block_on(loader.load(ok_source(42), &*slot)).unwrap();

        assert_eq!(outcome, HookOutcome::Ran);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn second_load_into_same_slot_is_rejected() {
        let slot = OnceCell::new();
        block_on(ModuleLoader::new().load(ok_source(1), &slot)).unwrap();

        let result = block_on(ModuleLoader::new().load(ok_source(2), &slot));

        assert!(matches!(result, Err(BridgeError::AlreadyStarted)));
        assert_eq!(slot.get(), Some(&1), "Original handle must be kept");
    }

    #[test]
    fn source_failure_propagates_and_skips_hook() {
        let slot: OnceCell<u32> = OnceCell::new();
        let ran = Rc::new(Cell::new(false));
        let ran_in_hook = Rc::clone(&ran);

        let loader = ModuleLoader::new().with_init_hook(move || {
            ran_in_hook.set(true);
            Ok(())
        });
        let source = ready(Err(BridgeError::ModuleLoad("404".into())));

        let result = block_on(loader.load(source, &slot));

        assert!(matches!(result, Err(BridgeError::ModuleLoad(_))));
        assert!(!ran.get());
        assert!(slot.get().is_none());
    }

    #[test]
    fn hook_failure_is_reported_but_handle_kept() {
        let slot = OnceCell::new();
        let loader =
            ModuleLoader::new().with_init_hook(|| Err(BridgeError::InitHook("boom".into())));

        let result = block_on(loader.load(ok_source(3), &slot));

        assert!(matches!(result, Err(BridgeError::InitHook(_))));
        assert_eq!(slot.get(), Some(&3));
    }

    #[test]
    fn optional_hook_none_clears() {
        let loader = ModuleLoader::new()
            .with_init_hook(|| Ok(()))
            .with_optional_init_hook(None);
        assert!(!loader.has_init_hook());
    }
}
