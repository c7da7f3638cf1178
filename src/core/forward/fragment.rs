//=========================================================================
// Fragment Forwarder
//=========================================================================
//
// Takes over URL fragment navigation from the host.
//
// On every notification the host's own jump-to-anchor behavior is
// suppressed first, then the fragment is read from the host (at that
// moment, not from the event payload) and handed to `fragment_change`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::module::{ModuleCall, ModuleHandle};
use crate::core::signal::Fragment;

//=== FragmentNotification ================================================

/// A single fragment navigation notification, as seen by the bridge.
pub trait FragmentNotification {
    /// Prevents the host from performing its default navigation.
    fn suppress_default(&self);

    /// Reads the current fragment from the host.
    fn current_fragment(&self) -> Fragment;
}

//=== FragmentForwarder ===================================================

/// Stateless forwarder for fragment notifications.
pub struct FragmentForwarder;

impl FragmentForwarder {
    pub fn resolve(fragment: Fragment) -> ModuleCall {
        ModuleCall::FragmentChange(fragment)
    }

    /// Suppresses default navigation, then forwards the current fragment.
    pub fn forward<N, M>(notification: &N, module: &M) -> usize
    where
        N: FragmentNotification + ?Sized,
        M: ModuleHandle + ?Sized,
    {
        notification.suppress_default();
        let fragment = notification.current_fragment();
        debug!(target: "bridge", "Fragment changed: {}", fragment);
        Self::resolve(fragment).apply(module);
        1
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::core::module::handle::testing::RecordingModule;

    /// Host double whose fragment can change after the event was created.
    struct FakeHashChange {
        suppressed: Cell<bool>,
        location_hash: RefCell<String>,
        reads: Cell<usize>,
    }

    impl FakeHashChange {
        fn new(hash: &str) -> Self {
            Self {
                suppressed: Cell::new(false),
                location_hash: RefCell::new(hash.to_string()),
                reads: Cell::new(0),
            }
        }
    }

    impl FragmentNotification for FakeHashChange {
        fn suppress_default(&self) {
            assert_eq!(self.reads.get(), 0, "Default must be suppressed before reading");
            self.suppressed.set(true);
        }

        fn current_fragment(&self) -> Fragment {
            self.reads.set(self.reads.get() + 1);
            Fragment::new(self.location_hash.borrow().clone())
        }
    }

    #[test]
    fn hash_navigation_is_suppressed_and_forwarded() {
        let module = RecordingModule::new();
        let notification = FakeHashChange::new("#panel2");

        let forwarded = FragmentForwarder::forward(&notification, &module);

        assert_eq!(forwarded, 1);
        assert!(notification.suppressed.get());
        assert_eq!(
            module.calls(),
            vec![ModuleCall::FragmentChange(Fragment::new("#panel2"))]
        );
    }

    #[test]
    fn fragment_is_read_at_call_time() {
        let module = RecordingModule::new();
        let notification = FakeHashChange::new("#old");

        *notification.location_hash.borrow_mut() = "#new".to_string();
        FragmentForwarder::forward(&notification, &module);

        assert_eq!(
            module.calls(),
            vec![ModuleCall::FragmentChange(Fragment::new("#new"))]
        );
        assert_eq!(notification.reads.get(), 1);
    }

    #[test]
    fn empty_fragment_is_forwarded_verbatim() {
        let module = RecordingModule::new();
        FragmentForwarder::forward(&FakeHashChange::new(""), &module);

        assert_eq!(
            module.calls(),
            vec![ModuleCall::FragmentChange(Fragment::new(""))]
        );
    }
}
