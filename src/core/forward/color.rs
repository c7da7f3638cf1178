//=========================================================================
// Color-Scheme Forwarder
//=========================================================================
//
// Forwards dark-scheme preference transitions as `color_mode_change`.
//
// Only transitions reach the module: nothing is sent when the
// subscription is made, and repeated identical notifications are each
// forwarded.
//
//=========================================================================

use log::debug;

use crate::core::module::{ModuleCall, ModuleHandle};
use crate::core::signal::ColorMode;

/// Stateless resolver for color-scheme notifications.
pub struct ColorSchemeForwarder;

impl ColorSchemeForwarder {
    pub fn resolve(prefers_dark: bool) -> ModuleCall {
        ModuleCall::ColorModeChange(ColorMode::from_prefers_dark(prefers_dark))
    }

    pub fn forward<M: ModuleHandle + ?Sized>(prefers_dark: bool, module: &M) -> usize {
        let call = Self::resolve(prefers_dark);
        debug!(target: "bridge", "Color scheme changed (prefers dark: {})", prefers_dark);
        call.apply(module);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module::handle::testing::RecordingModule;

    #[test]
    fn dark_match_forwards_mode_one() {
        let module = RecordingModule::new();
        ColorSchemeForwarder::forward(true, &module);

        assert_eq!(module.calls(), vec![ModuleCall::ColorModeChange(ColorMode::Dark)]);
        assert_eq!(ColorMode::Dark.code(), 1);
    }

    #[test]
    fn light_match_forwards_mode_zero() {
        assert_eq!(
            ColorSchemeForwarder::resolve(false),
            ModuleCall::ColorModeChange(ColorMode::Light)
        );
    }

    #[test]
    fn identical_notifications_are_not_deduplicated() {
        let module = RecordingModule::new();
        ColorSchemeForwarder::forward(true, &module);
        ColorSchemeForwarder::forward(true, &module);

        assert_eq!(
            module.calls(),
            vec![
                ModuleCall::ColorModeChange(ColorMode::Dark),
                ModuleCall::ColorModeChange(ColorMode::Dark),
            ]
        );
    }
}
