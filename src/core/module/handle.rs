//=========================================================================
// Module Handle
//=========================================================================
//
// The callable surface of the external render/compute module.
//
// The bridge only ever invokes these four entry points and never reads a
// return value. Calls take `&self`: the bridge treats the handle as a
// shared, read-only reference, and serializing what happens behind each
// call is the module's business.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::signal::{BoxSize, ColorMode, ElementId, Fragment};

//=== ModuleHandle ========================================================

/// Entry points the bridge forwards host signals into.
pub trait ModuleHandle {
    /// The element's content box changed to an exact device-pixel size.
    fn resize_exact(&self, element_id: &str, inline_size: f64, block_size: f64);

    /// The element's box changed but no trusted size is known; re-measure.
    fn resize(&self, element_id: &str);

    /// The display color-scheme preference transitioned.
    fn color_mode_change(&self, mode: ColorMode);

    /// The URL fragment changed to this literal value.
    fn fragment_change(&self, fragment: &str);
}

impl<M: ModuleHandle + ?Sized> ModuleHandle for Box<M> {
    fn resize_exact(&self, element_id: &str, inline_size: f64, block_size: f64) {
        (**self).resize_exact(element_id, inline_size, block_size)
    }

    fn resize(&self, element_id: &str) {
        (**self).resize(element_id)
    }

    fn color_mode_change(&self, mode: ColorMode) {
        (**self).color_mode_change(mode)
    }

    fn fragment_change(&self, fragment: &str) {
        (**self).fragment_change(fragment)
    }
}

//=== ModuleCall ==========================================================

/// One resolved entry-point invocation.
///
/// Forwarders first resolve a host signal into calls, then apply them.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleCall {
    ResizeExact { element_id: ElementId, size: BoxSize },
    Resize { element_id: ElementId },
    ColorModeChange(ColorMode),
    FragmentChange(Fragment),
}

impl ModuleCall {
    /// Invokes the matching entry point on `module`.
    pub fn apply<M: ModuleHandle + ?Sized>(&self, module: &M) {
        match self {
            Self::ResizeExact { element_id, size } => {
                module.resize_exact(element_id.as_str(), size.inline_size, size.block_size)
            }
            Self::Resize { element_id } => module.resize(element_id.as_str()),
            Self::ColorModeChange(mode) => module.color_mode_change(*mode),
            Self::FragmentChange(fragment) => module.fragment_change(fragment.as_str()),
        }
    }

    /// Entry point name, for log lines.
    pub fn entry_point(&self) -> &'static str {
        match self {
            Self::ResizeExact { .. } => "resize_exact",
            Self::Resize { .. } => "resize",
            Self::ColorModeChange(_) => "color_mode_change",
            Self::FragmentChange(_) => "fragment_change",
        }
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
    use super::testing::RecordingModule;
    use super::*;

    #[test]
    fn apply_routes_each_call_to_its_entry_point() {
        let module = RecordingModule::new();
        let calls = vec![
            ModuleCall::ResizeExact {
                element_id: "main".into(),
                size: BoxSize::new(800.0, 600.0),
            },
            ModuleCall::Resize {
                element_id: "side".into(),
            },
            ModuleCall::ColorModeChange(ColorMode::Dark),
            ModuleCall::FragmentChange(Fragment::new("#top")),
        ];

        for call in &calls {
            call.apply(&module);
        }

        assert_eq!(module.calls(), calls);
    }

    #[test]
    fn boxed_handles_forward() {
        let module: Box<RecordingModule> = Box::new(RecordingModule::new());
        module.resize("main");
        assert_eq!(
            module.calls(),
            vec![ModuleCall::Resize {
                element_id: "main".into()
            }]
        );
    }

    #[test]
    fn entry_point_names() {
        assert_eq!(
            ModuleCall::ColorModeChange(ColorMode::Light).entry_point(),
            "color_mode_change"
        );
        assert_eq!(
            ModuleCall::FragmentChange(Fragment::new("#a")).entry_point(),
            "fragment_change"
        );
    }
}
