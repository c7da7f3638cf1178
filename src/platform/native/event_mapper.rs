//=========================================================================
// Native Event Mapper
//
// Converts Winit window events into bridge `PlatformEvent`s.
//
// Responsibilities:
// - Report physical inner-size changes as device-pixel-exact resizes
// - Report scale-factor changes as re-measure resizes (no trusted size)
// - Translate OS theme changes into color-scheme transitions
// - Ignore everything else
//
//=========================================================================

use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Theme;

use crate::core::platform_bridge::PlatformEvent;
use crate::core::signal::{BoxSize, ElementId, ResizeBatch, ResizeRecord};

//=== Size Conversion =====================================================
//
// A window's physical inner size is already in device pixels, so it is the
// exact content box. Width is the inline axis for a horizontal window.
//

impl From<PhysicalSize<u32>> for BoxSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        BoxSize::new(f64::from(size.width), f64::from(size.height))
    }
}

//=== Theme Conversion ====================================================

pub(crate) fn prefers_dark(theme: Theme) -> bool {
    matches!(theme, Theme::Dark)
}

//=== Full Event Conversion ===============================================
//
// Notes:
// - `Resized` → one exact record for the window's element id.
// - `ScaleFactorChanged` → one logical record; Winit follows up with a
//   `Resized` carrying the new physical size.
// - `ThemeChanged` → `ColorSchemeChanged`.
//

pub(crate) fn map_window_event(event: &WindowEvent, element_id: &ElementId) -> Option<PlatformEvent> {
    match event {
        WindowEvent::Resized(size) => Some(PlatformEvent::Resized(ResizeBatch::new(vec![
            ResizeRecord::exact(element_id.clone(), vec![BoxSize::from(*size)]),
        ]))),

        WindowEvent::ScaleFactorChanged { .. } => Some(PlatformEvent::Resized(ResizeBatch::new(
            vec![ResizeRecord::logical(element_id.clone())],
        ))),

        WindowEvent::ThemeChanged(theme) => Some(PlatformEvent::ColorSchemeChanged {
            prefers_dark: prefers_dark(*theme),
        }),

        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
