//=========================================================================
// Host Signal Types
//
// Defines the normalized representation of the host signals the bridge
// forwards: element resizes, color-scheme transitions and URL fragment
// changes.
//
// This module abstracts away host-specific payloads (DOM
// `ResizeObserverEntry`, `MediaQueryListEvent`, Winit `WindowEvent`) into
// plain values that the forwarders resolve into module calls.
//
// Design:
// Values are transient. They are built by a host backend for one
// notification, consumed by the bridge, and dropped. Nothing here is
// mutated after construction.
//
// Signal Flow:
// ```text
// Host Backend (web-sys / Winit)
//         ↓
//    ResizeBatch / ColorMode / Fragment (this module)
//         ↓
//    Forwarders (resolve → ModuleCall)
//         ↓
//    ModuleHandle
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== ElementId ===========================================================

/// Identifier of an observed host element.
///
/// On the web this is the element's `id` attribute; on native hosts it is
/// the label the window was registered under. The bridge never inspects
/// the element itself, only this identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

//=== BoxSize =============================================================

/// Content box measurement in device pixels.
///
/// `inline_size` is the extent along the writing direction (width in
/// horizontal writing modes), `block_size` the other axis. Values are kept
/// exactly as the host reported them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub inline_size: f64,
    pub block_size: f64,
}

impl BoxSize {
    pub fn new(inline_size: f64, block_size: f64) -> Self {
        Self { inline_size, block_size }
    }
}

//=== Measurement =========================================================

/// What a single resize record tells the module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// The host reported an exact device-pixel content box.
    DevicePixelExact(BoxSize),

    /// No trusted size; the module must measure the element itself.
    Remeasure,
}

//=== ResizeRecord ========================================================

/// One element's entry in a resize notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRecord {
    pub target: ElementId,

    /// Device-pixel content box fragments, if the host supports them.
    ///
    /// Hosts may report several fragments for one element; only the first
    /// one is ever used.
    pub device_pixel_content_box: Option<Vec<BoxSize>>,
}

impl ResizeRecord {
    /// Record carrying a device-pixel content box list.
    pub fn exact(target: impl Into<ElementId>, sizes: Vec<BoxSize>) -> Self {
        Self {
            target: target.into(),
            device_pixel_content_box: Some(sizes),
        }
    }

    /// Record without any device-pixel measurement.
    pub fn logical(target: impl Into<ElementId>) -> Self {
        Self {
            target: target.into(),
            device_pixel_content_box: None,
        }
    }

    /// Resolves the record into a measurement.
    ///
    /// Takes the first device-pixel fragment verbatim. A missing list and an
    /// empty list both yield [`Measurement::Remeasure`]; a size is never
    /// made up.
    pub fn measurement(&self) -> Measurement {
        match self
            .device_pixel_content_box
            .as_deref()
            .and_then(|sizes| sizes.first())
        {
            Some(size) => Measurement::DevicePixelExact(*size),
            None => Measurement::Remeasure,
        }
    }
}

//=== ResizeBatch =========================================================

/// Records delivered together by the host in one wake-up.
///
/// Order is the host's delivery order and is never changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizeBatch {
    records: Vec<ResizeRecord>,
}

impl ResizeBatch {
    pub fn new(records: Vec<ResizeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ResizeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<ResizeRecord>> for ResizeBatch {
    fn from(records: Vec<ResizeRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<ResizeRecord> for ResizeBatch {
    fn from_iter<I: IntoIterator<Item = ResizeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//=== ColorMode ===========================================================

/// Display color-scheme preference.
///
/// The discriminant is the value handed to the module's
/// `color_mode_change` entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorMode {
    Light = 0,
    Dark = 1,
}

impl ColorMode {
    /// Derives the mode from a "prefers dark" media match.
    pub fn from_prefers_dark(matches: bool) -> Self {
        if matches {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

//=== Fragment ============================================================

/// URL fragment, including the leading `#`, exactly as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self(fragment.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
