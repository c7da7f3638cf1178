//=========================================================================
// Host Signals
//=========================================================================
//
// Normalized values produced by host backends for each observed signal.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;

//=== Public API ==========================================================

pub use event::{
    BoxSize, ColorMode, ElementId, Fragment, Measurement, ResizeBatch, ResizeRecord,
};
