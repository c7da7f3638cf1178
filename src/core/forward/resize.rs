//=========================================================================
// Resize Forwarder
//=========================================================================
//
// Turns resize notification batches into module calls.
//
// Architecture:
//   ResizeBatch → resolve() → Vec<ModuleCall> → apply() → ModuleHandle
//
// One call per record, in delivery order. Each record is decided on its
// own, so a single batch may mix `resize_exact` and `resize` calls.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::module::{ModuleCall, ModuleHandle};
use crate::core::signal::{Measurement, ResizeBatch, ResizeRecord};

//=== ResizeForwarder =====================================================

/// Stateless resolver for resize notifications.
pub struct ResizeForwarder;

impl ResizeForwarder {
    /// Resolves a single record.
    pub fn resolve_record(record: &ResizeRecord) -> ModuleCall {
        match record.measurement() {
            Measurement::DevicePixelExact(size) => ModuleCall::ResizeExact {
                element_id: record.target.clone(),
                size,
            },
            Measurement::Remeasure => ModuleCall::Resize {
                element_id: record.target.clone(),
            },
        }
    }

    /// Resolves a whole batch, preserving record order.
    pub fn resolve(batch: &ResizeBatch) -> Vec<ModuleCall> {
        batch.records().iter().map(Self::resolve_record).collect()
    }

    /// Resolves and applies a batch. Returns the number of module calls.
    pub fn forward<M: ModuleHandle + ?Sized>(batch: &ResizeBatch, module: &M) -> usize {
        let mut forwarded = 0;

        for record in batch.records() {
            let call = Self::resolve_record(record);
            trace!(
                target: "bridge::resize",
                "{} -> {}",
                record.target,
                call.entry_point()
            );
            call.apply(module);
            forwarded += 1;
        }

        forwarded
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
