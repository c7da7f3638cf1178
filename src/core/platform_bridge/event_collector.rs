//=========================================================================
// Signal Pump
//=========================================================================
//
// Core-side drain for hosts that deliver events over a channel.
//
// Architecture:
//   Receiver<PlatformEvent> → pump_frame() → EventBridge::dispatch() → TickControl
//
// Bounded draining prevents starvation. Idle sleep reduces CPU usage.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::bridge::EventBridge;
use crate::core::module::ModuleHandle;

//=== TickControl =========================================================

/// Pump loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== SignalPump ==========================================================

/// Drains host events from a channel and dispatches them through a bridge.
pub struct SignalPump<M: ModuleHandle> {
    receiver: Receiver<PlatformEvent>,
    bridge: EventBridge<M>,
    forwarded: usize,
}

impl<M: ModuleHandle> SignalPump<M> {
    const MAX_EVENTS_PER_FRAME: usize = 100;
    const IDLE_WAIT_MS: u64 = 10;

    pub fn new(receiver: Receiver<PlatformEvent>, bridge: EventBridge<M>) -> Self {
        Self {
            receiver,
            bridge,
            forwarded: 0,
        }
    }

    /// Dispatches pending events (bounded to prevent starvation).
    ///
    /// Waits briefly for the first event when the queue is empty.
    pub fn pump_frame(&mut self) -> TickControl {
        match self
            .receiver
            .recv_timeout(Duration::from_millis(Self::IDLE_WAIT_MS))
        {
            Ok(event) => {
                if self.handle_event(&event) == TickControl::Exit {
                    return TickControl::Exit;
                }
            }
            Err(RecvTimeoutError::Timeout) => return TickControl::Continue,
            Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
        }

        let mut drained = 1;
        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(&event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "bridge", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Pumps until the host closes or the channel disconnects.
    pub fn run(mut self) -> EventBridge<M> {
        while self.pump_frame() == TickControl::Continue {}
        self.bridge
    }

    /// Total module calls made through this pump.
    pub fn forwarded(&self) -> usize {
        self.forwarded
    }

    pub fn bridge(&self) -> &EventBridge<M> {
        &self.bridge
    }

    fn handle_event(&mut self, event: &PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::HostClosed => TickControl::Exit,
            other => {
                self.forwarded += self.bridge.dispatch(other);
                TickControl::Continue
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
