//=========================================================================
// Command Collector
//=========================================================================
//
// Runtime command collector with bounded draining and shutdown detection.
//
// Architecture:
//   Receiver<RuntimeCommand> → pending batches → one batch per frame
//                                              → TickControl
//
// Each Input command is stepped on its own tick, so a press and a release
// sent separately never collapse into one tick. Draining stops once the
// pending queue is full; the rest stays in the channel for later frames.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::RuntimeCommand;
use crate::core::input::InputEvent;

/// Upper bound on commands drained per frame and held pending.
const MAX_COMMANDS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== CommandCollector ====================================================

/// Hands out one input batch per frame, in arrival order.
pub(crate) struct CommandCollector {
    receiver: Receiver<RuntimeCommand>,
    pending: VecDeque<Vec<InputEvent>>,
    events: Vec<InputEvent>,
    has_batch: bool,
    shutdown_requested: bool,
}

impl CommandCollector {
    pub(crate) fn new(receiver: Receiver<RuntimeCommand>) -> Self {
        Self {
            receiver,
            pending: VecDeque::with_capacity(16),
            events: Vec::with_capacity(16),
            has_batch: false,
            shutdown_requested: false,
        }
    }

    /// Drains pending commands (bounded) and takes the oldest input batch.
    ///
    /// Returns `Exit` once shutdown (or disconnect) was seen and this
    /// frame's batch is the last one. That batch is still available
    /// through [`events`](Self::events).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.events.clear();

        if !self.shutdown_requested {
            self.drain();
        }

        self.has_batch = match self.pending.pop_front() {
            Some(batch) => {
                self.events = batch;
                true
            }
            None => false,
        };

        if self.shutdown_requested && self.pending.is_empty() {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    fn drain(&mut self) {
        let mut drained = 0;

        while self.pending.len() < MAX_COMMANDS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(RuntimeCommand::Input(batch)) => {
                    self.pending.push_back(batch);
                    drained += 1;
                }
                Ok(RuntimeCommand::Shutdown) => {
                    debug!("Shutdown received, {} batches left to step", self.pending.len());
                    self.shutdown_requested = true;
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!("Command channel disconnected");
                    self.shutdown_requested = true;
                    return;
                }
                Err(TryRecvError::Empty) => return,
            }
        }

        warn!(
            "Command queue backlog: {} batches pending ({} drained this frame)",
            self.pending.len(),
            drained
        );
    }

    /// Input events for this frame.
    pub(crate) fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Whether this frame took a batch off the queue, even an empty one.
    pub(crate) fn has_batch(&self) -> bool {
        self.has_batch
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
