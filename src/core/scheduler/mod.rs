//=========================================================================
// Event Scheduler
//=========================================================================
//
// Deterministic, type-tagged deferred event dispatch.
//
// Architecture:
//   Systems → schedule<E>(payload) → BinaryHeap<(tick, sequence)>
//                                          ↓
//   Coordinator ──→ tick(now) → pop due events → handler<E>(&E, ctx)
//                                                        ↓
//                         ctx.schedule() → eligible at now + 1
//
// Pattern: schedule → tick(now) (dispatch in order) → follow-ups next tick
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;

use log::error;

//=== Module Declarations =================================================

mod event_scheduler;
mod handler;

//=== Public API ==========================================================

pub use event_scheduler::EventScheduler;

/// Discrete simulation step index.
pub type Tick = u64;

/// Marker trait for payloads that can be scheduled.
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Event: Send + 'static {}

// Blanket implementation
impl<T: Send + 'static> Event for T {}

//=== EventKind ===========================================================

/// Identifies which handler interprets a payload.
///
/// The kind of an event is the Rust type of its payload. The type name is
/// carried along for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind {
    id: TypeId,
    name: &'static str,
}

impl EventKind {
    /// Returns the kind of events carrying payload `E`.
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
        }
    }

    /// Fully qualified type name of the payload.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn id(&self) -> TypeId {
        self.id
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

//=== SchedulerError ======================================================

/// Scheduler configuration and dispatch errors.
///
/// All variants indicate programming errors: a kind scheduled without a
/// handler, or a startup check that found handlers missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// An event was scheduled for a kind with no registered handler.
    UnregisteredKind(&'static str),

    /// Startup validation found kinds without handlers.
    MissingHandlers(Vec<&'static str>),

    /// A queued payload did not match its handler's type.
    PayloadMismatch(&'static str),
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredKind(kind) => {
                write!(f, "No handler registered for event kind {}", kind)
            }
            Self::MissingHandlers(kinds) => {
                write!(f, "Missing handlers for event kinds: {}", kinds.join(", "))
            }
            Self::PayloadMismatch(kind) => {
                write!(f, "Payload type mismatch while dispatching {}", kind)
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

//=== PendingEvent ========================================================

/// Event created during dispatch, queued once the pass finishes.
pub(crate) struct PendingEvent {
    pub(crate) target_tick: Tick,
    pub(crate) kind: EventKind,
    pub(crate) payload: Box<dyn Any + Send>,
}

//=== DispatchContext =====================================================

/// Handle passed to handlers while an event is being dispatched.
///
/// Events scheduled through the context are held back until the current
/// pass has finished and are never eligible before `now + 1`, so a handler
/// cannot cause a same-tick cascade.
pub struct DispatchContext<'a> {
    registered: &'a HashSet<TypeId>,
    now: Tick,
    pending: Vec<PendingEvent>,
}

impl<'a> DispatchContext<'a> {
    pub(crate) fn new(registered: &'a HashSet<TypeId>, now: Tick) -> Self {
        Self {
            registered,
            now,
            pending: Vec::new(),
        }
    }

    /// Tick currently being dispatched.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Schedules a follow-up event for the next tick.
    pub fn schedule<E: Event>(&mut self, event: E) -> Result<(), SchedulerError> {
        self.schedule_at(self.now + 1, event)
    }

    /// Schedules a follow-up event for `tick` (never earlier than `now + 1`).
    pub fn schedule_at<E: Event>(&mut self, tick: Tick, event: E) -> Result<(), SchedulerError> {
        let kind = EventKind::of::<E>();
        if !self.registered.contains(&kind.id()) {
            error!("Handler scheduled unregistered event kind {}", kind);
            return Err(SchedulerError::UnregisteredKind(kind.name()));
        }

        self.pending.push(PendingEvent {
            target_tick: tick.max(self.now + 1),
            kind,
            payload: Box::new(event),
        });
        Ok(())
    }

    pub(crate) fn into_pending(self) -> Vec<PendingEvent> {
        self.pending
    }
}
