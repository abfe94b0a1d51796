//=========================================================================
// Event Scheduler
//=========================================================================
//
// Owns the time-ordered queue of pending events and the handler table.
//
// Ordering: (target_tick, insertion sequence). Ties at the same tick are
// dispatched in arrival order, so a fixed sequence of inputs always
// produces the same dispatch order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::handler::{EventHandler, TypedHandler};
use super::{DispatchContext, Event, EventKind, PendingEvent, SchedulerError, Tick};

//=== QueuedEvent =========================================================

struct QueuedEvent {
    target_tick: Tick,
    sequence: u64,
    kind: EventKind,
    payload: Box<dyn Any + Send>,
}

impl QueuedEvent {
    fn key(&self) -> (Tick, u64) {
        (self.target_tick, self.sequence)
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

//=== EventScheduler ======================================================

/// Deterministic deferred dispatcher for type-tagged events.
///
/// Each event kind has exactly one handler. Events are scheduled with a
/// fully constructed payload and dispatched by [`EventScheduler::tick`]
/// once their target tick has arrived. Queued events cannot be cancelled.
pub struct EventScheduler {
    handlers: HashMap<TypeId, Box<dyn EventHandler>>,
    registered: HashSet<TypeId>,
    queue: BinaryHeap<Reverse<QueuedEvent>>,
    next_sequence: u64,
    current_tick: Tick,
}

impl EventScheduler {
    /// Creates a scheduler with no handlers and an empty queue at tick 0.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            registered: HashSet::new(),
            queue: BinaryHeap::new(),
            next_sequence: 0,
            current_tick: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the handler for events of type `E`.
    ///
    /// A kind has exactly one handler; registering again replaces the
    /// previous one.
    pub fn register_handler<E, F>(&mut self, handler: F)
    where
        E: Event,
        F: FnMut(&E, &mut DispatchContext<'_>) + Send + 'static,
    {
        let kind = EventKind::of::<E>();
        let handler: Box<dyn EventHandler> = Box::new(TypedHandler::<E, F>::new(handler));

        if self.handlers.insert(kind.id(), handler).is_some() {
            warn!("Handler for {} was already registered and has been replaced", kind);
        }
        self.registered.insert(kind.id());
    }

    /// Returns true if a handler is registered for `E`.
    pub fn has_handler<E: Event>(&self) -> bool {
        self.registered.contains(&TypeId::of::<E>())
    }

    /// Verifies that every listed kind has a handler.
    ///
    /// Intended for startup: a missing handler is a configuration error.
    pub fn ensure_registered(&self, kinds: &[EventKind]) -> Result<(), SchedulerError> {
        let missing: Vec<&'static str> = kinds
            .iter()
            .filter(|kind| !self.registered.contains(&kind.id()))
            .map(|kind| kind.name())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            error!("Scheduler setup incomplete, missing handlers: {:?}", missing);
            Err(SchedulerError::MissingHandlers(missing))
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Schedules `event` for the next scheduler pass.
    pub fn schedule<E: Event>(&mut self, event: E) -> Result<(), SchedulerError> {
        self.schedule_at(self.current_tick, event)
    }

    /// Schedules `event` for dispatch at `tick`.
    ///
    /// Ticks earlier than the current tick are clamped to it.
    pub fn schedule_at<E: Event>(&mut self, tick: Tick, event: E) -> Result<(), SchedulerError> {
        let kind = EventKind::of::<E>();
        if !self.registered.contains(&kind.id()) {
            error!("Scheduled event kind {} has no handler", kind);
            return Err(SchedulerError::UnregisteredKind(kind.name()));
        }

        if tick < self.current_tick {
            debug!(
                "Event {} scheduled for past tick {} (now {}), clamping",
                kind, tick, self.current_tick
            );
        }

        self.enqueue(PendingEvent {
            target_tick: tick.max(self.current_tick),
            kind,
            payload: Box::new(event),
        });
        Ok(())
    }

    fn enqueue(&mut self, pending: PendingEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.queue.push(Reverse(QueuedEvent {
            target_tick: pending.target_tick,
            sequence,
            kind: pending.kind,
            payload: pending.payload,
        }));
    }

    //--- Dispatch ---------------------------------------------------------

    /// Dispatches every queued event whose target tick is `<= now`.
    ///
    /// Events are removed from the queue before their handler runs. Events
    /// scheduled by handlers during this pass are queued afterwards for
    /// `now + 1` or later. Returns the number of events dispatched.
    ///
    /// `now` lower than the current tick is treated as the current tick.
    pub fn tick(&mut self, now: Tick) -> Result<usize, SchedulerError> {
        if now < self.current_tick {
            warn!(
                "Scheduler tick went backwards ({} < {}), keeping current tick",
                now, self.current_tick
            );
        }
        let now = now.max(self.current_tick);
        self.current_tick = now;

        let mut context = DispatchContext::new(&self.registered, now);
        let mut dispatched = 0;
        let mut first_error = None;

        while self
            .queue
            .peek()
            .is_some_and(|Reverse(next)| next.target_tick <= now)
        {
            let Some(Reverse(event)) = self.queue.pop() else {
                break;
            };

            let Some(handler) = self.handlers.get_mut(&event.kind.id()) else {
                error!("Dropping {} at tick {}: no handler", event.kind, now);
                first_error.get_or_insert(SchedulerError::UnregisteredKind(event.kind.name()));
                continue;
            };

            match handler.dispatch(event.payload, &mut context) {
                Ok(()) => dispatched += 1,
                Err(e) => {
                    error!("Dispatch of {} failed: {}", event.kind, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        for pending in context.into_pending() {
            self.enqueue(pending);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(dispatched),
        }
    }

    //--- Query API --------------------------------------------------------

    /// Tick of the most recent dispatch pass.
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Number of events waiting for dispatch.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, PartialEq, Clone)]
    struct Chime {
        id: u32,
    }

    #[derive(Debug, PartialEq, Clone)]
    struct Echo {
        id: u32,
    }

    #[derive(Debug)]
    struct Orphan;

    type Log = Arc<Mutex<Vec<String>>>;

    fn scheduler_with_log() -> (EventScheduler, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = EventScheduler::new();

        let chimes = Arc::clone(&log);
        scheduler.register_handler(move |chime: &Chime, _: &mut DispatchContext<'_>| {
            chimes.lock().unwrap().push(format!("chime{}", chime.id));
        });

        let echoes = Arc::clone(&log);
        scheduler.register_handler(move |echo: &Echo, _: &mut DispatchContext<'_>| {
            echoes.lock().unwrap().push(format!("echo{}", echo.id));
        });

        (scheduler, log)
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    //=====================================================================
    // Ordering
    //=====================================================================

    #[test]
    fn same_tick_events_dispatch_in_fifo_order() {
        let (mut scheduler, log) = scheduler_with_log();

        scheduler.schedule(Chime { id: 1 }).unwrap();
        scheduler.schedule(Echo { id: 2 }).unwrap();
        scheduler.schedule(Chime { id: 3 }).unwrap();

        assert_eq!(scheduler.tick(1).unwrap(), 3);
        assert_eq!(entries(&log), vec!["chime1", "echo2", "chime3"]);
    }

    #[test]
    fn earlier_target_tick_dispatches_first() {
        let (mut scheduler, log) = scheduler_with_log();

        scheduler.schedule_at(5, Chime { id: 1 }).unwrap();
        scheduler.schedule_at(3, Echo { id: 2 }).unwrap();

        scheduler.tick(10).unwrap();
        assert_eq!(entries(&log), vec!["echo2", "chime1"]);
    }

    #[test]
    fn future_events_wait_for_their_tick() {
        let (mut scheduler, log) = scheduler_with_log();

        scheduler.schedule_at(3, Chime { id: 1 }).unwrap();

        assert_eq!(scheduler.tick(1).unwrap(), 0);
        assert_eq!(scheduler.tick(2).unwrap(), 0);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.tick(3).unwrap(), 1);
        assert_eq!(entries(&log), vec!["chime1"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn past_tick_is_clamped_to_current() {
        let (mut scheduler, log) = scheduler_with_log();
        scheduler.tick(10).unwrap();

        scheduler.schedule_at(2, Chime { id: 1 }).unwrap();
        scheduler.tick(11).unwrap();

        assert_eq!(entries(&log), vec!["chime1"]);
    }

    #[test]
    fn schedule_at_current_tick_waits_for_next_pass() {
        let (mut scheduler, log) = scheduler_with_log();
        scheduler.tick(4).unwrap();

        scheduler.schedule(Chime { id: 1 }).unwrap();
        assert!(entries(&log).is_empty());

        scheduler.tick(5).unwrap();
        assert_eq!(entries(&log), vec!["chime1"]);
    }

    #[test]
    fn backwards_tick_does_not_rewind_clock() {
        let (mut scheduler, _log) = scheduler_with_log();
        scheduler.tick(8).unwrap();
        scheduler.tick(3).unwrap();
        assert_eq!(scheduler.current_tick(), 8);
    }

    //=====================================================================
    // Re-entrancy
    //=====================================================================

    #[test]
    fn event_scheduled_during_dispatch_waits_for_next_tick() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = EventScheduler::new();

        let chimes = Arc::clone(&log);
        scheduler.register_handler(move |chime: &Chime, ctx: &mut DispatchContext<'_>| {
            chimes.lock().unwrap().push(format!("chime{}", chime.id));
            ctx.schedule(Echo { id: chime.id }).unwrap();
        });

        let echoes = Arc::clone(&log);
        scheduler.register_handler(move |echo: &Echo, _: &mut DispatchContext<'_>| {
            echoes.lock().unwrap().push(format!("echo{}", echo.id));
        });

        scheduler.schedule(Chime { id: 1 }).unwrap();

        assert_eq!(scheduler.tick(1).unwrap(), 1);
        assert_eq!(entries(&log), vec!["chime1"]);

        // Same tick again: the follow-up targets tick 2
        assert_eq!(scheduler.tick(1).unwrap(), 0);

        assert_eq!(scheduler.tick(2).unwrap(), 1);
        assert_eq!(entries(&log), vec!["chime1", "echo1"]);
    }

    #[test]
    fn self_rescheduling_handler_does_not_starve_others() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = EventScheduler::new();

        let chimes = Arc::clone(&log);
        scheduler.register_handler(move |chime: &Chime, ctx: &mut DispatchContext<'_>| {
            chimes.lock().unwrap().push(format!("chime{}", chime.id));
            ctx.schedule(Chime { id: chime.id + 1 }).unwrap();
        });

        let echoes = Arc::clone(&log);
        scheduler.register_handler(move |echo: &Echo, _: &mut DispatchContext<'_>| {
            echoes.lock().unwrap().push(format!("echo{}", echo.id));
        });

        scheduler.schedule(Chime { id: 0 }).unwrap();
        scheduler.schedule(Echo { id: 9 }).unwrap();

        assert_eq!(scheduler.tick(1).unwrap(), 2);
        assert_eq!(entries(&log), vec!["chime0", "echo9"]);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn handler_sees_dispatch_tick() {
        let seen = Arc::new(Mutex::new(None));
        let mut scheduler = EventScheduler::new();

        let slot = Arc::clone(&seen);
        scheduler.register_handler(move |_: &Chime, ctx: &mut DispatchContext<'_>| {
            *slot.lock().unwrap() = Some(ctx.now());
        });

        scheduler.schedule_at(6, Chime { id: 0 }).unwrap();
        scheduler.tick(7).unwrap();

        assert_eq!(*seen.lock().unwrap(), Some(7));
    }

    //=====================================================================
    // Registration
    //=====================================================================

    #[test]
    fn scheduling_unregistered_kind_is_reported() {
        let (mut scheduler, _log) = scheduler_with_log();

        let result = scheduler.schedule(Orphan);

        assert!(matches!(result, Err(SchedulerError::UnregisteredKind(_))));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn handler_scheduling_unregistered_kind_gets_error() {
        let outcome = Arc::new(Mutex::new(None));
        let mut scheduler = EventScheduler::new();

        let slot = Arc::clone(&outcome);
        scheduler.register_handler(move |_: &Chime, ctx: &mut DispatchContext<'_>| {
            *slot.lock().unwrap() = Some(ctx.schedule(Orphan));
        });

        scheduler.schedule(Chime { id: 0 }).unwrap();
        scheduler.tick(1).unwrap();

        let result = outcome.lock().unwrap().take().unwrap();
        assert!(matches!(result, Err(SchedulerError::UnregisteredKind(_))));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn ensure_registered_lists_missing_kinds() {
        let (scheduler, _log) = scheduler_with_log();

        assert!(scheduler
            .ensure_registered(&[EventKind::of::<Chime>(), EventKind::of::<Echo>()])
            .is_ok());

        match scheduler.ensure_registered(&[EventKind::of::<Chime>(), EventKind::of::<Orphan>()]) {
            Err(SchedulerError::MissingHandlers(missing)) => {
                assert_eq!(missing.len(), 1);
                assert!(missing[0].contains("Orphan"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn re_registering_replaces_handler() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = EventScheduler::new();

        let first = Arc::clone(&log);
        scheduler.register_handler(move |_: &Chime, _: &mut DispatchContext<'_>| {
            first.lock().unwrap().push("first".to_string());
        });
        let second = Arc::clone(&log);
        scheduler.register_handler(move |_: &Chime, _: &mut DispatchContext<'_>| {
            second.lock().unwrap().push("second".to_string());
        });

        scheduler.schedule(Chime { id: 0 }).unwrap();
        scheduler.tick(1).unwrap();

        assert_eq!(entries(&log), vec!["second"]);
        assert!(scheduler.has_handler::<Chime>());
        assert!(!scheduler.has_handler::<Orphan>());
    }
}
