//=========================================================================
// Event Handler Trait
//=========================================================================
//
// Type-erased trait for event handlers that preserves the typed callback
// while allowing storage in a HashMap without concrete type knowledge.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::marker::PhantomData;

//=== Internal Dependencies ===============================================

use super::{DispatchContext, Event, EventKind, SchedulerError};

//=========================================================================

/// Type-erased trait for handler storage and dispatch.
///
/// Allows the scheduler to invoke a handler with a boxed payload without
/// knowing the concrete event type at compile time.
pub(super) trait EventHandler: Send {
    /// Returns the kind this handler is registered for.
    fn kind(&self) -> EventKind;

    /// Downcasts the payload and runs the callback.
    fn dispatch(
        &mut self,
        payload: Box<dyn Any + Send>,
        context: &mut DispatchContext<'_>,
    ) -> Result<(), SchedulerError>;
}

//=========================================================================

/// Typed handler wrapping a user callback for events of type `E`.
pub(super) struct TypedHandler<E, F> {
    callback: F,
    _marker: PhantomData<fn(&E)>,
}

impl<E, F> TypedHandler<E, F>
where
    E: Event,
    F: FnMut(&E, &mut DispatchContext<'_>) + Send + 'static,
{
    pub(super) fn new(callback: F) -> Self {
        Self {
            callback,
            _marker: PhantomData,
        }
    }
}

impl<E, F> EventHandler for TypedHandler<E, F>
where
    E: Event,
    F: FnMut(&E, &mut DispatchContext<'_>) + Send + 'static,
{
    fn kind(&self) -> EventKind {
        EventKind::of::<E>()
    }

    fn dispatch(
        &mut self,
        payload: Box<dyn Any + Send>,
        context: &mut DispatchContext<'_>,
    ) -> Result<(), SchedulerError> {
        let event = payload
            .downcast::<E>()
            .map_err(|_| SchedulerError::PayloadMismatch(self.kind().name()))?;

        (self.callback)(&event, context);
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================
