//=========================================================================
// Notification Sinks
//=========================================================================
//
// Fire-and-forget delivery of dispatched gameplay events.
//
// Architecture:
//   EventScheduler ─dispatch→ forwarding handler ─→ NotificationSink
//                                                     ├─ Sender<Notification>
//                                                     └─ LogSink
//
// Sinks never report back to the core.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use crossbeam_channel::{Sender, TrySendError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::events::{
    BoostedJumpEffect, Notification, PlayerJumped, PlayerLanded, PlayerStopJump, TeleportEffect,
};
use crate::core::scheduler::{DispatchContext, Event, EventScheduler};

//=== NotificationSink Trait ==============================================

/// Consumer of gameplay notifications (audio, VFX, UI).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Channel sink: hands notifications to another thread without blocking.
impl NotificationSink for Sender<Notification> {
    fn notify(&self, notification: Notification) {
        match self.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(n)) => {
                warn!("Notification channel full, dropping {:?}", n);
            }
            Err(TrySendError::Disconnected(n)) => {
                warn!("Notification channel disconnected, dropping {:?}", n);
            }
        }
    }
}

//=== LogSink =============================================================

/// Sink that only logs notifications. Used when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        debug!("Notification: {:?}", notification);
    }
}

//=== Handler Installation ================================================

/// Registers one forwarding handler per notification kind.
pub fn install_notification_handlers(
    scheduler: &mut EventScheduler,
    sink: Arc<dyn NotificationSink>,
) {
    forward::<PlayerJumped>(scheduler, &sink, Notification::PlayerJumped);
    forward::<PlayerLanded>(scheduler, &sink, Notification::PlayerLanded);
    forward::<PlayerStopJump>(scheduler, &sink, Notification::PlayerStopJump);
    forward::<TeleportEffect>(scheduler, &sink, Notification::TeleportEffect);
    forward::<BoostedJumpEffect>(scheduler, &sink, Notification::BoostedJumpEffect);
}

fn forward<E>(
    scheduler: &mut EventScheduler,
    sink: &Arc<dyn NotificationSink>,
    wrap: fn(E) -> Notification,
) where
    E: Event + Clone,
{
    let sink = Arc::clone(sink);
    scheduler.register_handler(move |event: &E, _: &mut DispatchContext<'_>| {
        sink.notify(wrap(event.clone()));
    });
}

//=========================================================================
// Tests
//=========================================================================
