//=========================================================================
// Gameplay
//=========================================================================
//
// Platformer rules built on the core systems.
//
// Architecture:
//   InputSource → PlayerController → KinematicBody
//                       │
//                       └─schedule→ EventScheduler → NotificationSink
//
//=========================================================================

//=== Module Declarations =================================================

pub mod events;
pub mod notify;
pub mod player;

//=== Public API ==========================================================

pub use events::{
    notification_kinds, BoostedJumpEffect, Notification, PlayerJumped, PlayerLanded,
    PlayerStopJump, TeleportEffect, TeleportPhase,
};
pub use notify::{install_notification_handlers, LogSink, NotificationSink};
