//=========================================================================
// Gameplay Events
//=========================================================================
//
// Notification payloads scheduled by the player on interesting
// transitions. Audio, particles and UI react to these without the player
// knowing about them.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::scheduler::EventKind;

//=== Event Payloads ======================================================

/// Player left the ground after a take-off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerJumped {
    pub position: Vec2,
}

/// Player touched the ground after being in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerLanded {
    pub position: Vec2,
}

/// Jump input was released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStopJump {
    pub position: Vec2,
}

/// Which end of a teleport an effect marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeleportPhase {
    Departure,
    Arrival,
}

/// Visual effect at one end of a teleport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportEffect {
    pub position: Vec2,
    pub phase: TeleportPhase,
}

/// Take-off while the boost was armed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostedJumpEffect {
    pub position: Vec2,
}

//=== Notification ========================================================

/// Any gameplay notification, as delivered to a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    PlayerJumped(PlayerJumped),
    PlayerLanded(PlayerLanded),
    PlayerStopJump(PlayerStopJump),
    TeleportEffect(TeleportEffect),
    BoostedJumpEffect(BoostedJumpEffect),
}

/// Kinds the player schedules; each needs a handler before the first tick.
pub fn notification_kinds() -> [EventKind; 5] {
    [
        EventKind::of::<PlayerJumped>(),
        EventKind::of::<PlayerLanded>(),
        EventKind::of::<PlayerStopJump>(),
        EventKind::of::<TeleportEffect>(),
        EventKind::of::<BoostedJumpEffect>(),
    ]
}
