//=========================================================================
// Input Events
//=========================================================================
//
// Normalized input events delivered to the simulation.
//
// Event Flow:
// ```text
// Platform layer (keys, gamepad)
//         ↓
//    InputEvent (this module)
//         ↓
//    ActionState (pressed / held / released per tick)
//         ↓
//    PlayerController
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Action;

//=== InputEvent ==========================================================

/// A single normalized input change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Action went down.
    ActionDown(Action),

    /// Action went up.
    ActionUp(Action),

    /// New horizontal axis value (clamped to [-1, 1] when processed).
    AxisMoved { horizontal: f32 },
}
