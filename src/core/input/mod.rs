//=========================================================================
// Input
//=========================================================================
//
// Abstract input signals consumed by the simulation core.
//
// Architecture:
//   InputEvent → ActionState → InputSource queries (pressed/held/released)
//
// Gameplay code depends only on the `InputSource` trait, so tests and
// replays can feed scripted input without a platform layer.
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_state;
mod event;

//=== Public API ==========================================================

pub use action::Action;
pub use action_state::ActionState;
pub use event::InputEvent;

//=== InputSource Trait ===================================================

/// Read-only per-tick input queries.
///
/// `is_pressed`/`is_released` are edge-triggered (true for one tick only),
/// `is_held` is level-triggered.
pub trait InputSource {
    /// Returns `true` if the action transitioned up → down this tick.
    fn is_pressed(&self, action: Action) -> bool;

    /// Returns `true` while the action is held.
    fn is_held(&self, action: Action) -> bool;

    /// Returns `true` if the action transitioned down → up this tick.
    fn is_released(&self, action: Action) -> bool;

    /// Horizontal movement axis in [-1, 1].
    fn horizontal(&self) -> f32;
}
