//=========================================================================
// Player Actions
//=========================================================================
//
// Logical inputs consumed by the simulation core.
//
// Buttons: Jump, Teleport, Boost, TeleportDirection (pressed/held/released)
// Axis:    horizontal movement in [-1, 1] (see InputSource::horizontal)
//
// The core never polls hardware; a platform layer maps keys or gamepad
// buttons onto these actions.
//
//=========================================================================

//=== Action ==============================================================

/// Button-like logical action.
///
/// # Example
///
/// ```
/// use aetheric_platformer::prelude::*;
///
/// let mut state = ActionState::new();
/// state.process_events(&[InputEvent::ActionDown(Action::Jump)]);
/// assert!(state.is_pressed(Action::Jump));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Jump (press to take off, release to cut the ascent short).
    Jump,

    /// Short-range horizontal teleport.
    Teleport,

    /// Modifier held to charge a boosted jump.
    Boost,

    /// Held while teleporting to go left instead of right.
    TeleportDirection,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 4] = [
        Action::Jump,
        Action::Teleport,
        Action::Boost,
        Action::TeleportDirection,
    ];
}

//=========================================================================
// Unit Tests
//=========================================================================
