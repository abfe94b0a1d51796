//=========================================================================
// Action State
//=========================================================================
//
// Per-tick action tracking with edge detection.
//
// Architecture:
//   InputEvent → process_events() → HashSet (actions held) → query
//
// Tick lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::{Action, InputEvent, InputSource};

//=== ActionState =========================================================

/// Tracks persistent state (actions held) and per-tick deltas
/// (actions pressed/released).
pub struct ActionState {
    //--- Persistent State (survives tick boundary) -----------------------
    held: HashSet<Action>,
    horizontal: f32,

    //--- Tick Deltas (reset each tick via clear()) -----------------------
    pressed_this_tick: HashSet<Action>,
    released_this_tick: HashSet<Action>,
}

impl ActionState {
    /// Creates a new action state with nothing held.
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            horizontal: 0.0,
            pressed_this_tick: HashSet::new(),
            released_this_tick: HashSet::new(),
        }
    }

    //--- Tick Processing --------------------------------------------------

    /// Clears tick-specific deltas (pressed/released flags).
    pub fn clear(&mut self) {
        self.pressed_this_tick.clear();
        self.released_this_tick.clear();
    }

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    //--- Internal Helpers -------------------------------------------------
    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::ActionDown(action) => {
                // Only mark as pressed if it wasn't already held
                if self.held.insert(action) {
                    self.pressed_this_tick.insert(action);
                }
            }

            InputEvent::ActionUp(action) => {
                // Only mark as released if it was actually held
                if self.held.remove(&action) {
                    self.released_this_tick.insert(action);
                }
            }

            InputEvent::AxisMoved { horizontal } => {
                self.horizontal = if horizontal.is_finite() {
                    horizontal.clamp(-1.0, 1.0)
                } else {
                    0.0
                };
            }
        }
    }
}

//--- InputSource ---------------------------------------------------------

impl InputSource for ActionState {
    fn is_pressed(&self, action: Action) -> bool {
        self.pressed_this_tick.contains(&action)
    }

    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn is_released(&self, action: Action) -> bool {
        self.released_this_tick.contains(&action)
    }

    fn horizontal(&self) -> f32 {
        self.horizontal
    }
}

impl Default for ActionState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn down(action: Action) -> InputEvent {
        InputEvent::ActionDown(action)
    }

    fn up(action: Action) -> InputEvent {
        InputEvent::ActionUp(action)
    }

    /// Tests that pressed only returns true on the transition tick.
    #[test]
    fn pressed_only_on_transition_tick() {
        let mut state = ActionState::new();

        // Tick 1: down
        state.clear();
        state.process_events(&[down(Action::Jump)]);
        assert!(state.is_pressed(Action::Jump));
        assert!(state.is_held(Action::Jump));

        // Tick 2: still held
        state.clear();
        state.process_events(&[]);
        assert!(!state.is_pressed(Action::Jump));
        assert!(state.is_held(Action::Jump));

        // Tick 3: released
        state.clear();
        state.process_events(&[up(Action::Jump)]);
        assert!(!state.is_held(Action::Jump));
        assert!(state.is_released(Action::Jump));
    }

    /// Tests fast tap (press + release same tick).
    #[test]
    fn fast_tap_both_transitions_captured() {
        let mut state = ActionState::new();

        state.process_events(&[down(Action::Teleport), up(Action::Teleport)]);

        assert!(state.is_pressed(Action::Teleport));
        assert!(state.is_released(Action::Teleport));
        assert!(!state.is_held(Action::Teleport));
    }

    /// Tests duplicate down is ignored.
    #[test]
    fn duplicate_down_ignored() {
        let mut state = ActionState::new();
        state.process_events(&[down(Action::Boost)]);
        state.clear();

        state.process_events(&[down(Action::Boost)]);

        assert!(!state.is_pressed(Action::Boost), "Duplicate press should not trigger");
        assert!(state.is_held(Action::Boost));
    }

    /// Tests spurious up is ignored.
    #[test]
    fn up_without_down_ignored() {
        let mut state = ActionState::new();
        state.process_events(&[up(Action::Jump)]);
        assert!(!state.is_released(Action::Jump));
    }

    #[test]
    fn axis_is_clamped_and_persists() {
        let mut state = ActionState::new();

        state.process_events(&[InputEvent::AxisMoved { horizontal: 3.0 }]);
        assert_eq!(state.horizontal(), 1.0);

        state.clear();
        assert_eq!(state.horizontal(), 1.0);

        state.process_events(&[InputEvent::AxisMoved { horizontal: -0.25 }]);
        assert_eq!(state.horizontal(), -0.25);

        state.process_events(&[InputEvent::AxisMoved { horizontal: f32::NAN }]);
        assert_eq!(state.horizontal(), 0.0);
    }

    #[test]
    fn clear_resets_deltas_but_keeps_held() {
        let mut state = ActionState::new();
        state.process_events(&[down(Action::TeleportDirection)]);

        state.clear();

        assert!(!state.is_pressed(Action::TeleportDirection));
        assert!(state.is_held(Action::TeleportDirection));
    }
}
