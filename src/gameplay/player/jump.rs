//=========================================================================
// Player Jump State Machine
//=========================================================================
//
// Cyclic jump FSM layered over a kinematic body.
//
// Transitions:
// ```text
//   Grounded ──press──→ PrepareToJump ──(same tick)──→ Jumping
//      ↑                     ↑                            │ airborne
//      │ (same tick)         └── press, airborne, jumps<2 ─┤
//   Landed ←──grounded── InFlight ←──────────────────────┘
// ```
//
// Guards reject invalid presses silently; there is no error state.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::scheduler::{EventScheduler, SchedulerError};
use crate::gameplay::events::{PlayerJumped, PlayerLanded};

/// Jumps allowed before a landing resets the allowance.
pub const MAX_JUMPS: u8 = 2;

//=== JumpState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JumpState {
    #[default]
    Grounded,
    PrepareToJump,
    Jumping,
    InFlight,
    Landed,
}

//=== JumpStep ============================================================

/// What happened during one [`PlayerJumpFsm::advance`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpStep {
    /// A take-off impulse should be issued this tick.
    pub took_off: bool,

    /// The player landed and the jump allowance was reset.
    pub landed: bool,
}

//=== PlayerJumpFsm =======================================================

/// Jump state plus the jump counter.
#[derive(Debug, Clone, Default)]
pub struct PlayerJumpFsm {
    state: JumpState,
    jump_count: u8,
}

impl PlayerJumpFsm {
    /// Starts `Grounded` with no jumps used.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    //--- Input ------------------------------------------------------------

    /// Handles a jump press. Returns `true` if the press was accepted.
    ///
    /// Accepted from `Grounded`, or while airborne with jumps remaining.
    pub fn request_jump(&mut self, body_grounded: bool) -> bool {
        let allowed = match self.state {
            JumpState::Grounded => true,
            _ => !body_grounded && self.jump_count < MAX_JUMPS,
        };

        if allowed {
            debug!("{:?} -> PrepareToJump (jumps used: {})", self.state, self.jump_count);
            self.state = JumpState::PrepareToJump;
        }
        allowed
    }

    //--- Update -----------------------------------------------------------

    /// Evaluates transitions for this tick.
    ///
    /// `body_grounded` is the probe result of the previous integration
    /// pass. Notifications are scheduled before the state changes, so a
    /// scheduling failure leaves the FSM untouched.
    pub fn advance(
        &mut self,
        body_grounded: bool,
        position: Vec2,
        scheduler: &mut EventScheduler,
    ) -> Result<JumpStep, SchedulerError> {
        let mut step = JumpStep::default();

        match self.state {
            JumpState::PrepareToJump => {
                self.jump_count += 1;
                self.state = JumpState::Jumping;
                step.took_off = true;
                debug!("PrepareToJump -> Jumping (jump {})", self.jump_count);
            }
            JumpState::Jumping => {
                if !body_grounded {
                    scheduler.schedule(PlayerJumped { position })?;
                    self.state = JumpState::InFlight;
                    debug!("Jumping -> InFlight");
                }
            }
            JumpState::InFlight => {
                if body_grounded {
                    scheduler.schedule(PlayerLanded { position })?;
                    self.state = JumpState::Landed;
                    debug!("InFlight -> Landed");
                    self.finish_landing();
                    step.landed = true;
                }
            }
            JumpState::Landed => {
                self.finish_landing();
                step.landed = true;
            }
            JumpState::Grounded => {}
        }

        Ok(step)
    }

    fn finish_landing(&mut self) {
        self.jump_count = 0;
        self.state = JumpState::Grounded;
        debug!("Landed -> Grounded");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
