//=========================================================================
// Boost Charge
//=========================================================================
//
// Holding the boost modifier long enough arms a stronger jump.
//
// Lifecycle:
//   pressed → hold start = now → now - start >= threshold → armed
//   released → disarmed, hold start cleared
//
// Hold time is measured against simulated time, like the teleport
// cooldown, so arming does not depend on the tick rate.
//
// While armed the jump modifier is raised above its baseline once; while
// disarmed it is restored to the baseline. The increment never stacks.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::model::PlatformerModel;

//=== BoostCharge =========================================================

#[derive(Debug, Clone)]
pub struct BoostCharge {
    threshold: f64,
    increment: f32,
    hold_start: Option<f64>,
    held_for: f64,
    armed: bool,
}

impl BoostCharge {
    /// `threshold` is the hold time in seconds, `increment` the amount
    /// added to the jump modifier while armed.
    pub fn new(threshold: f64, increment: f32) -> Self {
        Self {
            threshold,
            increment,
            hold_start: None,
            held_for: 0.0,
            armed: false,
        }
    }

    /// Updates the charge at simulated time `now`. Returns whether it is
    /// armed.
    ///
    /// The first held tick starts the hold with a duration of zero.
    pub fn update(&mut self, held: bool, now: f64) -> bool {
        if held {
            let start = *self.hold_start.get_or_insert(now);
            self.held_for = now - start;
            if !self.armed && self.held_for >= self.threshold {
                self.armed = true;
                debug!("Boost armed after {:.3}s", self.held_for);
            }
        } else {
            if self.armed {
                debug!("Boost disarmed");
            }
            self.hold_start = None;
            self.held_for = 0.0;
            self.armed = false;
        }
        self.armed
    }

    /// Restarts hold tracking from the last update without disarming.
    pub fn reset_hold(&mut self) {
        self.hold_start = self.hold_start.map(|start| start + self.held_for);
        self.held_for = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds the modifier has been held since the last reset.
    pub fn held_duration(&self) -> f64 {
        self.held_for
    }

    /// Writes the boost state into the tuning model.
    pub fn apply(&self, model: &mut PlatformerModel, baseline: f32) {
        if self.armed {
            if model.jump_modifier == baseline {
                model.jump_modifier += self.increment;
                debug!("Jump modifier boosted to {}", model.jump_modifier);
            }
        } else {
            model.jump_modifier = baseline;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
