//=========================================================================
// Kinematic Body
//=========================================================================
//
// Physical state of a velocity-driven entity plus the intents queued for
// the next integration pass.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use serde::{Deserialize, Serialize};

//=== BodyConfig ==========================================================

/// Per-entity integration rates. All rates are per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Horizontal acceleration toward a non-zero target (units/s²).
    pub acceleration: f32,

    /// Horizontal deceleration toward zero when the target is zero (units/s²).
    pub deceleration: f32,

    /// Scale applied to `deceleration` while airborne.
    pub air_deceleration_multiplier: f32,

    /// Gravity along the y axis (units/s², negative is down).
    pub gravity: f32,

    /// Gravity scale while rising or at rest.
    pub gravity_modifier: f32,

    /// Gravity scale while falling.
    pub fall_gravity_modifier: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            acceleration: 60.0,
            deceleration: 80.0,
            air_deceleration_multiplier: 0.5,
            gravity: -9.81,
            gravity_modifier: 1.0,
            fall_gravity_modifier: 1.0,
        }
    }
}

//=== Intents =============================================================

/// One-shot requests consumed by the next integration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct Intents {
    pub(super) take_off: Option<f32>,
    pub(super) ascent_damping: Option<f32>,
    pub(super) displacement: Vec2,
}

//=== KinematicBody =======================================================

/// Entity whose motion is driven by directly set velocity targets.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub(super) position: Vec2,
    pub(super) velocity: Vec2,
    pub(super) target_velocity: Vec2,
    pub(super) grounded: bool,
    pub(super) config: BodyConfig,
    pub(super) intents: Intents,
}

impl KinematicBody {
    /// Creates a body at rest at `position`, not yet probed.
    pub fn new(position: Vec2, config: BodyConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            target_velocity: Vec2::ZERO,
            grounded: false,
            config,
            intents: Intents::default(),
        }
    }

    //--- State ------------------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn target_velocity(&self) -> Vec2 {
        self.target_velocity
    }

    /// Result of the last collision probe.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    //--- Intents ----------------------------------------------------------

    /// Sets the desired velocity for this tick.
    pub fn set_target_velocity(&mut self, target: Vec2) {
        self.target_velocity = target;
    }

    /// Requests an instantaneous vertical take-off speed.
    ///
    /// Replaces the vertical velocity on the next pass, which then skips
    /// gravity. Cancels a pending ascent damping.
    pub fn launch(&mut self, vertical_speed: f32) {
        self.intents.take_off = Some(vertical_speed);
        self.intents.ascent_damping = None;
    }

    /// Requests that upward velocity be multiplied by `factor` on the next
    /// pass. Has no effect while falling.
    pub fn damp_ascent(&mut self, factor: f32) {
        self.intents.ascent_damping = Some(factor);
    }

    /// Requests an instantaneous position offset on the next pass.
    pub fn displace(&mut self, offset: Vec2) {
        self.intents.displacement += offset;
    }

    /// Returns true if any one-shot intent is waiting.
    pub fn has_pending_intents(&self) -> bool {
        self.intents != Intents::default()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
