//=========================================================================
// Platformer Tuning
//=========================================================================
//
// Physics tuning scalars shared between the player and the integrator.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== TuningScalar ========================================================

/// Named tuning values exposed by [`PlatformerModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuningScalar {
    /// Multiplier applied to the jump take-off speed.
    JumpModifier,

    /// Factor applied to upward velocity when a jump is released early.
    JumpDeceleration,
}

//=== PlatformerModel =====================================================

/// Physics tuning for the platformer.
///
/// Lives in the [`ModelRegistry`](super::ModelRegistry) for the whole run
/// and is mutated in place (e.g. by the boost charge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerModel {
    pub jump_modifier: f32,
    pub jump_deceleration: f32,
}

impl PlatformerModel {
    pub fn get(&self, scalar: TuningScalar) -> f32 {
        match scalar {
            TuningScalar::JumpModifier => self.jump_modifier,
            TuningScalar::JumpDeceleration => self.jump_deceleration,
        }
    }

    pub fn set(&mut self, scalar: TuningScalar, value: f32) {
        match scalar {
            TuningScalar::JumpModifier => self.jump_modifier = value,
            TuningScalar::JumpDeceleration => self.jump_deceleration = value,
        }
    }
}

impl Default for PlatformerModel {
    fn default() -> Self {
        Self {
            jump_modifier: 1.5,
            jump_deceleration: 0.5,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
