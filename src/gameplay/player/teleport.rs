//=========================================================================
// Teleport Ability
//=========================================================================
//
// Cooldown-gated horizontal displacement.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== TeleportAbility =====================================================

#[derive(Debug, Clone)]
pub struct TeleportAbility {
    cooldown: f64,
    distance: f32,
    last_used: Option<f64>,
}

impl TeleportAbility {
    /// `cooldown` in seconds between uses, `distance` in world units.
    pub fn new(cooldown: f64, distance: f32) -> Self {
        Self {
            cooldown,
            distance,
            last_used: None,
        }
    }

    /// The first use is always allowed.
    pub fn is_ready(&self, now: f64) -> bool {
        self.last_used.map_or(true, |last| now - last >= self.cooldown)
    }

    /// Seconds until the next use is allowed (0 when ready).
    pub fn cooldown_remaining(&self, now: f64) -> f64 {
        self.last_used
            .map_or(0.0, |last| (self.cooldown - (now - last)).max(0.0))
    }

    /// Consumes the cooldown and returns the offset to apply, or `None`
    /// if still cooling down.
    pub fn try_trigger(&mut self, now: f64, leftward: bool) -> Option<Vec2> {
        if !self.is_ready(now) {
            return None;
        }

        self.last_used = Some(now);
        let dx = if leftward { -self.distance } else { self.distance };
        Some(Vec2::new(dx, 0.0))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
