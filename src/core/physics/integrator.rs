//=========================================================================
// Integrator
//=========================================================================
//
// Advances a KinematicBody by one tick.
//
// Processing Pipeline:
// 1. Displacement: apply queued teleport offset
// 2. Horizontal:   approach target (acceleration) or zero (deceleration)
// 3. Vertical:     take-off impulse, else damping + gravity
// 4. Position:     integrate, probe, correct, update grounded
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::{CollisionProbe, KinematicBody};

//=== move_towards() ======================================================

/// Moves `current` toward `target` by at most `max_delta`, never past it.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

//=== KinematicBody Integration ===========================================

impl KinematicBody {
    /// Advances the body by `dt` seconds against `probe`.
    pub fn integrate(&mut self, probe: &dyn CollisionProbe, dt: f32) {
        let intents = std::mem::take(&mut self.intents);
        self.position += intents.displacement;

        //--- Horizontal --------------------------------------------------
        let target_x = self.target_velocity.x;
        self.velocity.x = if target_x != 0.0 {
            move_towards(self.velocity.x, target_x, self.config.acceleration * dt)
        } else {
            let multiplier = if self.grounded {
                1.0
            } else {
                self.config.air_deceleration_multiplier
            };
            move_towards(self.velocity.x, 0.0, self.config.deceleration * multiplier * dt)
        };

        //--- Vertical ----------------------------------------------------
        if let Some(speed) = intents.take_off {
            self.velocity.y = speed;
        } else {
            if let Some(factor) = intents.ascent_damping {
                if self.velocity.y > 0.0 {
                    self.velocity.y *= factor;
                }
            }

            let modifier = if self.velocity.y < 0.0 {
                self.config.fall_gravity_modifier
            } else {
                self.config.gravity_modifier
            };
            self.velocity.y += self.config.gravity * modifier * dt;
        }

        //--- Position + probe --------------------------------------------
        self.position += self.velocity * dt;
        self.apply_probe(probe);
    }

    /// Probes at the current position without moving.
    ///
    /// Used once at spawn so the first tick sees a valid grounded flag.
    pub fn settle(&mut self, probe: &dyn CollisionProbe) {
        self.apply_probe(probe);
    }

    fn apply_probe(&mut self, probe: &dyn CollisionProbe) {
        match probe.probe(self.position, self.velocity) {
            Ok(contact) => {
                self.position = contact.position;
                self.grounded = contact.grounded;
                if self.grounded && self.velocity.y < 0.0 {
                    self.velocity.y = 0.0;
                }
            }
            Err(e) => {
                warn!("Collision probe failed, treating body as airborne: {}", e);
                self.grounded = false;
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::{BodyConfig, Contact, FlatGround, ProbeError};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    struct BrokenProbe;

    impl CollisionProbe for BrokenProbe {
        fn probe(&self, _: Vec2, _: Vec2) -> Result<Contact, ProbeError> {
            Err(ProbeError::Unavailable)
        }
    }

    fn grounded_body(ground: &FlatGround) -> KinematicBody {
        let mut body = KinematicBody::new(Vec2::ZERO, BodyConfig::default());
        body.settle(ground);
        body
    }

    //=====================================================================
    // move_towards()
    //=====================================================================

    #[test]
    fn move_towards_clamps_at_target() {
        assert_eq!(move_towards(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_towards(0.9, 1.0, 0.25), 1.0);
        assert_eq!(move_towards(-0.1, 0.0, 0.25), 0.0);
        assert_eq!(move_towards(3.0, -3.0, 1.0), 2.0);
    }

    //=====================================================================
    // Horizontal
    //=====================================================================

    #[test]
    fn accelerates_toward_target() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);
        body.set_target_velocity(Vec2::new(7.0, 0.0));

        body.integrate(&ground, DT);
        assert!((body.velocity().x - 1.0).abs() < 1e-5);

        for _ in 0..20 {
            body.integrate(&ground, DT);
        }
        assert_eq!(body.velocity().x, 7.0);
    }

    #[test]
    fn deceleration_converges_without_overshoot() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);
        body.set_target_velocity(Vec2::new(7.0, 0.0));
        for _ in 0..30 {
            body.integrate(&ground, DT);
        }
        assert_eq!(body.velocity().x, 7.0);

        body.set_target_velocity(Vec2::ZERO);
        let step = body.config().deceleration * DT;
        let bound = (7.0 / step).ceil() as usize;

        let mut ticks = 0;
        while body.velocity().x != 0.0 {
            let before = body.velocity().x;
            body.integrate(&ground, DT);
            assert!(body.velocity().x >= 0.0, "overshot past zero");
            assert!(body.velocity().x < before);
            ticks += 1;
            assert!(ticks <= bound, "did not converge within {} ticks", bound);
        }
    }

    #[test]
    fn airborne_deceleration_is_scaled() {
        let ground = FlatGround::new(-100.0);
        let mut body = KinematicBody::new(Vec2::new(0.0, 10.0), BodyConfig::default());
        body.velocity.x = 5.0;

        body.integrate(&ground, DT);

        let config = BodyConfig::default();
        let expected = 5.0 - config.deceleration * config.air_deceleration_multiplier * DT;
        assert!((body.velocity().x - expected).abs() < 1e-5);
    }

    //=====================================================================
    // Vertical
    //=====================================================================

    #[test]
    fn resting_body_stays_grounded() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);
        assert!(body.is_grounded());

        for _ in 0..10 {
            body.integrate(&ground, DT);
            assert!(body.is_grounded());
            assert_eq!(body.position().y, 0.0);
            assert_eq!(body.velocity().y, 0.0);
        }
    }

    #[test]
    fn take_off_skips_gravity_for_that_tick() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);

        body.launch(7.0);
        body.integrate(&ground, DT);

        assert_eq!(body.velocity().y, 7.0);
        assert!(!body.is_grounded());

        body.integrate(&ground, DT);
        assert!(body.velocity().y < 7.0);
    }

    #[test]
    fn ascent_damping_is_multiplicative() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);
        body.launch(8.0);
        body.integrate(&ground, DT);

        body.damp_ascent(0.5);
        body.integrate(&ground, DT);

        let expected = 8.0 * 0.5 + body.config().gravity * DT;
        assert!((body.velocity().y - expected).abs() < 1e-5);
        assert!(body.velocity().y > 0.0);
    }

    #[test]
    fn ascent_damping_ignored_while_falling() {
        let ground = FlatGround::new(-100.0);
        let mut body = KinematicBody::new(Vec2::new(0.0, 10.0), BodyConfig::default());
        body.velocity.y = -2.0;

        body.damp_ascent(0.5);
        body.integrate(&ground, DT);

        let expected = -2.0 + body.config().gravity * DT;
        assert!((body.velocity().y - expected).abs() < 1e-5);
    }

    #[test]
    fn jump_arc_lands_and_regrounds() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);
        body.launch(5.0);

        let mut airborne_ticks = 0;
        loop {
            body.integrate(&ground, DT);
            if body.is_grounded() {
                break;
            }
            airborne_ticks += 1;
            assert!(airborne_ticks < 600, "never landed");
        }

        assert!(airborne_ticks > 0);
        assert_eq!(body.position().y, 0.0);
        assert_eq!(body.velocity().y, 0.0);
    }

    //=====================================================================
    // Displacement + probe failures
    //=====================================================================

    #[test]
    fn displacement_is_applied_once() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);

        body.displace(Vec2::new(5.0, 0.0));
        body.integrate(&ground, DT);
        assert_eq!(body.position().x, 5.0);

        body.integrate(&ground, DT);
        assert_eq!(body.position().x, 5.0);
    }

    #[test]
    fn probe_failure_degrades_to_airborne() {
        let ground = FlatGround::new(0.0);
        let mut body = grounded_body(&ground);
        assert!(body.is_grounded());

        body.integrate(&BrokenProbe, DT);

        assert!(!body.is_grounded());
    }
}
