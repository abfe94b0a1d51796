//=========================================================================
// Player Controller
//=========================================================================
//
// Per-tick player logic on top of a kinematic body.
//
// Processing Pipeline (one tick):
// 1. Boost charge: track modifier hold time
// 2. Teleport: cooldown check, displacement, departure/arrival effects
// 3. Movement + jump input (when control is enabled)
// 4. Jump FSM transitions (notifications scheduled here)
// 5. compute_velocity(): tuning, take-off / stop-jump intents, target
// 6. Integration against the collision probe
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::boost::BoostCharge;
use super::jump::{JumpState, PlayerJumpFsm};
use super::teleport::TeleportAbility;
use crate::core::input::{Action, InputSource};
use crate::core::model::{ModelError, ModelRegistry, PlatformerModel};
use crate::core::physics::{CollisionProbe, KinematicBody};
use crate::core::scheduler::EventScheduler;
use crate::gameplay::events::{BoostedJumpEffect, PlayerStopJump, TeleportEffect, TeleportPhase};
use crate::SimulationError;

//=== PlayerConfig ========================================================

/// Player movement and ability settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Max horizontal speed.
    pub max_speed: f32,

    /// Vertical speed at take-off, before the jump modifier.
    pub jump_takeoff_speed: f32,

    /// Seconds the boost modifier must be held to arm.
    pub boost_hold_threshold: f64,

    /// Added to the jump modifier while the boost is armed.
    pub boost_increment: f32,

    /// Vertical offset below the player for the boosted jump effect.
    pub boost_effect_offset: f32,

    /// Seconds between teleports.
    pub teleport_cooldown: f64,

    /// Horizontal teleport distance.
    pub teleport_distance: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_speed: 7.0,
            jump_takeoff_speed: 7.0,
            boost_hold_threshold: 3.0,
            boost_increment: 0.75,
            boost_effect_offset: 0.5,
            teleport_cooldown: 5.0,
            teleport_distance: 5.0,
        }
    }
}

//=== FrameContext ========================================================

/// Shared simulation state lent to the player for one tick.
pub struct FrameContext<'a> {
    /// Tick duration in seconds.
    pub dt: f32,

    /// Simulation time at the start of the tick, in seconds.
    pub time: f64,

    pub models: &'a mut ModelRegistry,
    pub scheduler: &'a mut EventScheduler,
    pub probe: &'a dyn CollisionProbe,
}

//=== Facing / AnimationParams ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Values a presentation layer needs to animate the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub grounded: bool,

    /// `|velocity.x| / max_speed`.
    pub normalized_speed: f32,

    pub facing: Facing,
}

//=== JumpIntent ==========================================================

/// One-shot vertical request handed from input/FSM to compute_velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum JumpIntent {
    #[default]
    None,
    TakeOff,
    StopAscent,
}

//=== PlayerController ====================================================

pub struct PlayerController {
    config: PlayerConfig,
    body: KinematicBody,
    fsm: PlayerJumpFsm,
    boost: BoostCharge,
    teleport: TeleportAbility,
    intent: JumpIntent,
    move_x: f32,
    facing: Facing,
    control_enabled: bool,
    baseline_jump_modifier: Option<f32>,
}

impl PlayerController {
    pub fn new(config: PlayerConfig, body: KinematicBody) -> Self {
        Self {
            config,
            body,
            fsm: PlayerJumpFsm::new(),
            boost: BoostCharge::new(config.boost_hold_threshold, config.boost_increment),
            teleport: TeleportAbility::new(config.teleport_cooldown, config.teleport_distance),
            intent: JumpIntent::None,
            move_x: 0.0,
            facing: Facing::Right,
            control_enabled: true,
            baseline_jump_modifier: None,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Captures the tuning baseline and probes the spawn position.
    ///
    /// Must run once before the first tick, after the tuning model is
    /// registered.
    pub fn init(
        &mut self,
        models: &ModelRegistry,
        probe: &dyn CollisionProbe,
    ) -> Result<(), ModelError> {
        let baseline = models.require::<PlatformerModel>()?.jump_modifier;
        self.baseline_jump_modifier = Some(baseline);
        self.body.settle(probe);
        debug!(
            "Player initialized at {:?} (grounded: {}, jump modifier baseline: {})",
            self.body.position(),
            self.body.is_grounded(),
            baseline
        );
        Ok(())
    }

    /// Replaces the jump modifier baseline the boost restores on release.
    pub fn rebase_jump_modifier(&mut self, baseline: f32) {
        debug!("Jump modifier baseline set to {}", baseline);
        self.baseline_jump_modifier = Some(baseline);
    }

    /// Runs one tick of player logic and integrates the body.
    pub fn tick(
        &mut self,
        input: &dyn InputSource,
        frame: &mut FrameContext<'_>,
    ) -> Result<(), SimulationError> {
        let grounded = self.body.is_grounded();
        let position = self.body.position();

        //--- 1. Boost charge ---------------------------------------------
        self.boost.update(input.is_held(Action::Boost), frame.time);

        //--- 2. Teleport -------------------------------------------------
        if input.is_pressed(Action::Teleport) {
            self.try_teleport(input, frame, position)?;
        }

        //--- 3. Movement + jump input ------------------------------------
        if self.control_enabled {
            self.move_x = input.horizontal();
            let accepted = input.is_pressed(Action::Jump) && self.fsm.request_jump(grounded);
            if !accepted && input.is_released(Action::Jump) {
                frame.scheduler.schedule(PlayerStopJump { position })?;
                self.intent = JumpIntent::StopAscent;
            }
        } else {
            self.move_x = 0.0;
        }

        //--- 4. Jump FSM -------------------------------------------------
        let step = self.fsm.advance(grounded, position, frame.scheduler)?;
        if step.took_off {
            self.intent = JumpIntent::TakeOff;
        }
        if step.landed {
            self.boost.reset_hold();
        }

        //--- 5. Velocity -------------------------------------------------
        self.compute_velocity(frame)?;

        //--- 6. Integration ----------------------------------------------
        self.body.integrate(frame.probe, frame.dt);
        Ok(())
    }

    fn try_teleport(
        &mut self,
        input: &dyn InputSource,
        frame: &mut FrameContext<'_>,
        position: Vec2,
    ) -> Result<(), SimulationError> {
        let leftward =
            input.is_held(Action::TeleportDirection) || input.is_pressed(Action::TeleportDirection);

        if !self.teleport.is_ready(frame.time) {
            debug!(
                "Teleport on cooldown ({:.2}s remaining)",
                self.teleport.cooldown_remaining(frame.time)
            );
            return Ok(());
        }

        frame.scheduler.schedule(TeleportEffect {
            position,
            phase: TeleportPhase::Departure,
        })?;

        if let Some(offset) = self.teleport.try_trigger(frame.time, leftward) {
            self.body.displace(offset);
            frame.scheduler.schedule(TeleportEffect {
                position: position + offset,
                phase: TeleportPhase::Arrival,
            })?;
            debug!("Teleported by {:?} at t={:.2}", offset, frame.time);
        }
        Ok(())
    }

    /// Converts intent and tuning into velocity requests on the body.
    fn compute_velocity(&mut self, frame: &mut FrameContext<'_>) -> Result<(), SimulationError> {
        let baseline = match self.baseline_jump_modifier {
            Some(baseline) => baseline,
            None => {
                warn!("Player ticked before init(), capturing tuning baseline now");
                let baseline = frame.models.require::<PlatformerModel>()?.jump_modifier;
                *self.baseline_jump_modifier.insert(baseline)
            }
        };

        let model = frame.models.require_mut::<PlatformerModel>()?;
        self.boost.apply(model, baseline);
        let tuning = *model;

        match std::mem::take(&mut self.intent) {
            JumpIntent::TakeOff => {
                if self.boost.is_armed() {
                    let position =
                        self.body.position() - Vec2::new(0.0, self.config.boost_effect_offset);
                    frame.scheduler.schedule(BoostedJumpEffect { position })?;
                }
                self.body
                    .launch(self.config.jump_takeoff_speed * tuning.jump_modifier);
            }
            JumpIntent::StopAscent => self.body.damp_ascent(tuning.jump_deceleration),
            JumpIntent::None => {}
        }

        if self.move_x > 0.01 {
            self.facing = Facing::Right;
        } else if self.move_x < -0.01 {
            self.facing = Facing::Left;
        }

        self.body
            .set_target_velocity(Vec2::new(self.move_x * self.config.max_speed, 0.0));
        Ok(())
    }

    //--- Control ----------------------------------------------------------

    /// Disabling control zeroes movement and ignores jump input.
    pub fn set_control_enabled(&mut self, enabled: bool) {
        self.control_enabled = enabled;
    }

    pub fn is_control_enabled(&self) -> bool {
        self.control_enabled
    }

    //--- Query API --------------------------------------------------------

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn jump_state(&self) -> JumpState {
        self.fsm.state()
    }

    pub fn jump_count(&self) -> u8 {
        self.fsm.jump_count()
    }

    pub fn boost(&self) -> &BoostCharge {
        &self.boost
    }

    pub fn teleport(&self) -> &TeleportAbility {
        &self.teleport
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn animation(&self) -> AnimationParams {
        let normalized_speed = if self.config.max_speed > 0.0 {
            self.body.velocity().x.abs() / self.config.max_speed
        } else {
            0.0
        };

        AnimationParams {
            grounded: self.body.is_grounded(),
            normalized_speed,
            facing: self.facing,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
