//=========================================================================
// Simulation
//=========================================================================
//
// Main entry point: owns the scheduler, the model registry, the collision
// probe and the player, and advances them one fixed tick at a time.
//
// Architecture:
// ```text
//     SimulationBuilder  ──build()──>  Simulation  ──step()──>  StepReport
//         │                               │
//         ├─ with_config()                ├─ input: clear → process_events
//         ├─ with_tick_rate()             ├─ player.tick()
//         ├─ with_probe()                 └─ scheduler.tick()
//         └─ with_sink()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::config::{ConfigError, SimulationConfig};
use crate::core::input::{ActionState, InputEvent, InputSource};
use crate::core::model::{ModelError, ModelRegistry, PlatformerModel, TuningScalar};
use crate::core::physics::{CollisionProbe, FlatGround, KinematicBody};
use crate::core::scheduler::{EventScheduler, SchedulerError, Tick};
use crate::gameplay::notify::{install_notification_handlers, LogSink, NotificationSink};
use crate::gameplay::events::notification_kinds;
use crate::gameplay::player::{FrameContext, PlayerController};

//=== SimulationError =====================================================

/// Startup and per-tick simulation errors.
#[derive(Debug)]
pub enum SimulationError {
    /// Configuration failed to load or validate.
    Config(ConfigError),

    /// Event scheduling or dispatch failed.
    Scheduler(SchedulerError),

    /// A required model is missing or was registered twice.
    Model(ModelError),

    /// Logic thread failure.
    Runtime(String),
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

impl From<SchedulerError> for SimulationError {
    fn from(e: SchedulerError) -> Self {
        SimulationError::Scheduler(e)
    }
}

impl From<ModelError> for SimulationError {
    fn from(e: ModelError) -> Self {
        SimulationError::Model(e)
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::Scheduler(e) => write!(f, "Scheduler error: {}", e),
            Self::Model(e) => write!(f, "Model error: {}", e),
            Self::Runtime(e) => write!(f, "Runtime error: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Scheduler(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::Runtime(_) => None,
        }
    }
}

//=== SimulationBuilder ===================================================

/// Builder for configuring and constructing a [`Simulation`].
///
/// # Default Values
///
/// - **Tick rate**: 60.0 ticks per second
/// - **Probe**: [`FlatGround`] at height 0
/// - **Sink**: [`LogSink`]
///
/// # Examples
///
/// ```
/// use aetheric_platformer::prelude::*;
/// use crossbeam_channel::unbounded;
///
/// let (tx, rx) = unbounded();
/// let mut sim = SimulationBuilder::new()
///     .with_tick_rate(120.0)
///     .with_sink(tx)
///     .build()
///     .unwrap();
///
/// sim.step(&[InputEvent::ActionDown(Action::Jump)]).unwrap();
/// sim.step(&[]).unwrap();
///
/// assert!(matches!(rx.try_recv(), Ok(Notification::PlayerJumped(_))));
/// ```
pub struct SimulationBuilder {
    config: SimulationConfig,
    probe: Option<Box<dyn CollisionProbe + Send>>,
    sink: Option<Arc<dyn NotificationSink>>,
}

impl SimulationBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            probe: None,
            sink: None,
        }
    }

    /// Replaces the whole configuration. Later `with_*` calls still apply.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the fixed ticks per second.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate <= 0.0`.
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        assert!(tick_rate > 0.0, "Tick rate must be positive, got {}", tick_rate);
        self.config.tick_rate = tick_rate;
        self
    }

    pub fn with_spawn_position(mut self, position: Vec2) -> Self {
        self.config.spawn_position = position.to_array();
        self
    }

    /// Level geometry used by the integrator.
    pub fn with_probe<P>(mut self, probe: P) -> Self
    where
        P: CollisionProbe + Send + 'static,
    {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Receiver of every dispatched notification.
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: NotificationSink + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Same as [`with_sink`](Self::with_sink) for a sink shared elsewhere.
    pub fn with_shared_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validates the configuration and wires all systems together.
    ///
    /// Fails if the configuration is invalid or a notification kind ends
    /// up without a handler.
    pub fn build(self) -> Result<Simulation, SimulationError> {
        let config = self.config;
        config.validate()?;

        info!(
            "Building simulation (tick rate: {}, spawn: {:?})",
            config.tick_rate, config.spawn_position
        );

        let mut models = ModelRegistry::new();
        models.insert(config.tuning)?;

        let mut scheduler = EventScheduler::new();
        let sink = self.sink.unwrap_or_else(|| Arc::new(LogSink));
        install_notification_handlers(&mut scheduler, sink);
        scheduler.ensure_registered(&notification_kinds())?;

        let probe = self
            .probe
            .unwrap_or_else(|| Box::new(FlatGround::new(0.0)));

        let body = KinematicBody::new(config.spawn(), config.body);
        let mut player = PlayerController::new(config.player, body);
        player.init(&models, probe.as_ref())?;

        info!("Simulation ready");

        Ok(Simulation {
            dt: (1.0 / config.tick_rate) as f32,
            config,
            scheduler,
            models,
            player,
            probe,
            input: ActionState::new(),
            tick: 0,
        })
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== StepReport ==========================================================

/// Outcome of one [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Tick that was just simulated.
    pub tick: Tick,

    /// Events dispatched at the end of the tick.
    pub dispatched: usize,
}

//=== Simulation ==========================================================

/// Fixed-step platformer simulation.
///
/// Create via [`SimulationBuilder`].
pub struct Simulation {
    config: SimulationConfig,
    scheduler: EventScheduler,
    models: ModelRegistry,
    player: PlayerController,
    probe: Box<dyn CollisionProbe + Send>,
    input: ActionState,
    tick: Tick,
    dt: f32,
}

impl Simulation {
    //--- Execution --------------------------------------------------------

    /// Advances one tick with this tick's input events.
    ///
    /// Held actions and the horizontal axis persist between steps.
    pub fn step(&mut self, events: &[InputEvent]) -> Result<StepReport, SimulationError> {
        self.input.clear();
        self.input.process_events(events);

        let input = std::mem::take(&mut self.input);
        let result = self.step_with(&input);
        self.input = input;
        result
    }

    /// Advances one tick reading input from any [`InputSource`].
    pub fn step_with(&mut self, input: &dyn InputSource) -> Result<StepReport, SimulationError> {
        let tick = self.tick + 1;

        let mut frame = FrameContext {
            dt: self.dt,
            time: self.elapsed(),
            models: &mut self.models,
            scheduler: &mut self.scheduler,
            probe: self.probe.as_ref(),
        };
        self.player.tick(input, &mut frame)?;

        let dispatched = self.scheduler.tick(tick)?;
        self.tick = tick;

        if dispatched > 0 {
            debug!("Tick {}: dispatched {} events", tick, dispatched);
        }

        Ok(StepReport { tick, dispatched })
    }

    //--- Query API --------------------------------------------------------

    /// Last simulated tick (0 before the first step).
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Simulated seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.tick as f64 / self.config.tick_rate
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    /// For registering handlers of additional event kinds.
    pub fn scheduler_mut(&mut self) -> &mut EventScheduler {
        &mut self.scheduler
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Raw access to the registered models.
    ///
    /// The player rewrites `PlatformerModel::jump_modifier` from its
    /// captured baseline every tick, so edits to that field made here do
    /// not stick. Use [`set_tuning`](Self::set_tuning) for it.
    pub fn models_mut(&mut self) -> &mut ModelRegistry {
        &mut self.models
    }

    /// Sets a tuning value between steps.
    ///
    /// A new jump modifier also becomes the baseline the boost adds to and
    /// restores on release.
    pub fn set_tuning(&mut self, scalar: TuningScalar, value: f32) -> Result<(), ModelError> {
        self.models.require_mut::<PlatformerModel>()?.set(scalar, value);
        if scalar == TuningScalar::JumpModifier {
            self.player.rebase_jump_modifier(value);
        }
        Ok(())
    }

    /// Current tuning values.
    pub fn tuning(&self) -> Result<&PlatformerModel, ModelError> {
        self.models.require::<PlatformerModel>()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Action;
    use crate::gameplay::events::Notification;
    use crossbeam_channel::unbounded;

    //=====================================================================
    // SimulationBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = SimulationBuilder::new();
        assert_eq!(builder.config.tick_rate, 60.0);
        assert!(builder.probe.is_none());
        assert!(builder.sink.is_none());
    }

    #[test]
    fn builder_with_tick_rate() {
        let sim = SimulationBuilder::new().with_tick_rate(120.0).build().unwrap();
        assert_eq!(sim.config().tick_rate, 120.0);
        assert_eq!(sim.dt(), (1.0 / 120.0) as f32);
    }

    #[test]
    #[should_panic(expected = "Tick rate must be positive")]
    fn builder_with_tick_rate_panics_on_zero() {
        SimulationBuilder::new().with_tick_rate(0.0);
    }

    #[test]
    #[should_panic(expected = "Tick rate must be positive")]
    fn builder_with_tick_rate_panics_on_negative() {
        SimulationBuilder::new().with_tick_rate(-60.0);
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut config = SimulationConfig::default();
        config.tuning.jump_deceleration = 2.0;

        let result = SimulationBuilder::new().with_config(config).build();

        assert!(matches!(
            result,
            Err(SimulationError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn build_registers_tuning_and_settles_player() {
        let sim = SimulationBuilder::new()
            .with_spawn_position(Vec2::new(2.0, 0.0))
            .build()
            .unwrap();

        assert_eq!(sim.tuning().unwrap(), &PlatformerModel::default());
        assert!(sim.player().body().is_grounded());
        assert_eq!(sim.player().body().position(), Vec2::new(2.0, 0.0));
        assert_eq!(sim.current_tick(), 0);
    }

    #[test]
    fn spawn_in_air_is_not_grounded() {
        let sim = SimulationBuilder::new()
            .with_spawn_position(Vec2::new(0.0, 3.0))
            .build()
            .unwrap();

        assert!(!sim.player().body().is_grounded());
    }

    //=====================================================================
    // Simulation Tests
    //=====================================================================

    #[test]
    fn step_advances_tick_and_time() {
        let mut sim = SimulationBuilder::new().build().unwrap();

        let report = sim.step(&[]).unwrap();

        assert_eq!(report, StepReport { tick: 1, dispatched: 0 });
        assert_eq!(sim.current_tick(), 1);
        assert_eq!(sim.elapsed(), 1.0 / 60.0);
    }

    #[test]
    fn step_dispatches_into_sink() {
        let (tx, rx) = unbounded();
        let mut sim = SimulationBuilder::new().with_sink(tx).build().unwrap();

        sim.step(&[InputEvent::ActionDown(Action::Jump)]).unwrap();
        let report = sim.step(&[]).unwrap();

        assert_eq!(report.dispatched, 1);
        assert!(matches!(rx.try_recv(), Ok(Notification::PlayerJumped(_))));
    }

    #[test]
    fn held_actions_persist_between_steps() {
        let mut sim = SimulationBuilder::new().build().unwrap();

        sim.step(&[InputEvent::AxisMoved { horizontal: 1.0 }]).unwrap();
        sim.step(&[]).unwrap();

        assert_eq!(sim.player().body().target_velocity().x, 7.0);
    }

    #[test]
    fn missing_tuning_model_surfaces_as_error() {
        let mut sim = SimulationBuilder::new().build().unwrap();
        sim.models = ModelRegistry::new();

        let result = sim.step(&[]);

        assert!(matches!(
            result,
            Err(SimulationError::Model(ModelError::Missing(_)))
        ));
        assert_eq!(sim.current_tick(), 0);
    }

    //=====================================================================
    // Tuning Tests
    //=====================================================================

    #[test]
    fn set_jump_modifier_survives_into_take_off() {
        let mut sim = SimulationBuilder::new().build().unwrap();
        sim.step(&[]).unwrap();

        sim.set_tuning(TuningScalar::JumpModifier, 2.0).unwrap();
        sim.step(&[InputEvent::ActionDown(Action::Jump)]).unwrap();

        assert_eq!(sim.tuning().unwrap().jump_modifier, 2.0);
        assert_eq!(sim.player().body().velocity().y, 7.0 * 2.0);
    }

    #[test]
    fn jump_modifier_written_through_registry_is_restored() {
        let mut sim = SimulationBuilder::new().build().unwrap();

        sim.models_mut()
            .require_mut::<PlatformerModel>()
            .unwrap()
            .jump_modifier = 2.0;
        sim.step(&[]).unwrap();

        assert_eq!(sim.tuning().unwrap().jump_modifier, 1.5);
    }

    #[test]
    fn jump_deceleration_edit_through_registry_persists() {
        let mut sim = SimulationBuilder::new().build().unwrap();

        sim.models_mut()
            .require_mut::<PlatformerModel>()
            .unwrap()
            .jump_deceleration = 0.25;
        sim.step(&[]).unwrap();

        assert_eq!(sim.tuning().unwrap().jump_deceleration, 0.25);
    }

    #[test]
    fn set_tuning_without_model_is_error() {
        let mut sim = SimulationBuilder::new().build().unwrap();
        sim.models = ModelRegistry::new();

        let result = sim.set_tuning(TuningScalar::JumpDeceleration, 0.25);

        assert!(matches!(result, Err(ModelError::Missing(_))));
    }
}
