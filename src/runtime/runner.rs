//=========================================================================
// Simulation Runner
//=========================================================================
//
// Moves a Simulation onto a logic thread ticking at its configured rate.
//
// Each frame:
//  1. Collects runtime commands (bounded) and takes one input batch
//  2. Steps the simulation with that batch
//  3. Sleeps to maintain fixed pacing
//  4. Exits on Shutdown, disconnect or a simulation error
//
// The thread hands the Simulation back on join for inspection.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use super::{CommandCollector, RuntimeCommand, TickControl};
use crate::core::input::InputEvent;
use crate::simulation::{Simulation, SimulationError};

//=== SimulationRunner ====================================================

/// Handle to a simulation running on its own thread.
///
/// # Examples
///
/// ```
/// use aetheric_platformer::prelude::*;
///
/// let sim = SimulationBuilder::new().build().unwrap();
/// let runner = SimulationRunner::spawn(sim, 64);
///
/// runner.send_input(vec![InputEvent::ActionDown(Action::Jump)]).unwrap();
///
/// let sim = runner.shutdown().unwrap();
/// assert_eq!(sim.player().jump_count(), 1);
/// ```
pub struct SimulationRunner {
    commands: Sender<RuntimeCommand>,
    handle: thread::JoinHandle<Result<Simulation, SimulationError>>,
}

impl SimulationRunner {
    /// Spawns the logic thread.
    ///
    /// `capacity` bounds the command channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn spawn(simulation: Simulation, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");

        let (tx, rx) = bounded(capacity);
        let frame_duration = Duration::from_secs_f64(1.0 / simulation.config().tick_rate);

        info!(
            "Spawning logic thread ({} ticks/s, channel: {})",
            simulation.config().tick_rate,
            capacity
        );

        let handle = thread::spawn(move || {
            let mut simulation = simulation;
            let mut collector = CommandCollector::new(rx);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather commands --------------------------------
                let control = collector.collect_frame();
                if control == TickControl::Exit && !collector.has_batch() {
                    break;
                }

                //--- Step 2: Advance simulation ----------------------------
                if let Err(e) = simulation.step(collector.events()) {
                    error!("Simulation step failed at tick {}: {}", simulation.current_tick(), e);
                    return Err(e);
                }

                if control == TickControl::Exit {
                    break;
                }

                //--- Step 3: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            info!("Logic thread exiting at tick {}", simulation.current_tick());
            Ok(simulation)
        });

        Self {
            commands: tx,
            handle,
        }
    }

    /// Queues input without blocking. Each call is stepped on its own tick.
    pub fn send_input(&self, events: Vec<InputEvent>) -> Result<(), SimulationError> {
        match self.commands.try_send(RuntimeCommand::Input(events)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!("Command channel full, input dropped");
                Err(SimulationError::Runtime("command channel full".to_string()))
            }
            Err(TrySendError::Disconnected(_)) => Err(SimulationError::Runtime(
                "logic thread is not running".to_string(),
            )),
        }
    }

    /// Whether the logic thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the logic thread and returns the simulation.
    pub fn shutdown(self) -> Result<Simulation, SimulationError> {
        // Already gone when the thread exited on an error
        let _ = self.commands.send(RuntimeCommand::Shutdown);

        match self.handle.join() {
            Ok(result) => {
                info!("Logic thread terminated cleanly");
                result
            }
            Err(e) => {
                error!("Logic thread panicked: {:?}", e);
                Err(SimulationError::Runtime("logic thread panicked".to_string()))
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
    use crate::core::input::Action;
    use crate::core::model::ModelRegistry;
    use crate::simulation::SimulationBuilder;

    fn simulation() -> Simulation {
        SimulationBuilder::new().build().unwrap()
    }

    #[test]
    fn shutdown_returns_simulation() {
        let runner = SimulationRunner::spawn(simulation(), 8);

        let sim = runner.shutdown().unwrap();

        assert!(sim.player().body().is_grounded());
    }

    #[test]
    fn input_sent_before_shutdown_is_stepped() {
        let runner = SimulationRunner::spawn(simulation(), 8);

        runner
            .send_input(vec![InputEvent::ActionDown(Action::Teleport)])
            .unwrap();
        let sim = runner.shutdown().unwrap();

        assert!(sim.current_tick() >= 1);
        assert_eq!(sim.player().body().position().x, 5.0);
    }

    #[test]
    fn press_and_release_sent_separately_step_on_separate_ticks() {
        let runner = SimulationRunner::spawn(simulation(), 8);

        runner
            .send_input(vec![InputEvent::ActionDown(Action::Jump)])
            .unwrap();
        runner
            .send_input(vec![InputEvent::ActionUp(Action::Jump)])
            .unwrap();
        let sim = runner.shutdown().unwrap();

        // Release in the take-off tick would be ignored and leave the full
        // 7.0 * 1.5 launch speed
        assert!(sim.current_tick() >= 2);
        assert_eq!(sim.player().jump_count(), 1);
        assert!(sim.player().body().velocity().y < 7.0 * 1.5 * 0.5 + 1e-3);
    }

    #[test]
    fn step_error_ends_thread_with_error() {
        let mut sim = simulation();
        *sim.models_mut() = ModelRegistry::new();
        let runner = SimulationRunner::spawn(sim, 8);
        let _ = runner.send_input(vec![InputEvent::ActionDown(Action::Jump)]);

        let result = runner.shutdown();

        assert!(matches!(result, Err(SimulationError::Model(_))));
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn spawn_panics_on_zero_capacity() {
        SimulationRunner::spawn(simulation(), 0);
    }
}
