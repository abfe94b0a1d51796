//=========================================================================
// Aetheric Platformer: Library Root
//
// Deterministic simulation core of a 2D platformer: an event scheduler,
// a kinematic integrator and the player jump logic that drives it.
//
// Responsibilities:
// - Expose the `Simulation` facade and its builder
// - Expose core systems (`core`) and platformer rules (`gameplay`) for
//   direct use and testing
// - Optionally run a simulation on its own thread (`runtime`)
//
// Typical usage:
// ```
// use aetheric_platformer::prelude::*;
//
// let mut sim = SimulationBuilder::new().build().unwrap();
// sim.step(&[InputEvent::ActionDown(Action::Jump)]).unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine-level systems (scheduler, models, physics,
// input). `gameplay` holds the player and its notifications.
//
pub mod config;
pub mod core;
pub mod gameplay;
pub mod prelude;
pub mod runtime;

//--- Internal Modules ----------------------------------------------------
//
// `simulation` defines the main entry point; its types are re-exported
// at the crate root.
//
mod simulation;

//--- Public Exports ------------------------------------------------------

pub use config::{ConfigError, SimulationConfig};
pub use simulation::{Simulation, SimulationBuilder, SimulationError, StepReport};
