//=========================================================================
// Runtime
//=========================================================================
//
// Runs a Simulation on a dedicated logic thread at its fixed tick rate.
//
// Architecture:
// ```text
//   caller ─Sender<RuntimeCommand>→ CommandCollector → Simulation::step()
//                                        │
//                                        └─ TickControl (continue / exit)
// ```
//
// Components:
// - `command`: messages accepted by the logic thread
// - `collector`: bounded per-frame draining of the command channel
// - `runner`: thread lifecycle and fixed-rate pacing
//
//=========================================================================

//=== Module Declarations =================================================

mod collector;
mod command;
mod runner;

//=== Public API ==========================================================

pub use command::RuntimeCommand;
pub use runner::SimulationRunner;

//=== Internal API ========================================================

pub(crate) use collector::{CommandCollector, TickControl};
