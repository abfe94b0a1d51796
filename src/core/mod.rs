//=========================================================================
// Core Systems
//=========================================================================
//
// Engine-level building blocks with no platformer rules of their own.
//
// Components:
// - `scheduler`: deterministic type-tagged event queue
// - `model`: singleton-per-type model registry and tuning
// - `physics`: kinematic body, integrator and collision probe contract
// - `input`: abstract action input and per-tick action state
//
//=========================================================================

//=== Module Declarations =================================================

pub mod input;
pub mod model;
pub mod physics;
pub mod scheduler;
