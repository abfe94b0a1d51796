//=========================================================================
// Kinematic Physics
//=========================================================================
//
// Velocity-driven bodies integrated against an external collision probe.
//
// Per tick:
//   game logic → target velocity + one-shot intents (impulse, damping,
//   displacement) → integrate() → probe() → position correction + grounded
//
// Velocity and position are only ever written by the integrator; target
// velocity and intents are the sole channels for higher-level logic.
//
//=========================================================================

//=== Module Declarations =================================================

mod body;
mod collision;
mod integrator;

//=== Public API ==========================================================

pub use body::{BodyConfig, KinematicBody};
pub use collision::{CollisionProbe, Contact, FlatGround, ProbeError};
pub use integrator::move_towards;
