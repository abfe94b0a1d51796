//=========================================================================
// Player
//=========================================================================
//
// Player mechanics layered over a KinematicBody.
//
// Components:
// - `jump`: jump FSM and double-jump counter
// - `boost`: hold-to-arm jump modifier boost
// - `teleport`: cooldown-gated horizontal teleport
// - `controller`: per-tick orchestration of the above
//
//=========================================================================

//=== Module Declarations =================================================

mod boost;
mod controller;
mod jump;
mod teleport;

//=== Public API ==========================================================

pub use boost::BoostCharge;
pub use controller::{AnimationParams, Facing, FrameContext, PlayerConfig, PlayerController};
pub use jump::{JumpState, JumpStep, PlayerJumpFsm, MAX_JUMPS};
pub use teleport::TeleportAbility;
