//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_platformer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Simulation facade
pub use crate::config::SimulationConfig;
pub use crate::runtime::SimulationRunner;
pub use crate::{Simulation, SimulationBuilder, SimulationError};

// Input system
pub use crate::core::input::{Action, ActionState, InputEvent, InputSource};

// Physics
pub use crate::core::physics::{CollisionProbe, FlatGround, KinematicBody};

// Models
pub use crate::core::model::{ModelRegistry, PlatformerModel, TuningScalar};

// Event scheduling
pub use crate::core::scheduler::{DispatchContext, EventScheduler};

// Gameplay
pub use crate::gameplay::player::{JumpState, PlayerController};
pub use crate::gameplay::{Notification, NotificationSink};
