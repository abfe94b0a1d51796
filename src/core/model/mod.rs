//=========================================================================
// Simulation Models
//=========================================================================
//
// Explicitly constructed store of singleton game-state objects.
//
// Architecture:
//   ModelRegistry: HashMap<TypeId, Box<dyn Any>> (one value per type)
//   PlatformerModel: physics tuning read by the integrator every tick
//
// The registry is created once at simulation start and passed by
// reference into every component that needs tuning values.
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;
mod tuning;

//=== Public API ==========================================================

pub use registry::{Model, ModelError, ModelRegistry};
pub use tuning::{PlatformerModel, TuningScalar};
