//=========================================================================
// Runtime Commands
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== RuntimeCommand ======================================================

/// Messages sent to the logic thread.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCommand {
    /// Input events for one tick.
    Input(Vec<InputEvent>),

    /// Stop after stepping any input already received.
    Shutdown,
}
