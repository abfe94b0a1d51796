//=========================================================================
// Collision Probe
//=========================================================================
//
// Contract between the integrator and level geometry.
//
// The probe receives the integrated position and velocity and returns a
// corrected position plus whether the body rests on a surface. Collision
// shapes themselves live outside the core.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec2;

//=== Contact =============================================================

/// Result of a successful probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Position after penetration correction.
    pub position: Vec2,

    /// Body rests on traversable geometry.
    pub grounded: bool,
}

//=== ProbeError ==========================================================

/// Probe failures. The integrator treats them as "not grounded".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeError {
    /// Position lies outside the level geometry.
    OutOfBounds { x: f32, y: f32 },

    /// Geometry is not available (e.g. not loaded yet).
    Unavailable,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => write!(f, "Position ({}, {}) is out of bounds", x, y),
            Self::Unavailable => write!(f, "Collision geometry unavailable"),
        }
    }
}

impl std::error::Error for ProbeError {}

//=== CollisionProbe Trait ================================================

/// Level geometry queried once per integration pass.
pub trait CollisionProbe {
    fn probe(&self, position: Vec2, velocity: Vec2) -> Result<Contact, ProbeError>;
}

//=== FlatGround ==========================================================

/// Horizontal floor at a fixed height, optionally bounded in x.
///
/// Suitable for headless simulation and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    height: f32,
    extent: Option<(f32, f32)>,
}

impl FlatGround {
    /// Distance above the floor still considered touching.
    const SKIN: f32 = 0.01;

    /// Infinite floor at `height`.
    pub fn new(height: f32) -> Self {
        Self { height, extent: None }
    }

    /// Floor at `height` spanning `min_x..=max_x`.
    pub fn bounded(height: f32, min_x: f32, max_x: f32) -> Self {
        Self {
            height,
            extent: Some((min_x.min(max_x), min_x.max(max_x))),
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl CollisionProbe for FlatGround {
    fn probe(&self, position: Vec2, velocity: Vec2) -> Result<Contact, ProbeError> {
        if let Some((min_x, max_x)) = self.extent {
            if position.x < min_x || position.x > max_x {
                return Err(ProbeError::OutOfBounds {
                    x: position.x,
                    y: position.y,
                });
            }
        }

        let touching = position.y <= self.height + Self::SKIN && velocity.y <= 0.0;
        if touching {
            Ok(Contact {
                position: Vec2::new(position.x, position.y.max(self.height)),
                grounded: true,
            })
        } else {
            Ok(Contact {
                position,
                grounded: false,
            })
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
