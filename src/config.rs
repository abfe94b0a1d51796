//=========================================================================
// Simulation Configuration
//=========================================================================
//
// RON-backed configuration for a simulation run.
//
// Architecture:
//   file / string ─ron→ SimulationConfig ─validate()→ SimulationBuilder
//
// Every field has a default, so a config file only needs the values it
// overrides:
// ```text
// (
//     tick_rate: 120.0,
//     player: (teleport_cooldown: 2.5),
// )
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::model::PlatformerModel;
use crate::core::physics::BodyConfig;
use crate::gameplay::player::PlayerConfig;

//=== ConfigError =========================================================

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io(std::io::Error),

    /// Config text is not valid RON for [`SimulationConfig`].
    Parse(ron::error::SpannedError),

    /// Config could not be written back to RON.
    Serialize(ron::Error),

    /// Config parsed but holds an unusable value.
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Config IO error: {}", e),
            Self::Parse(e) => write!(f, "Config parse error: {}", e),
            Self::Serialize(e) => write!(f, "Config serialize error: {}", e),
            Self::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

//=== SimulationConfig ====================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed ticks per second.
    pub tick_rate: f64,

    /// Player spawn position `[x, y]`.
    pub spawn_position: [f32; 2],

    pub body: BodyConfig,
    pub player: PlayerConfig,

    /// Initial tuning model values.
    pub tuning: PlatformerModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            spawn_position: [0.0, 0.0],
            body: BodyConfig::default(),
            player: PlayerConfig::default(),
            tuning: PlatformerModel::default(),
        }
    }
}

impl SimulationConfig {
    //--- Loading ----------------------------------------------------------

    /// Parses and validates a config from RON text.
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("    ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    //--- Validation -------------------------------------------------------

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(invalid(format!("tick_rate must be positive, got {}", self.tick_rate)));
        }
        if !self.spawn_position.iter().all(|v| v.is_finite()) {
            return Err(invalid("spawn_position must be finite".to_string()));
        }

        let body = &self.body;
        non_negative("body.acceleration", body.acceleration)?;
        non_negative("body.deceleration", body.deceleration)?;
        non_negative("body.air_deceleration_multiplier", body.air_deceleration_multiplier)?;
        finite("body.gravity", body.gravity)?;
        non_negative("body.gravity_modifier", body.gravity_modifier)?;
        non_negative("body.fall_gravity_modifier", body.fall_gravity_modifier)?;

        let player = &self.player;
        non_negative("player.max_speed", player.max_speed)?;
        positive("player.jump_takeoff_speed", player.jump_takeoff_speed)?;
        if !(player.boost_hold_threshold.is_finite() && player.boost_hold_threshold >= 0.0) {
            return Err(invalid(format!(
                "player.boost_hold_threshold must be non-negative, got {}",
                player.boost_hold_threshold
            )));
        }
        finite("player.boost_increment", player.boost_increment)?;
        finite("player.boost_effect_offset", player.boost_effect_offset)?;
        non_negative("player.teleport_distance", player.teleport_distance)?;
        if !(player.teleport_cooldown.is_finite() && player.teleport_cooldown >= 0.0) {
            return Err(invalid(format!(
                "player.teleport_cooldown must be non-negative, got {}",
                player.teleport_cooldown
            )));
        }

        positive("tuning.jump_modifier", self.tuning.jump_modifier)?;
        let decel = self.tuning.jump_deceleration;
        if !(0.0..=1.0).contains(&decel) {
            return Err(invalid(format!(
                "tuning.jump_deceleration must be within [0, 1], got {}",
                decel
            )));
        }

        Ok(())
    }

    pub fn spawn(&self) -> Vec2 {
        Vec2::from(self.spawn_position)
    }
}

//--- Validation helpers --------------------------------------------------

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{} must be finite, got {}", name, value)))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be non-negative, got {}", name, value)))
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be positive, got {}", name, value)))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
