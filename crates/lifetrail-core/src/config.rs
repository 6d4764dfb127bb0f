//! Engine configuration.
//!
//! All fields have defaults matching the stock world (40x60, 15% alive,
//! 0.1s steps, aging-map trail), so a JSON file only needs the fields it
//! changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lifetrail_logic::clock::StepPreset;
use lifetrail_logic::constants::{step_durations, world};
use lifetrail_logic::error::ConfigError;
use lifetrail_logic::grid::check_dimensions;
use lifetrail_logic::overlay::OverlayKind;
use lifetrail_logic::seed::check_probability;

/// Simulation parameters fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    /// Chance that a cell starts alive after a reset.
    pub alive_probability: f64,
    /// Seconds between generations; zero or less starts paused.
    pub step_duration: f64,
    pub overlay: OverlayKind,
    /// Fixed RNG seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: world::COLS,
            height: world::ROWS,
            alive_probability: world::FIRST_GEN_ALIVE,
            step_duration: step_durations::DEFAULT,
            overlay: OverlayKind::default(),
            seed: None,
        }
    }
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

impl SimConfig {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.width, self.height)?;
        check_probability(self.alive_probability)?;
        if !self.step_duration.is_finite() {
            return Err(ConfigError::InvalidStepDuration(self.step_duration));
        }
        self.overlay.validate()
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayKind) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_preset(mut self, preset: StepPreset) -> Self {
        self.step_duration = preset.seconds();
        self
    }
}
