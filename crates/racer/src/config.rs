//! Game configuration
//!
//! Loaded from TOML or RON through [`racer_engine::config::Config`]. Every
//! section falls back to its defaults, so a file only needs the values it
//! overrides.

use crate::camera::{CameraMode, Viewport};
use crate::vehicle::VehicleSpec;
use racer_engine::config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RacerConfig {
    /// Vehicle model tuning
    pub vehicle: VehicleSpec,
    /// Follow camera setup
    pub camera: CameraConfig,
    /// Headless run parameters
    pub simulation: SimulationConfig,
}

/// Follow camera setup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Mode at session start
    pub initial_mode: CameraMode,
    /// Viewport the projections are sized from
    pub viewport: Viewport,
}

/// Headless run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed timestep in seconds
    pub fixed_dt: f32,
    /// Frames to simulate
    pub frames: u32,
    /// Seed for the demo scene layout
    pub seed: u64,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            frames: 600,
            seed: 42,
            log_level: "info".to_string(),
        }
    }
}

impl Config for RacerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check();
        if let Err(error) = &result {
            log::warn!("Rejected configuration: {error}");
        }
        result
    }
}

impl RacerConfig {
    fn check(&self) -> Result<(), ConfigError> {
        self.vehicle
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("vehicle: {e}")))?;

        let viewport = self.camera.viewport;
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera: viewport must be positive, got {}x{}",
                viewport.width, viewport.height
            )));
        }

        if self.simulation.fixed_dt <= 0.0 {
            return Err(ConfigError::Invalid("simulation: fixed_dt must be positive".to_string()));
        }
        Ok(())
    }
}
