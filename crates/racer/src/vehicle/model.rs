//! Per-model vehicle tuning

use racer_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gear index reserved for reverse
pub const REVERSE_GEAR: usize = 0;

/// Gear index for neutral/first; also the gear a collision resets to
pub const NEUTRAL_GEAR: usize = 1;

/// Fixed tuning of one vehicle model
///
/// `max_speed` and `acceleration` are parallel tables indexed by gear:
/// index 0 is reverse, index 1 is neutral, the rest are forward gears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    /// Yaw applied per frame at full speed fraction (radians)
    pub steering_speed: f32,
    /// Cosmetic front-wheel angle while a turn is held (degrees)
    pub steering_angle: f32,
    /// Speed removed per frame while braking
    pub braking_force: f32,
    /// Vertical impulse of a jump
    pub jump_speed: f32,
    /// Acceleration multiplier while boosting; `multiplier / 10` scales the speed ceiling
    pub boost_multiplier: f32,
    /// Boost fuel capacity (seconds)
    pub max_boost: f32,
    /// Per-gear speed ceilings
    pub max_speed: Vec<f32>,
    /// Per-gear speed gained per frame
    pub acceleration: Vec<f32>,
    /// Half sizes of the collision box
    pub body_extents: Vec3,
    /// Collision box center relative to the vehicle position
    pub body_offset: Vec3,
    /// Uniform render scale
    pub scale: f32,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self::racing_car()
    }
}

impl VehicleSpec {
    /// The racing car model (R-N-1-2-3-4)
    pub fn racing_car() -> Self {
        Self {
            steering_speed: 0.02,
            steering_angle: 25.0,
            braking_force: 30.0,
            jump_speed: 1000.0,
            boost_multiplier: 20.0,
            max_boost: 7.5,
            max_speed: vec![800.0, 0.0, 900.0, 1500.0, 2000.0, 3500.0],
            acceleration: vec![15.0, -3.0, 20.0, 15.0, 7.5, 2.0],
            body_extents: Vec3::new(120.0, 80.0, 260.0),
            body_offset: Vec3::new(0.0, 80.0, 0.0),
            scale: 1.0,
        }
    }

    /// Number of gears including reverse and neutral
    pub fn gear_count(&self) -> usize {
        self.max_speed.len()
    }

    /// Check the tables and factors a vehicle relies on every frame
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.max_speed.len() != self.acceleration.len() {
            return Err(SpecError::GearTableMismatch {
                max_speed: self.max_speed.len(),
                acceleration: self.acceleration.len(),
            });
        }
        if self.max_speed.len() <= NEUTRAL_GEAR {
            return Err(SpecError::MissingNeutral(self.max_speed.len()));
        }
        if self.boost_multiplier <= 0.0 {
            return Err(SpecError::NonPositive("boost_multiplier"));
        }
        if self.scale <= 0.0 {
            return Err(SpecError::NonPositive("scale"));
        }
        if self.body_extents.iter().any(|&extent| extent <= 0.0) {
            return Err(SpecError::NonPositive("body_extents"));
        }
        Ok(())
    }
}

/// Rejected vehicle tuning
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    /// The gear tables have different lengths
    #[error("gear tables differ in length: {max_speed} max speeds, {acceleration} accelerations")]
    GearTableMismatch {
        /// Length of `max_speed`
        max_speed: usize,
        /// Length of `acceleration`
        acceleration: usize,
    },

    /// The tables lack the reverse and neutral entries
    #[error("gear tables need reverse and neutral entries, found {0} gear(s)")]
    MissingNeutral(usize),

    /// A factor that must be positive is not
    #[error("{0} must be positive")]
    NonPositive(&'static str),
}
