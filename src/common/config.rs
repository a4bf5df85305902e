//! World tuning parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::PhysicsError;
use crate::math::Vec2;

/// Settings a [`PhysicsWorld`](crate::world::PhysicsWorld) is created with.
///
/// Gravity follows screen conventions: +y points down.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    pub gravity: Vec2,
    /// Fixed steps per simulated second.
    pub fps: f64,
    /// Ceiling on unsimulated time carried between calls to `step`, in seconds.
    pub accumulator_limit: f64,
    /// Fraction of the remaining penetration removed per step.
    pub correction_percent: f64,
    /// Penetration tolerated without correction.
    pub correction_slop: f64,
}

impl WorldConfig {
    pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 9.8);
    pub const DEFAULT_FPS: f64 = 120.0;
    pub const DEFAULT_ACCUMULATOR_LIMIT: f64 = 0.2;
    pub const DEFAULT_CORRECTION_PERCENT: f64 = 0.4;
    pub const DEFAULT_CORRECTION_SLOP: f64 = 0.05;

    /// Length of one fixed step in seconds.
    pub fn time_step(&self) -> f64 {
        1.0 / self.fps
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::invalid_config(format!(
                "gravity must be finite, got ({}, {})",
                self.gravity.x, self.gravity.y
            )));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(PhysicsError::invalid_config(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if !(self.accumulator_limit.is_finite() && self.accumulator_limit >= self.time_step()) {
            return Err(PhysicsError::invalid_config(format!(
                "accumulator_limit {} must cover at least one step of {}",
                self.accumulator_limit,
                self.time_step()
            )));
        }
        if !(0.2..=0.8).contains(&self.correction_percent) {
            return Err(PhysicsError::invalid_config(format!(
                "correction_percent must be within [0.2, 0.8], got {}",
                self.correction_percent
            )));
        }
        if !(0.01..=0.1).contains(&self.correction_slop) {
            return Err(PhysicsError::invalid_config(format!(
                "correction_slop must be within [0.01, 0.1], got {}",
                self.correction_slop
            )));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Self::DEFAULT_GRAVITY,
            fps: Self::DEFAULT_FPS,
            accumulator_limit: Self::DEFAULT_ACCUMULATOR_LIMIT,
            correction_percent: Self::DEFAULT_CORRECTION_PERCENT,
            correction_slop: Self::DEFAULT_CORRECTION_SLOP,
        }
    }
}
