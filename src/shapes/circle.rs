#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::common::ShapeError;
use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub radius: f64,
    /// Center relative to the owning body's position, in body space.
    pub offset: Vec2,
}

impl Circle {
    /// # Panics
    ///
    /// Panics if the radius is negative or not finite.
    pub fn new(radius: f64) -> Self {
        match Self::try_new(radius) {
            Ok(c) => c,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(radius: f64) -> Result<Self, ShapeError> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Ok(Self {
            radius,
            offset: Vec2::ZERO,
        })
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Bounds in body space.
    pub fn bounds(&self) -> Aabb {
        let r = Vec2::new(self.radius, self.radius);
        Aabb::new(self.offset - r, self.offset + r)
    }
}
