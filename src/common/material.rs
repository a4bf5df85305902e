//! Defines physical material properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the physical properties of a rigid body affecting mass and collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Mass per unit area. Range [0, infinity). Zero density yields a static body.
    pub density: f64,
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coefficient of static friction. Range [0, infinity).
    pub static_friction: f64,
    /// Coefficient of dynamic (sliding) friction. Range [0, infinity).
    pub dynamic_friction: f64,
}

impl Material {
    pub const ROCK: Material = Material::preset(0.6, 0.1);
    pub const WOOD: Material = Material::preset(0.3, 0.2);
    pub const METAL: Material = Material::preset(1.2, 0.05);
    pub const BOUNCY_BALL: Material = Material::preset(0.3, 0.8);
    pub const SUPER_BALL: Material = Material::preset(0.3, 0.95);
    pub const PILLOW: Material = Material::preset(0.1, 0.2);
    pub const STATIC: Material = Material::preset(0.0, 0.4);

    const fn preset(density: f64, restitution: f64) -> Self {
        Material {
            density,
            restitution,
            static_friction: 0.0,
            dynamic_friction: 0.0,
        }
    }

    /// Creates a frictionless material with the given density and restitution.
    pub fn new(density: f64, restitution: f64) -> Self {
        Material {
            // Clamp values to reasonable ranges
            density: density.max(0.0),
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: 0.0,
            dynamic_friction: 0.0,
        }
    }

    /// Returns a copy with the given friction coefficients.
    pub fn with_friction(self, static_friction: f64, dynamic_friction: f64) -> Self {
        Material {
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
            ..self
        }
    }
}

impl Default for Material {
    /// Unit density, mild bounce, moderate friction.
    fn default() -> Self {
        Material {
            density: 1.0,
            restitution: 0.2,
            static_friction: 0.5,
            dynamic_friction: 0.3,
        }
    }
}
