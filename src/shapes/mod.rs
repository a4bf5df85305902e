pub mod aabb;
pub mod circle;
pub mod polygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Re-export the specific shape types
pub use aabb::Aabb;
pub use circle::Circle;
pub use polygon::Polygon;

use crate::math::{Mat33, Vec2};

/// Mass and rotational inertia derived from a shape and a density.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MassData {
    pub mass: f64,
    pub inertia: f64,
}

/// Discriminant of [`Shape`], for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Aabb,
    Circle,
    Polygon,
}

/// Enum representing the geometric shape of a rigid body, in body space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// Stays axis-aligned in world space whatever the body's orientation.
    Aabb(Aabb),
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Aabb(_) => ShapeKind::Aabb,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Geometric center in body space.
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Aabb(b) => b.center(),
            Shape::Circle(c) => c.offset,
            Shape::Polygon(p) => p.center(),
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Shape::Aabb(b) => b.translate(offset),
            Shape::Circle(c) => c.offset += offset,
            Shape::Polygon(p) => p.translate(offset),
        }
    }

    /// Scales about the shape's center.
    pub fn scale(&mut self, k: f64) {
        match self {
            Shape::Aabb(b) => b.scale(k),
            Shape::Circle(c) => c.radius *= k.abs(),
            Shape::Polygon(p) => p.scale(k),
        }
    }

    /// Rotates a polygon about its center. Circles and boxes are unaffected.
    pub fn rotate(&mut self, angle: f64) {
        if let Shape::Polygon(p) = self {
            p.rotate(angle);
        }
    }

    /// Applies an affine transform about the shape's center.
    ///
    /// Boxes are re-bounded over their transformed corners. Circles move by the translation
    /// and scale their radius by the largest axis stretch.
    pub fn transform(&mut self, m: &Mat33) {
        match self {
            Shape::Aabb(b) => {
                let center = b.center();
                let linear = m.linear();
                let shift = m.translation_part();
                let corners = b.corners().map(|p| center + linear * (p - center) + shift);
                if let Some(bounds) = Aabb::from_points(&corners) {
                    *b = bounds;
                }
            }
            Shape::Circle(c) => {
                let linear = m.linear();
                let stretch = linear.column_x().magnitude().max(linear.column_y().magnitude());
                c.offset += m.translation_part();
                c.radius *= stretch;
            }
            Shape::Polygon(p) => p.transform(m),
        }
    }

    /// Bounds in body space, before the body's pose is applied.
    pub fn compute_aabb(&self) -> Aabb {
        match self {
            Shape::Aabb(b) => *b,
            Shape::Circle(c) => c.bounds(),
            Shape::Polygon(p) => p.bounds(),
        }
    }

    /// Mass properties for a uniform `density`.
    ///
    /// Boxes never rotate, so they get translational mass only.
    pub fn mass_data(&self, density: f64) -> MassData {
        match self {
            Shape::Aabb(b) => MassData {
                mass: b.area() * density,
                inertia: 0.0,
            },
            Shape::Circle(c) => {
                let mass = c.area() * density;
                MassData {
                    mass,
                    inertia: mass * c.radius * c.radius,
                }
            }
            Shape::Polygon(p) => p.mass_data(density),
        }
    }
}

impl From<Aabb> for Shape {
    fn from(b: Aabb) -> Self {
        Shape::Aabb(b)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}
