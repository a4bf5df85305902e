use super::mat22::Mat22;
use super::vec2::Vec2;

/// A rigid placement: rotation followed by translation.
///
/// The rotation matrix is cached alongside the angle since every collision query
/// transforms a handful of vertices with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    rotation: f64, // Angle in radians
    matrix: Mat22,
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self {
            position,
            rotation,
            matrix: Mat22::from_angle(rotation),
        }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn matrix(&self) -> Mat22 {
        self.matrix
    }

    /// Applies the transform (rotation then translation) to a point.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.matrix * point + self.position
    }

    /// Applies the inverse transform (inverse translation then inverse rotation) to a point.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        self.matrix.transpose() * (point - self.position)
    }

    /// Rotates a direction into world space.
    pub fn apply_vector(&self, v: Vec2) -> Vec2 {
        self.matrix * v
    }

    /// Rotates a world-space direction into the local frame.
    pub fn apply_inverse_vector(&self, v: Vec2) -> Vec2 {
        self.matrix.transpose() * v
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
