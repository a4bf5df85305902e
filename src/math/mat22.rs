use std::ops::Mul;

use super::vec2::Vec2;

/// A 2x2 matrix stored row-major. Mostly used as a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat22 {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
}

impl Mat22 {
    pub const IDENTITY: Mat22 = Mat22 {
        m00: 1.0,
        m01: 0.0,
        m10: 0.0,
        m11: 1.0,
    };

    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// Builds a counter-clockwise rotation by `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, -s, s, c)
    }

    /// Builds a matrix from its two columns.
    pub fn from_columns(x: Vec2, y: Vec2) -> Self {
        Self::new(x.x, y.x, x.y, y.y)
    }

    pub fn column_x(&self) -> Vec2 {
        Vec2::new(self.m00, self.m10)
    }

    pub fn column_y(&self) -> Vec2 {
        Vec2::new(self.m01, self.m11)
    }

    /// For a pure rotation the transpose is its inverse.
    pub fn transpose(&self) -> Self {
        Self::new(self.m00, self.m10, self.m01, self.m11)
    }

    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }
}

impl Default for Mat22 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec2> for Mat22 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m00 * v.x + self.m01 * v.y,
            self.m10 * v.x + self.m11 * v.y,
        )
    }
}

impl Mul for Mat22 {
    type Output = Mat22;

    fn mul(self, rhs: Mat22) -> Mat22 {
        Mat22::new(
            self.m00 * rhs.m00 + self.m01 * rhs.m10,
            self.m00 * rhs.m01 + self.m01 * rhs.m11,
            self.m10 * rhs.m00 + self.m11 * rhs.m10,
            self.m10 * rhs.m01 + self.m11 * rhs.m11,
        )
    }
}
