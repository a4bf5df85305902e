//! Homogeneous 3x3 matrices for 2D affine transforms.

use std::ops::Mul;

use super::mat22::Mat22;
use super::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat33 {
    /// Row-major storage, `m[row][col]`.
    pub m: [[f64; 3]; 3],
}

impl Mat33 {
    pub const IDENTITY: Mat33 = Mat33 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const ZERO: Mat33 = Mat33 { m: [[0.0; 3]; 3] };

    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    pub fn translation(offset: Vec2) -> Self {
        Self::from_rows([[1.0, 0.0, offset.x], [0.0, 1.0, offset.y], [0.0, 0.0, 1.0]])
    }

    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation by `angle` radians around `pivot` (translate, rotate, translate back).
    pub fn rotation_about(pivot: Vec2, angle: f64) -> Self {
        Self::translation(pivot) * Self::rotation(angle) * Self::translation(-pivot)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::from_rows([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// The upper-left 2x2 block (rotation/scale/shear without translation).
    pub fn linear(&self) -> Mat22 {
        Mat22::new(self.m[0][0], self.m[0][1], self.m[1][0], self.m[1][1])
    }

    pub fn translation_part(&self) -> Vec2 {
        Vec2::new(self.m[0][2], self.m[1][2])
    }

    /// Transforms a point (translation applied).
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2],
        )
    }

    /// Transforms a direction (translation ignored).
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        self.linear() * v
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = self.m[j][i];
            }
        }
        out
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Returns `None` for singular matrices.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        let m = &self.m;
        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[2][1] * m[1][2]) * inv,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                (m[1][0] * m[0][2] - m[0][0] * m[1][2]) * inv,
            ],
            [
                (m[1][0] * m[2][1] - m[2][0] * m[1][1]) * inv,
                (m[2][0] * m[0][1] - m[0][0] * m[2][1]) * inv,
                (m[0][0] * m[1][1] - m[1][0] * m[0][1]) * inv,
            ],
        ]))
    }
}

impl Default for Mat33 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat33 {
    type Output = Mat33;

    fn mul(self, rhs: Mat33) -> Mat33 {
        let mut out = Mat33::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    out.m[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        out
    }
}

impl Mul<Vec2> for Mat33 {
    type Output = Vec2;

    fn mul(self, p: Vec2) -> Vec2 {
        self.transform_point(p)
    }
}
