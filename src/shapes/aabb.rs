//! Axis-aligned boxes, used both as a collision shape and as plain bounds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::ShapeError;
use crate::math::vec2::Vec2;

/// Outward normals of the four box faces, matching the order of [`Aabb::corners`].
pub const AABB_NORMALS: [Vec2; 4] = [
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
];

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Creates a new AABB. The corners may be given in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A `width` x `height` box centered on the origin.
    ///
    /// # Panics
    ///
    /// Panics if either extent is not finite and positive.
    pub fn new_box(width: f64, height: f64) -> Self {
        match Self::try_new_box(width, height) {
            Ok(b) => b,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new_box(width: f64, height: f64) -> Result<Self, ShapeError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ShapeError::InvalidExtents { width, height });
        }
        let half = Vec2::new(width, height) * 0.5;
        Ok(Aabb::new(-half, half))
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Aabb {
            min: *first,
            max: *first,
        };
        for p in rest {
            bounds.min = bounds.min.min(*p);
            bounds.max = bounds.max.max(*p);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Full width and height.
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec2 {
        self.extent() * 0.5
    }

    pub fn area(&self) -> f64 {
        let e = self.extent();
        e.x * e.y
    }

    /// Counter-clockwise corners starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Checks if this AABB overlaps with another AABB. Boxes that only touch count as overlapping.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let x_overlap = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y_overlap = self.max.y >= other.min.y && self.min.y <= other.max.y;
        x_overlap && y_overlap
    }

    /// Merges another AABB into this one, expanding this AABB to contain both.
    pub fn merge(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// The smallest box containing both.
    pub fn combined(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        out.merge(other);
        out
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.min += offset;
        self.max += offset;
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Aabb {
        let mut out = *self;
        out.translate(offset);
        out
    }

    /// Scales the box about its center.
    pub fn scale(&mut self, k: f64) {
        let c = self.center();
        *self = Aabb::new(self.min.scale_about(c, k), self.max.scale_about(c, k));
    }
}
