#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, AABB_NORMALS};
use super::MassData;
use crate::common::ShapeError;
use crate::math::{Mat33, Vec2};

pub const MAX_POLYGON_VERTICES: usize = 64;

/// Edges shorter than this are rejected at construction.
pub const MIN_EDGE_LENGTH: f64 = 1e-4;

/// The point of a non-empty vertex list farthest along `dir`, first one wins on ties.
pub(crate) fn support_point(vertices: &[Vec2], dir: Vec2) -> Vec2 {
    let mut best = f64::NEG_INFINITY;
    let mut best_vertex = vertices[0];
    for v in vertices {
        let projection = v.dot(dir);
        if projection > best {
            best = projection;
            best_vertex = *v;
        }
    }
    best_vertex
}

/// A convex polygon in body space.
///
/// Vertices are counter-clockwise and `normals[i]` is the outward unit normal of the edge
/// `vertices[i] -> vertices[i + 1]`. Both are validated once at construction; collision code
/// relies on them without re-checking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a new polygon from counter-clockwise convex vertices.
    ///
    /// # Panics
    ///
    /// Panics on any input [`Polygon::try_new`] rejects.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        match Self::try_new(vertices) {
            Ok(p) => p,
            Err(e) => panic!("invalid polygon: {e}"),
        }
    }

    /// # Errors
    ///
    /// Fails for fewer than 3 or more than [`MAX_POLYGON_VERTICES`] vertices, for an edge of
    /// length at most [`MIN_EDGE_LENGTH`], and for vertices that are not convex in
    /// counter-clockwise order.
    pub fn try_new(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        let n = vertices.len();
        if n < 3 {
            return Err(ShapeError::TooFewVertices(n));
        }
        if n > MAX_POLYGON_VERTICES {
            return Err(ShapeError::TooManyVertices(n));
        }

        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let edge = vertices[(i + 1) % n] - vertices[i];
            let length = edge.magnitude();
            if !(length > MIN_EDGE_LENGTH) {
                return Err(ShapeError::DegenerateEdge { index: i, length });
            }
            let next = vertices[(i + 2) % n] - vertices[(i + 1) % n];
            if edge.cross(next) < 0.0 {
                return Err(ShapeError::NotConvex { index: (i + 1) % n });
            }
            normals.push(Vec2::new(edge.y, -edge.x) / length);
        }

        let polygon = Polygon { vertices, normals };
        if polygon.signed_area() <= 0.0 {
            return Err(ShapeError::NotConvex { index: 0 });
        }
        Ok(polygon)
    }

    /// A `width` x `height` rectangle centered on the origin.
    ///
    /// # Panics
    ///
    /// Panics if either extent is not finite and positive.
    pub fn new_box(width: f64, height: f64) -> Self {
        match Self::try_new_box(width, height) {
            Ok(p) => p,
            Err(e) => panic!("invalid polygon: {e}"),
        }
    }

    pub fn try_new_box(width: f64, height: f64) -> Result<Self, ShapeError> {
        let bounds = Aabb::try_new_box(width, height)?;
        Ok(Self::from_aabb(&bounds))
    }

    /// The box as a four-sided polygon, corners starting at `min`.
    pub fn from_aabb(bounds: &Aabb) -> Self {
        Polygon {
            vertices: bounds.corners().to_vec(),
            normals: AABB_NORMALS.to_vec(),
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Average of the vertices. Rotation and scaling pivot around this point.
    pub fn center(&self) -> Vec2 {
        let sum = self
            .vertices
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + *v);
        sum / self.vertices.len() as f64
    }

    fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            area += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        area / 2.0
    }

    /// Area via the shoelace formula.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// The vertex farthest along `dir`. Ties go to the lowest index.
    pub fn support(&self, dir: Vec2) -> Vec2 {
        support_point(&self.vertices, dir)
    }

    /// Mass and polar moment about the body-space origin, fanning triangles out from it.
    pub fn mass_data(&self, density: f64) -> MassData {
        const INV3: f64 = 1.0 / 3.0;
        let n = self.vertices.len();
        let mut area = 0.0;
        let mut inertia = 0.0;
        for i in 0..n {
            let p1 = self.vertices[i];
            let p2 = self.vertices[(i + 1) % n];
            let d = p1.cross(p2);
            area += 0.5 * d;

            let intx2 = p1.x * p1.x + p2.x * p1.x + p2.x * p2.x;
            let inty2 = p1.y * p1.y + p2.y * p1.y + p2.y * p2.y;
            inertia += (0.25 * INV3 * d) * (intx2 + inty2);
        }
        MassData {
            mass: density * area,
            inertia: density * inertia,
        }
    }

    /// Moves the vertices so their average sits on the origin and returns how far they moved.
    /// Shift the owning body by the returned amount to keep the shape in place.
    pub fn recenter(&mut self) -> Vec2 {
        let center = self.center();
        for v in &mut self.vertices {
            *v -= center;
        }
        center
    }

    pub fn translate(&mut self, offset: Vec2) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Scales about the center. Normals are unchanged by a uniform scale.
    ///
    /// # Panics
    ///
    /// Panics if `k` is not positive; a zero or negative factor collapses or flips the winding.
    pub fn scale(&mut self, k: f64) {
        assert!(k > 0.0, "polygon scale factor must be positive, got {k}");
        let center = self.center();
        for v in &mut self.vertices {
            *v = v.scale_about(center, k);
        }
    }

    /// Rotates about the center by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        let center = self.center();
        for v in &mut self.vertices {
            *v = v.rotate_about(center, angle);
        }
        for n in &mut self.normals {
            *n = n.rotate(angle);
        }
    }

    /// Applies the linear part of `m` about the center, then its translation.
    ///
    /// # Panics
    ///
    /// Panics if the linear part does not preserve orientation (determinant ≤ 0).
    pub fn transform(&mut self, m: &Mat33) {
        let linear = m.linear();
        assert!(
            linear.determinant() > 0.0,
            "polygon transform must preserve winding"
        );
        let center = self.center();
        let shift = m.translation_part();
        for v in &mut self.vertices {
            *v = center + linear * (*v - center) + shift;
        }
        let n = self.vertices.len();
        for i in 0..n {
            let edge = self.vertices[(i + 1) % n] - self.vertices[i];
            self.normals[i] = Vec2::new(edge.y, -edge.x).normalize();
        }
    }

    /// Bounds in body space.
    pub fn bounds(&self) -> Aabb {
        // Construction guarantees at least three vertices.
        Aabb::from_points(&self.vertices).unwrap_or(Aabb::new(Vec2::ZERO, Vec2::ZERO))
    }
}
