//! Separating-axis test between convex hulls, with reference/incident face clipping.

use smallvec::smallvec;

use super::manifold::{Contact, ContactPoints};
use crate::objects::rigid_body::{RigidBody, WorldVertices};
use crate::shapes::aabb::AABB_NORMALS;
use crate::shapes::polygon::support_point;
use crate::shapes::Shape;

use crate::math::vec2::Vec2;

/// A convex hull in world space. Boxes and polygons both reduce to this.
#[derive(Debug, Clone)]
pub struct Hull {
    pub vertices: WorldVertices,
    /// `normals[i]` is the outward normal of edge `vertices[i] -> vertices[i + 1]`.
    pub normals: WorldVertices,
}

impl Hull {
    /// The body's shape posed in world space, or `None` for circles.
    pub fn of(body: &RigidBody) -> Option<Hull> {
        match &body.shape {
            Shape::Aabb(_) => Some(Hull {
                vertices: body.world_vertices(),
                normals: AABB_NORMALS.iter().copied().collect(),
            }),
            Shape::Polygon(p) => {
                let xf = body.transform();
                Some(Hull {
                    vertices: body.world_vertices(),
                    normals: p.normals().iter().map(|n| xf.apply_vector(*n)).collect(),
                })
            }
            Shape::Circle(_) => None,
        }
    }

    fn len(&self) -> usize {
        self.vertices.len()
    }

    /// The vertex farthest along `dir`, first one wins on ties.
    pub fn support(&self, dir: Vec2) -> Vec2 {
        support_point(&self.vertices, dir)
    }

    fn edge(&self, index: usize) -> (Vec2, Vec2) {
        (self.vertices[index], self.vertices[(index + 1) % self.len()])
    }
}

/// Finds the face of `a` whose plane `b` penetrates least.
///
/// Returns the largest signed separation and its face index; a non-negative
/// separation means `a`'s face is a separating axis.
pub fn find_axis_least_penetration(a: &Hull, b: &Hull) -> (f64, usize) {
    let mut best_distance = f64::NEG_INFINITY;
    let mut best_index = 0;

    for (i, n) in a.normals.iter().enumerate() {
        let s = b.support(-*n);
        let d = n.dot(s - a.vertices[i]);
        if d > best_distance {
            best_distance = d;
            best_index = i;
        }
    }

    (best_distance, best_index)
}

/// The edge of `incident` whose normal opposes `reference_normal` the most.
fn find_incident_face(reference_normal: Vec2, incident: &Hull) -> [Vec2; 2] {
    let mut min_dot = f64::INFINITY;
    let mut face = 0;
    for (i, n) in incident.normals.iter().enumerate() {
        let dot = reference_normal.dot(*n);
        if dot < min_dot {
            min_dot = dot;
            face = i;
        }
    }
    let (v1, v2) = incident.edge(face);
    [v1, v2]
}

/// Clips the segment `face` against the half-plane `n·p <= c`.
///
/// Returns how many points survive; `face` is only meaningful when that is 2.
fn clip(n: Vec2, c: f64, face: &mut [Vec2; 2]) -> usize {
    let mut out = *face;
    let mut kept = 0;

    let d1 = n.dot(face[0]) - c;
    let d2 = n.dot(face[1]) - c;

    if d1 <= 0.0 {
        out[kept] = face[0];
        kept += 1;
    }
    if d2 <= 0.0 {
        out[kept] = face[1];
        kept += 1;
    }
    // Endpoints on opposite sides: only one was kept, add the crossing point.
    if d1 * d2 < 0.0 {
        let alpha = d1 / (d1 - d2);
        out[kept] = face[0] + (face[1] - face[0]) * alpha;
        kept += 1;
    }

    *face = out;
    kept
}

/// Collides two convex hulls. The normal of the result points from `a` to `b`.
pub fn hull_hull(a: &Hull, b: &Hull) -> Option<Contact> {
    let (penetration_a, face_a) = find_axis_least_penetration(a, b);
    if penetration_a >= 0.0 {
        return None;
    }
    let (penetration_b, face_b) = find_axis_least_penetration(b, a);
    if penetration_b >= 0.0 {
        return None;
    }

    // Prefer the shallower axis as reference.
    let (reference, incident, reference_index, flip) = if penetration_a >= penetration_b {
        (a, b, face_a, false)
    } else {
        (b, a, face_b, true)
    };

    let mut incident_face = find_incident_face(reference.normals[reference_index], incident);

    let (v1, v2) = reference.edge(reference_index);
    let side_normal = (v2 - v1).normalize();
    let ref_face_normal = Vec2::new(side_normal.y, -side_normal.x);

    let ref_c = ref_face_normal.dot(v1);
    let neg_side = -side_normal.dot(v1);
    let pos_side = side_normal.dot(v2);

    if clip(-side_normal, neg_side, &mut incident_face) < 2 {
        return None;
    }
    if clip(side_normal, pos_side, &mut incident_face) < 2 {
        return None;
    }

    let mut points: ContactPoints = smallvec![];
    let mut depth = 0.0;
    for p in incident_face {
        let separation = ref_face_normal.dot(p) - ref_c;
        if separation <= 0.0 {
            points.push(p);
            depth -= separation;
        }
    }
    if points.is_empty() {
        return None;
    }

    let normal = if flip { -ref_face_normal } else { ref_face_normal };
    let penetration = depth / points.len() as f64;
    Some(Contact::new(normal, penetration, points))
}
