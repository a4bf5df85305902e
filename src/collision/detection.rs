//! Narrow-phase dispatch and the circle/box specific tests.

use smallvec::smallvec;

use super::manifold::{Contact, Manifold};
use super::sat::{hull_hull, Hull};
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::{Aabb, Circle, Shape};

/// Separation below which a circle center counts as inside a hull.
const INSIDE_EPSILON: f64 = 1e-4;

/// Collides two posed bodies. The returned normal points from `a` to `b`.
///
/// Circle pairs go to one canonical test and are flipped when the operands arrive in the
/// other order. Box and polygon pairs break ties towards their first operand, so they are
/// always tested with the body whose bounds center is lexicographically smaller first.
/// `collide(a, b)` and `collide(b, a)` therefore give exactly negated normals, unless both
/// bounds share a center.
pub fn collide(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    match (&a.shape, &b.shape) {
        (Shape::Circle(ca), Shape::Circle(cb)) => circle_circle(
            circle_center(a, ca),
            ca.radius,
            circle_center(b, cb),
            cb.radius,
        ),
        (Shape::Circle(ca), _) => circle_hull(circle_center(a, ca), ca.radius, &Hull::of(b)?),
        (_, Shape::Circle(cb)) => {
            circle_hull(circle_center(b, cb), cb.radius, &Hull::of(a)?).map(Contact::flipped)
        }
        _ if operands_reversed(a, b) => collide_hulls(b, a).map(Contact::flipped),
        _ => collide_hulls(a, b),
    }
}

/// Whether `b` sorts before `a` by world bounds center, x first.
fn operands_reversed(a: &RigidBody, b: &RigidBody) -> bool {
    let ca = a.calculate_aabb().center();
    let cb = b.calculate_aabb().center();
    (cb.x, cb.y) < (ca.x, ca.y)
}

fn collide_hulls(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    match (&a.shape, &b.shape) {
        (Shape::Aabb(box_a), Shape::Aabb(box_b)) => aabb_aabb(
            &box_a.translated(a.position),
            &box_b.translated(b.position),
        ),
        _ => hull_hull(&Hull::of(a)?, &Hull::of(b)?),
    }
}

/// Runs [`collide`] on `bodies[a]` and `bodies[b]` and attaches their combined material.
pub fn collide_pair(bodies: &[RigidBody], a: usize, b: usize) -> Option<Manifold> {
    let (body_a, body_b) = (&bodies[a], &bodies[b]);
    collide(body_a, body_b)
        .map(|contact| Manifold::new(a, b, contact, &body_a.material, &body_b.material))
}

/// World-space center of a circle attached to `body`.
pub fn circle_center(body: &RigidBody, circle: &Circle) -> Vec2 {
    body.position + circle.offset.rotate(body.rotation)
}

/// Circle against circle. Touching circles report a zero-depth contact.
pub fn circle_circle(center_a: Vec2, radius_a: f64, center_b: Vec2, radius_b: f64) -> Option<Contact> {
    let n = center_b - center_a;
    let r = radius_a + radius_b;
    let dist_sq = n.magnitude_squared();

    if dist_sq > r * r {
        return None;
    }

    let distance = dist_sq.sqrt();
    if distance != 0.0 {
        let normal = n / distance;
        Some(Contact::new(
            normal,
            r - distance,
            smallvec![center_a + normal * radius_a],
        ))
    } else {
        // Concentric circles: any direction separates them equally well.
        Some(Contact::new(Vec2::X, radius_a, smallvec![center_a]))
    }
}

/// Circle (as shape A) against a convex hull (as shape B), classifying the center
/// against the face of least penetration and its two vertex regions.
pub fn circle_hull(center: Vec2, radius: f64, hull: &Hull) -> Option<Contact> {
    let n = hull.vertices.len();

    let mut separation = f64::NEG_INFINITY;
    let mut face = 0;
    for i in 0..n {
        let s = hull.normals[i].dot(center - hull.vertices[i]);
        if s > radius {
            return None;
        }
        if s > separation {
            separation = s;
            face = i;
        }
    }

    let v1 = hull.vertices[face];
    let v2 = hull.vertices[(face + 1) % n];
    let face_normal = hull.normals[face];

    if separation < INSIDE_EPSILON {
        // Center inside the hull: push out through the nearest face.
        let normal = -face_normal;
        return Some(Contact::new(
            normal,
            radius,
            smallvec![center + normal * radius],
        ));
    }

    let penetration = radius - separation;
    let dot1 = (center - v1).dot(v2 - v1);
    let dot2 = (center - v2).dot(v1 - v2);

    if dot1 <= 0.0 {
        vertex_contact(center, radius, v1, penetration)
    } else if dot2 <= 0.0 {
        vertex_contact(center, radius, v2, penetration)
    } else {
        if (center - v1).dot(face_normal) > radius {
            return None;
        }
        let normal = -face_normal;
        Some(Contact::new(
            normal,
            penetration,
            smallvec![center + normal * radius],
        ))
    }
}

fn vertex_contact(center: Vec2, radius: f64, vertex: Vec2, penetration: f64) -> Option<Contact> {
    if center.distance_squared(vertex) > radius * radius {
        return None;
    }
    let normal = (vertex - center).normalize();
    Some(Contact::new(normal, penetration, smallvec![vertex]))
}

/// Direct overlap test for two world-space boxes, resolved along the axis of least overlap.
/// Touching boxes report a zero-depth contact.
pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> Option<Contact> {
    if !a.overlaps(b) {
        return None;
    }

    let n = b.center() - a.center();
    let half_a = a.half_extents();
    let half_b = b.half_extents();
    let x_overlap = half_a.x + half_b.x - n.x.abs();
    let y_overlap = half_a.y + half_b.y - n.y.abs();

    let contact = if x_overlap < y_overlap {
        let normal = if n.x < 0.0 { -Vec2::X } else { Vec2::X };
        let x = if n.x < 0.0 { a.min.x } else { a.max.x };
        Contact::new(
            normal,
            x_overlap,
            smallvec![
                Vec2::new(x, a.min.y.max(b.min.y)),
                Vec2::new(x, a.max.y.min(b.max.y)),
            ],
        )
    } else {
        let normal = if n.y < 0.0 { -Vec2::Y } else { Vec2::Y };
        let y = if n.y < 0.0 { a.min.y } else { a.max.y };
        Contact::new(
            normal,
            y_overlap,
            smallvec![
                Vec2::new(a.min.x.max(b.min.x), y),
                Vec2::new(a.max.x.min(b.max.x), y),
            ],
        )
    };
    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Material;
    use crate::shapes::Polygon;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    fn body(shape: impl Into<Shape>, x: f64, y: f64) -> RigidBody {
        RigidBody::new(shape, Material::default()).with_position(Vec2::new(x, y))
    }

    #[test]
    fn test_circle_circle_exact() {
        let a = body(Circle::new(1.0), 0.0, 0.0);
        let b = body(Circle::new(1.0), 1.5, 0.0);
        let contact = collide(&a, &b).unwrap();
        assert_abs_diff_eq!(contact.penetration, 0.5, epsilon = EPSILON);
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert_eq!(contact.points.as_slice(), &[Vec2::new(1.0, 0.0)]);
    }

    #[test]
    fn test_circle_circle_no_collision() {
        let a = body(Circle::new(1.0), 0.0, 0.0);
        let b = body(Circle::new(1.0), 3.0, 0.0);
        assert!(collide(&a, &b).is_none());
    }

    #[test]
    fn test_circle_circle_concentric() {
        let a = body(Circle::new(2.0), 1.0, 1.0);
        let b = body(Circle::new(0.5), 1.0, 1.0);
        let contact = collide(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert_eq!(contact.penetration, 2.0);
        assert_eq!(contact.points[0], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_circle_offset_follows_rotation() {
        let a = body(Circle::new(0.5).with_offset(Vec2::new(1.0, 0.0)), 0.0, 0.0)
            .with_rotation(std::f64::consts::PI / 2.0);
        // Offset swings to (0, 1)
        let b = body(Circle::new(0.5), 0.0, 1.8);
        let contact = collide(&a, &b).unwrap();
        assert_abs_diff_eq!(contact.penetration, 0.2, epsilon = EPSILON);
        assert_abs_diff_eq!(contact.normal.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_circle_polygon_face_region() {
        let circle = body(Circle::new(0.5), 0.0, -0.9);
        let square = body(Polygon::new_box(1.0, 1.0), 0.0, 0.0);
        let contact = collide(&circle, &square).unwrap();
        // Circle sits above the square's y = -0.5 face
        assert_abs_diff_eq!(contact.penetration, 0.1, epsilon = EPSILON);
        assert_abs_diff_eq!(contact.normal.x, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(contact.normal.y, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(contact.points[0].y, -0.4, epsilon = EPSILON);
    }

    #[test]
    fn test_circle_polygon_vertex_region() {
        let square = body(Polygon::new_box(2.0, 2.0), 0.0, 0.0);
        let circle = body(Circle::new(1.0), 1.5, 1.5);
        let contact = collide(&circle, &square).unwrap();
        let expected_n = Vec2::new(-1.0, -1.0).normalize();
        assert_abs_diff_eq!(contact.normal.x, expected_n.x, epsilon = EPSILON);
        assert_abs_diff_eq!(contact.normal.y, expected_n.y, epsilon = EPSILON);
        assert_eq!(contact.points[0], Vec2::new(1.0, 1.0));
        // Reported depth is measured against the face plane
        assert_abs_diff_eq!(contact.penetration, 0.5, epsilon = EPSILON);

        // Same corner, but out of reach diagonally
        let far = body(Circle::new(1.0), 1.8, 1.8);
        assert!(collide(&far, &square).is_none());
    }

    #[test]
    fn test_circle_center_inside_polygon() {
        let square = body(Polygon::new_box(4.0, 4.0), 0.0, 0.0);
        let circle = body(Circle::new(0.5), 1.5, 0.0);
        let contact = collide(&circle, &square).unwrap();
        // Deep case: reversed normal of the nearest face (x = 2)
        assert_abs_diff_eq!(contact.normal.x, -1.0, epsilon = EPSILON);
        assert_eq!(contact.penetration, 0.5);
    }

    #[test]
    fn test_circle_against_aabb_uses_box_hull() {
        let ground = body(Aabb::new_box(10.0, 1.0), 0.0, 1.0);
        let ball = body(Circle::new(0.5), 2.0, 0.1);
        let contact = collide(&ball, &ground).unwrap();
        assert_abs_diff_eq!(contact.penetration, 0.1, epsilon = EPSILON);
        assert_abs_diff_eq!(contact.normal.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_aabb_aabb_picks_shallow_axis() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Aabb::new(Vec2::new(1.5, 0.5), Vec2::new(3.5, 1.5));
        let contact = aabb_aabb(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert_abs_diff_eq!(contact.penetration, 0.5, epsilon = EPSILON);
        assert_eq!(
            contact.points.as_slice(),
            &[Vec2::new(2.0, 0.5), Vec2::new(2.0, 1.5)]
        );

        let below = Aabb::new(Vec2::new(0.5, -1.0), Vec2::new(1.0, 0.25));
        let contact = aabb_aabb(&a, &below).unwrap();
        assert_eq!(contact.normal, -Vec2::Y);
        assert_abs_diff_eq!(contact.penetration, 0.25, epsilon = EPSILON);
        assert_eq!(contact.points[0], Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_aabb_aabb_touching_and_apart() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let touching = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let contact = aabb_aabb(&a, &touching).unwrap();
        assert_eq!(contact.penetration, 0.0);

        let apart = Aabb::new(Vec2::new(1.1, 0.0), Vec2::new(2.0, 1.0));
        assert!(aabb_aabb(&a, &apart).is_none());
    }

    #[test]
    fn test_separating_axis_unit_squares() {
        let a = body(Polygon::new_box(1.0, 1.0), 0.0, 0.0);
        let b = body(Polygon::new_box(1.0, 1.0), 0.5, 0.0);
        let contact = collide(&a, &b).unwrap();
        assert_eq!(contact.points.len(), 2);
        assert_abs_diff_eq!(contact.penetration, 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(contact.normal.x, 1.0, epsilon = EPSILON);

        let far = body(Polygon::new_box(1.0, 1.0), 2.0, 2.0);
        assert!(collide(&a, &far).is_none());
    }

    #[test]
    fn test_symmetry_across_all_kind_pairs() {
        let shapes: Vec<Shape> = vec![
            Aabb::new_box(1.0, 1.0).into(),
            Circle::new(0.5).into(),
            Polygon::new_box(1.0, 1.0).into(),
            Polygon::new(vec![Vec2::new(-0.6, -0.4), Vec2::new(0.6, -0.4), Vec2::new(0.0, 0.6)]).into(),
        ];
        let offsets = [Vec2::new(0.7, 0.1), Vec2::new(-0.2, 0.8), Vec2::new(0.3, -0.6)];

        for shape_a in &shapes {
            for shape_b in &shapes {
                for offset in offsets {
                    let a = body(shape_a.clone(), 0.0, 0.0);
                    let b = body(shape_b.clone(), offset.x, offset.y);
                    let ab = collide(&a, &b);
                    let ba = collide(&b, &a);
                    match (ab, ba) {
                        (None, None) => {}
                        (Some(ab), Some(ba)) => {
                            let label = format!("{:?} vs {:?} at {offset:?}", shape_a.kind(), shape_b.kind());
                            assert_eq!(ab.points.len(), ba.points.len(), "{label}");
                            assert_abs_diff_eq!(ab.penetration, ba.penetration, epsilon = EPSILON);
                            assert_abs_diff_eq!(ab.normal.x, -ba.normal.x, epsilon = EPSILON);
                            assert_abs_diff_eq!(ab.normal.y, -ba.normal.y, epsilon = EPSILON);
                        }
                        (ab, ba) => panic!("asymmetric detection: {ab:?} vs {ba:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_symmetry_with_shared_center_coordinate() {
        let shapes: Vec<Shape> = vec![
            Aabb::new_box(1.0, 10.0).into(),
            Polygon::new_box(1.0, 10.0).into(),
            Aabb::new_box(10.0, 1.0).into(),
            Polygon::new_box(1.0, 1.0).into(),
            Circle::new(0.5).into(),
        ];
        // One zero component each: tied overlaps on the other axis
        let offsets = [
            Vec2::new(0.0, 0.1),
            Vec2::new(0.1, 0.0),
            Vec2::new(0.0, -0.3),
            Vec2::new(-0.4, 0.0),
        ];

        for shape_a in &shapes {
            for shape_b in &shapes {
                for offset in offsets {
                    let a = body(shape_a.clone(), 0.0, 0.0);
                    let b = body(shape_b.clone(), offset.x, offset.y);
                    let label = format!("{:?} vs {:?} at {offset:?}", shape_a.kind(), shape_b.kind());
                    let ab = collide(&a, &b).unwrap_or_else(|| panic!("{label}: no contact"));
                    let ba = collide(&b, &a).unwrap_or_else(|| panic!("{label}: no reverse contact"));
                    assert_eq!(ab.normal, -ba.normal, "{label}");
                    assert_eq!(ab.penetration, ba.penetration, "{label}");
                    assert_eq!(ab.points.len(), ba.points.len(), "{label}");
                }
            }
        }
    }

    #[test]
    fn test_tall_boxes_sharing_x_resolve_in_opposite_directions() {
        for shape in [Shape::from(Aabb::new_box(1.0, 10.0)), Polygon::new_box(1.0, 10.0).into()] {
            let a = body(shape.clone(), 0.0, 0.0);
            let b = body(shape, 0.0, 0.1);
            let ab = collide(&a, &b).unwrap();
            let ba = collide(&b, &a).unwrap();
            assert_abs_diff_eq!(ab.normal.x.abs(), 1.0, epsilon = EPSILON);
            assert_eq!(ab.normal, -ba.normal);
        }
    }

    #[test]
    fn test_collide_pair_combines_materials() {
        let bodies = vec![
            RigidBody::new(Circle::new(1.0), Material::new(1.0, 0.9).with_friction(0.3, 0.0)),
            RigidBody::new(Circle::new(1.0), Material::new(1.0, 0.1).with_friction(0.4, 0.0))
                .with_position(Vec2::new(1.0, 0.0)),
        ];
        let m = collide_pair(&bodies, 0, 1).unwrap();
        assert_eq!((m.body_a, m.body_b), (0, 1));
        assert_eq!(m.restitution, 0.1);
        assert_abs_diff_eq!(m.static_friction, 0.5, epsilon = EPSILON);
        assert_eq!(m.dynamic_friction, 0.0);
    }
}
