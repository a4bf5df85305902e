use smallvec::SmallVec;

use crate::common::Material;
use crate::integration::normalize_angle;
use crate::math::{Transform, Vec2};
use crate::shapes::{Aabb, Shape};

/// World-space vertex buffer; most hulls are boxes and triangles.
pub type WorldVertices = SmallVec<[Vec2; 8]>;

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Geometry, in body space
    pub shape: Shape,
    pub material: Material,

    // Primary state
    pub position: Vec2, // World position of the body-space origin
    pub rotation: f64,  // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Accumulators for forces/torques applied during a time step
    pub force: Vec2,
    pub torque: f64,

    // Derived from shape and density by `compute_mass`
    pub mass: f64,
    pub inv_mass: f64, // 0.0 for static
    pub inertia: f64,
    pub inv_inertia: f64, // 0.0 for static or non-rotating
}

impl RigidBody {
    /// Creates a body at the origin and derives its mass from the shape and `material.density`.
    /// A density of zero gives a static body.
    pub fn new(shape: impl Into<Shape>, material: Material) -> Self {
        let mut body = Self {
            shape: shape.into(),
            material,
            position: Vec2::ZERO,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_inertia: 0.0,
        };
        body.compute_mass();
        body
    }

    /// Creates an immovable body at `position`.
    pub fn new_static(shape: impl Into<Shape>, position: Vec2) -> Self {
        let mut body = Self::new(shape, Material::STATIC).with_position(position);
        body.set_static();
        body
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, linear: Vec2, angular: f64) -> Self {
        self.linear_velocity = linear;
        self.angular_velocity = angular;
        self
    }

    /// Recomputes mass and inertia from the current shape and density.
    /// Not called automatically when either changes.
    pub fn compute_mass(&mut self) {
        let data = self.shape.mass_data(self.material.density);
        self.mass = data.mass;
        self.inv_mass = if data.mass != 0.0 { 1.0 / data.mass } else { 0.0 };
        self.inertia = data.inertia;
        self.inv_inertia = if data.inertia != 0.0 {
            1.0 / data.inertia
        } else {
            0.0
        };
    }

    /// Makes the body immovable by zeroing all mass data.
    pub fn set_static(&mut self) {
        self.mass = 0.0;
        self.inv_mass = 0.0;
        self.inertia = 0.0;
        self.inv_inertia = 0.0;
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// Calculates the world-space Axis-Aligned Bounding Box (AABB) for this body.
    pub fn calculate_aabb(&self) -> Aabb {
        match &self.shape {
            Shape::Aabb(b) => b.translated(self.position),
            Shape::Circle(circle) => {
                let center = self.transform().apply(circle.offset);
                let radius_vec = Vec2::new(circle.radius, circle.radius);
                Aabb::new(center - radius_vec, center + radius_vec)
            }
            Shape::Polygon(_) => Aabb::from_points(&self.world_vertices())
                .unwrap_or(Aabb::new(self.position, self.position)),
        }
    }

    /// Hull vertices in world space. Empty for circles.
    pub fn world_vertices(&self) -> WorldVertices {
        match &self.shape {
            Shape::Aabb(b) => b.corners().iter().map(|c| *c + self.position).collect(),
            Shape::Circle(_) => WorldVertices::new(),
            Shape::Polygon(p) => {
                let xf = self.transform();
                p.vertices().iter().map(|v| xf.apply(*v)).collect()
            }
        }
    }

    /// Applies a force at the body origin.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies a force at a specific point (in world coordinates).
    /// This generates both linear force and torque.
    pub fn apply_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.force += force;
        let radius_vector = point_world - self.position;
        self.torque += radius_vector.cross(force);
    }

    /// Applies an instantaneous impulse at lever arm `contact_vector` from the body origin.
    pub fn apply_impulse(&mut self, impulse: Vec2, contact_vector: Vec2) {
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += self.inv_inertia * contact_vector.cross(impulse);
    }

    /// Velocity of the body material at lever arm `r`, including spin.
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.linear_velocity + Vec2::scalar_cross(self.angular_velocity, r)
    }

    /// Wraps rotation and angular velocity back inside (-2π, 2π).
    pub fn normalize_angles(&mut self) {
        self.rotation = normalize_angle(self.rotation);
        self.angular_velocity = normalize_angle(self.angular_velocity);
    }

    /// Should be called once forces have been integrated each step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    fn unit_circle() -> RigidBody {
        RigidBody::new(Circle::new(1.0), Material::new(1.0, 0.5))
    }

    #[test]
    fn test_rigidbody_new_circle() {
        let radius = 2.0;
        let rb = RigidBody::new(Circle::new(radius), Material::new(0.5, 0.2));
        let expected_mass = PI * radius * radius * 0.5;
        let expected_inertia = expected_mass * radius * radius;

        assert!((rb.mass - expected_mass).abs() < EPSILON);
        assert!((rb.inv_mass - (1.0 / expected_mass)).abs() < EPSILON);
        assert!((rb.inertia - expected_inertia).abs() < EPSILON);
        assert!((rb.inv_inertia - (1.0 / expected_inertia)).abs() < EPSILON);
        assert_eq!(rb.position, Vec2::ZERO);
        assert_eq!(rb.rotation, 0.0);
        assert_eq!(rb.linear_velocity, Vec2::ZERO);
        assert_eq!(rb.force, Vec2::ZERO);
        assert!(!rb.is_static());
    }

    #[test]
    fn test_rigidbody_new_polygon() {
        let rb = RigidBody::new(Polygon::new_box(1.0, 1.0), Material::new(2.0, 0.0));
        let expected_mass = 2.0;
        let expected_inertia = expected_mass * (1.0 + 1.0) / 12.0; // 1/3
        assert!((rb.mass - expected_mass).abs() < EPSILON);
        assert!((rb.inertia - expected_inertia).abs() < EPSILON);
        assert!((rb.inv_inertia - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rigidbody_zero_density_is_static() {
        let rb = RigidBody::new(Circle::new(1.0), Material::STATIC);
        assert_eq!(rb.mass, 0.0);
        assert_eq!(rb.inv_mass, 0.0);
        assert_eq!(rb.inv_inertia, 0.0);
        assert!(rb.is_static());
    }

    #[test]
    fn test_set_static_and_recompute() {
        let mut rb = unit_circle();
        rb.set_static();
        assert!(rb.is_static());
        assert_eq!(rb.inv_inertia, 0.0);

        rb.compute_mass();
        assert!(!rb.is_static());
        assert!((rb.mass - PI).abs() < EPSILON);
    }

    #[test]
    fn test_new_static_ignores_density() {
        let rb = RigidBody::new_static(Polygon::new_box(10.0, 1.0), Vec2::new(0.0, 5.0));
        assert!(rb.is_static());
        assert_eq!(rb.position, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_apply_force_at_point() {
        let mut rb = unit_circle().with_position(Vec2::new(5.0, 5.0));
        let force = Vec2::new(0.0, 10.0);
        rb.apply_force_at_point(force, Vec2::new(6.0, 5.0));
        assert_eq!(rb.force, force);
        // r = (1,0), torque = r x F = 10
        assert!((rb.torque - 10.0).abs() < EPSILON);

        rb.clear_accumulators();
        assert_eq!(rb.force, Vec2::ZERO);
        assert_eq!(rb.torque, 0.0);
    }

    #[test]
    fn test_apply_impulse_updates_linear_and_angular_velocity() {
        let mut rb = unit_circle();
        let impulse = Vec2::new(0.0, PI);
        rb.apply_impulse(impulse, Vec2::new(1.0, 0.0));
        assert_abs_diff_eq!(rb.linear_velocity.y, 1.0, epsilon = EPSILON);
        // inv_inertia = 1/PI, cross((1,0),(0,PI)) = PI
        assert_abs_diff_eq!(rb.angular_velocity, 1.0, epsilon = EPSILON);

        let spin = rb.velocity_at(Vec2::new(0.0, 1.0));
        assert_abs_diff_eq!(spin.x, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(spin.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_static_body_ignores_impulses() {
        let mut rb = RigidBody::new_static(Circle::new(1.0), Vec2::ZERO);
        rb.apply_impulse(Vec2::new(1e9, -1e9), Vec2::new(3.0, 4.0));
        assert_eq!(rb.linear_velocity, Vec2::ZERO);
        assert_eq!(rb.angular_velocity, 0.0);
    }

    #[test]
    fn test_calculate_aabb_per_shape() {
        let circle = RigidBody::new(
            Circle::new(1.0).with_offset(Vec2::new(1.0, 0.0)),
            Material::default(),
        )
        .with_position(Vec2::new(2.0, 2.0))
        .with_rotation(PI / 2.0);
        let b = circle.calculate_aabb();
        assert_abs_diff_eq!(b.min.x, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(b.min.y, 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(b.max.y, 4.0, epsilon = EPSILON);

        let boxed = RigidBody::new(Aabb::new_box(2.0, 2.0), Material::default())
            .with_position(Vec2::new(1.0, 0.0))
            .with_rotation(0.7);
        let b = boxed.calculate_aabb();
        assert_eq!(b.min, Vec2::new(0.0, -1.0));
        assert_eq!(b.max, Vec2::new(2.0, 1.0));

        let poly = RigidBody::new(Polygon::new_box(2.0, 1.0), Material::default())
            .with_rotation(PI / 2.0);
        let b = poly.calculate_aabb();
        assert_abs_diff_eq!(b.max.x, 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(b.max.y, 1.0, epsilon = EPSILON);
        assert_eq!(poly.world_vertices().len(), 4);
    }

    #[test]
    fn test_normalize_angles() {
        let mut rb = unit_circle();
        rb.rotation = 5.0 * PI;
        rb.angular_velocity = -7.0 * PI;
        rb.normalize_angles();
        assert_abs_diff_eq!(rb.rotation, PI, epsilon = 1e-9);
        assert_abs_diff_eq!(rb.angular_velocity, -PI, epsilon = 1e-9);
    }
}
