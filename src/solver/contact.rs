//! Velocity and position resolution of contact manifolds.
//!
//! Single pass, no warm starting: each manifold is visited once per step, and the
//! impulse of a multi-point manifold is split evenly across its points.

use super::get_mutable_body_pair;
use crate::collision::manifold::Manifold;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Added to the squared gravity step when deciding whether a contact is at rest.
const RESTING_EPSILON: f64 = 1e-4;

/// Below this combined inverse mass both bodies are treated as immovable.
const IMMOVABLE_EPSILON: f64 = 1e-4;

/// Tangential impulses at or below this magnitude end the manifold's friction pass.
const FRICTION_EPSILON: f64 = 1e-4;

fn relative_velocity(a: &RigidBody, b: &RigidBody, ra: Vec2, rb: Vec2) -> Vec2 {
    b.velocity_at(rb) - a.velocity_at(ra)
}

impl Manifold {
    /// Prepares the manifold for this step's velocity pass.
    ///
    /// Drops restitution to zero when any contact point moves no faster than gravity
    /// alone would accelerate it over one step, so resting bodies do not jitter.
    pub fn initialize(&mut self, bodies: &[RigidBody], dt: f64, gravity: Vec2) {
        let a = &bodies[self.body_a];
        let b = &bodies[self.body_b];
        let resting_threshold = (gravity * dt).magnitude_squared() + RESTING_EPSILON;

        for contact in &self.contacts {
            let ra = *contact - a.position;
            let rb = *contact - b.position;
            if relative_velocity(a, b, ra, rb).magnitude_squared() < resting_threshold {
                self.restitution = 0.0;
            }
        }
    }

    /// Applies normal and friction impulses for every contact point.
    pub fn apply_impulse(&self, bodies: &mut [RigidBody]) {
        let (a, b) = get_mutable_body_pair(bodies, self.body_a, self.body_b);

        if (a.inv_mass + b.inv_mass).abs() <= IMMOVABLE_EPSILON {
            a.linear_velocity = Vec2::ZERO;
            b.linear_velocity = Vec2::ZERO;
            return;
        }

        let contact_count = self.contacts.len() as f64;
        for contact in &self.contacts {
            let ra = *contact - a.position;
            let rb = *contact - b.position;

            let rv = relative_velocity(a, b, ra, rb);
            let contact_velocity = rv.dot(self.normal);
            // Separating at this point
            if contact_velocity > 0.0 {
                continue;
            }

            let ra_cross_n = ra.cross(self.normal);
            let rb_cross_n = rb.cross(self.normal);
            let inv_mass_sum = a.inv_mass
                + b.inv_mass
                + ra_cross_n * ra_cross_n * a.inv_inertia
                + rb_cross_n * rb_cross_n * b.inv_inertia;

            let j = -(self.restitution + 1.0) * contact_velocity / inv_mass_sum / contact_count;
            let impulse = self.normal * j;
            a.apply_impulse(-impulse, ra);
            b.apply_impulse(impulse, rb);

            // Friction, along the sliding direction left after the normal impulse
            let rv = relative_velocity(a, b, ra, rb);
            let tangent = (rv - self.normal * rv.dot(self.normal)).normalize();
            let jt = -rv.dot(tangent) / inv_mass_sum / contact_count;

            // Ends the whole manifold, not just this point.
            if jt.abs() <= FRICTION_EPSILON {
                return;
            }

            // Coulomb: stick below the static cone, slide with dynamic friction above it.
            let tangent_impulse = if jt.abs() < j * self.static_friction {
                tangent * jt
            } else {
                tangent * (-j * self.dynamic_friction)
            };
            a.apply_impulse(-tangent_impulse, ra);
            b.apply_impulse(tangent_impulse, rb);
        }
    }

    /// Baumgarte correction: pushes the bodies apart along the normal by `percent` of the
    /// penetration beyond `slop`, split by inverse mass.
    pub fn correct_position(&self, bodies: &mut [RigidBody], percent: f64, slop: f64) {
        let (a, b) = get_mutable_body_pair(bodies, self.body_a, self.body_b);

        let total_inv_mass = a.inv_mass + b.inv_mass;
        if total_inv_mass == 0.0 {
            return;
        }

        let correction =
            self.normal * ((self.penetration - slop).max(0.0) / total_inv_mass * percent);
        a.position -= correction * a.inv_mass;
        b.position += correction * b.inv_mass;
    }
}
