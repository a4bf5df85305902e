use std::f64::consts::TAU;

use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Half of a semi-implicit Euler velocity update from accumulated force, torque and gravity.
///
/// Called twice per step, once before the contact solve and once after positions move.
pub fn integrate_forces(body: &mut RigidBody, gravity: Vec2, dt: f64) {
    if body.inv_mass == 0.0 {
        // Static object, do not integrate
        return;
    }

    let half_dt = dt / 2.0;
    // v += (F/m + g) * dt/2
    body.linear_velocity += (body.force * body.inv_mass + gravity) * half_dt;
    // omega += T/I * dt/2
    body.angular_velocity += body.torque * body.inv_inertia * half_dt;
}

/// Moves the body by its velocity over `dt`, then applies the second force half-step.
pub fn integrate_velocity(body: &mut RigidBody, gravity: Vec2, dt: f64) {
    if body.inv_mass == 0.0 {
        return;
    }

    body.position += body.linear_velocity * dt;
    body.rotation += body.angular_velocity * dt;
    integrate_forces(body, gravity, dt);
}

/// Pulls an angle back inside (-2π, 2π) by removing whole turns.
/// Values already inside that range are returned unchanged.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle >= TAU {
        angle - TAU * (angle / TAU).trunc()
    } else if angle <= -TAU {
        angle + TAU * (-angle / TAU).trunc()
    } else {
        angle
    }
}
