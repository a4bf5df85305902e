use smallvec::SmallVec;

use crate::common::Material;
use crate::math::vec2::Vec2;

/// Up to two world-space contact points.
pub type ContactPoints = SmallVec<[Vec2; 2]>;

/// Geometric result of a narrow-phase test between two shapes.
///
/// Only produced when the shapes touch, so `points` always holds one or two entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from shape A towards shape B.
    pub normal: Vec2,
    /// Overlap depth along `normal`, never negative.
    pub penetration: f64,
    pub points: ContactPoints,
}

impl Contact {
    pub fn new(normal: Vec2, penetration: f64, points: ContactPoints) -> Self {
        Self {
            normal,
            penetration,
            points,
        }
    }

    /// The same contact seen from the other shape.
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// A contact between two bodies of the world, rebuilt every fixed step.
///
/// Bodies are referenced by their index in the world's body list at the time of the step.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifold {
    pub body_a: usize,
    pub body_b: usize,
    /// Unit normal pointing from body A towards body B.
    pub normal: Vec2,
    pub penetration: f64,
    pub contacts: ContactPoints,
    /// Lower of the two restitutions.
    pub restitution: f64,
    /// Quadratic combination `sqrt(a² + b²)` of the two static frictions.
    pub static_friction: f64,
    /// Quadratic combination `sqrt(a² + b²)` of the two dynamic frictions.
    pub dynamic_friction: f64,
}

impl Manifold {
    /// Pairs a narrow-phase contact with the combined material of both bodies.
    pub fn new(
        body_a: usize,
        body_b: usize,
        contact: Contact,
        material_a: &Material,
        material_b: &Material,
    ) -> Self {
        Self {
            body_a,
            body_b,
            normal: contact.normal,
            penetration: contact.penetration,
            contacts: contact.points,
            restitution: material_a.restitution.min(material_b.restitution),
            static_friction: material_a.static_friction.hypot(material_b.static_friction),
            dynamic_friction: material_a.dynamic_friction.hypot(material_b.dynamic_friction),
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Swaps the two bodies and reverses the normal.
    pub fn flipped(mut self) -> Self {
        std::mem::swap(&mut self.body_a, &mut self.body_b);
        self.normal = -self.normal;
        self
    }
}
