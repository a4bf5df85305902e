//! A small 2D rigid-body physics engine.
//!
//! Bodies carry a circle, an axis-aligned box or a convex polygon. Every fixed step the
//! [`PhysicsWorld`] tests all body pairs, builds contact manifolds (separating-axis test
//! with face clipping for hulls), resolves them with restitution and Coulomb friction
//! impulses and nudges overlapping bodies apart. Screen coordinates are used throughout:
//! +y points down and default gravity is `(0, 9.8)`.
//!
//! ```no_run
//! use impulse2d::{Circle, Material, PhysicsWorld, Polygon, RigidBody, Vec2};
//!
//! let mut world = PhysicsWorld::new();
//! world.add_body(RigidBody::new_static(Polygon::new_box(20.0, 1.0), Vec2::new(0.0, 5.0)));
//! let ball = world.add_body(
//!     RigidBody::new(Circle::new(0.5), Material::BOUNCY_BALL).with_position(Vec2::new(0.0, 0.0)),
//! );
//!
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0);
//! }
//! println!("ball at {:?}", world.body(ball).map(|b| b.position));
//! ```

pub mod collision;
pub mod common;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export key types for easier use
pub use collision::{Contact, Manifold};
pub use common::{Material, PhysicsError, ShapeError, WorldConfig};
pub use math::{Mat22, Mat33, Transform, Vec2};
pub use objects::rigid_body::RigidBody;
pub use shapes::{Aabb, Circle, Polygon, Shape, ShapeKind};
pub use world::{BodyHandle, PhysicsWorld};
