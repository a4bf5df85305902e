pub mod detection;
pub mod manifold;
pub mod sat;

// Re-export key types
pub use detection::{collide, collide_pair};
pub use manifold::{Contact, ContactPoints, Manifold};
pub use sat::Hull;
