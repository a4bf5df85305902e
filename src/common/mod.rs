pub mod config;
pub mod error;
pub mod material;

pub use config::WorldConfig;
pub use error::{PhysicsError, ShapeError};
pub use material::Material;
