pub mod mat22;
pub mod mat33;
pub mod transform;
pub mod vec2;

pub use mat22::Mat22;
pub use mat33::Mat33;
pub use transform::Transform;
pub use vec2::Vec2;
