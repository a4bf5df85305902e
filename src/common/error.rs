//! Error types for shape authoring and world bookkeeping.
//!
//! Nothing inside a simulation step produces an error; numerical corner cases there have
//! explicit fallbacks. Errors only surface when building shapes or managing the body list.

use thiserror::Error;

use crate::world::BodyHandle;

/// A shape could not be built from the supplied parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon supports at most 64 vertices, got {0}")]
    TooManyVertices(usize),

    #[error("polygon edge {index} is degenerate (length {length})")]
    DegenerateEdge { index: usize, length: f64 },

    #[error("polygon is not convex and counter-clockwise at vertex {index}")]
    NotConvex { index: usize },

    #[error("circle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),

    #[error("box extents must be finite and positive, got {width} x {height}")]
    InvalidExtents { width: f64, height: f64 },
}

/// Errors reported by [`PhysicsWorld`](crate::world::PhysicsWorld) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Lets authoring code build shapes and manage the world under a single `?`.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("no body with handle {0:?} in this world")]
    UnknownBody(BodyHandle),

    #[error("body index {index} out of range for {len} bodies")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),
}

impl PhysicsError {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_messages_name_the_problem() {
        let err = ShapeError::DegenerateEdge {
            index: 2,
            length: 0.0,
        };
        assert_eq!(err.to_string(), "polygon edge 2 is degenerate (length 0)");
        assert_eq!(
            ShapeError::TooManyVertices(70).to_string(),
            "polygon supports at most 64 vertices, got 70"
        );
    }

    #[test]
    fn test_shape_errors_convert_into_physics_errors() {
        let err: PhysicsError = ShapeError::TooFewVertices(2).into();
        assert_eq!(err, PhysicsError::Shape(ShapeError::TooFewVertices(2)));
        assert_eq!(err.to_string(), "polygon needs at least 3 vertices, got 2");
    }
}
