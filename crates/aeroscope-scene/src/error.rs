//! Error types for scene operations.

use std::fmt;

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

/// Axis of a normalized sphere coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateAxis {
    /// Longitude-like coordinate mapped to `θ = 2πu`.
    U,
    /// Latitude-like coordinate mapped to `φ = acos(2v - 1)`.
    V,
}

impl fmt::Display for CoordinateAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U => f.write_str("u"),
            Self::V => f.write_str("v"),
        }
    }
}

/// Errors that can occur in scene operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A normalized sphere coordinate was outside `[0, 1]` or not finite.
    InvalidCoordinate {
        /// Which coordinate was rejected.
        axis: CoordinateAxis,
        /// The rejected value.
        value: f32,
    },
    /// A marker id was not mounted in the marker system.
    UnknownMarker {
        /// The id that was addressed.
        id: String,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { axis, value } => {
                write!(f, "normalized coordinate {axis} = {value} is outside [0, 1]")
            }
            Self::UnknownMarker { id } => write!(f, "unknown marker '{id}'"),
        }
    }
}

impl std::error::Error for SceneError {}
