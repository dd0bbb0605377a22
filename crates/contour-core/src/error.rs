//! Error types for contour-rs.

use thiserror::Error;

/// The main error type for contour-rs operations.
#[derive(Error, Debug)]
pub enum ContourError {
    /// A color-map preset has too few control points to interpolate.
    #[error("color map preset '{name}' has {points} control points, need at least 2")]
    InvalidPreset { name: String, points: usize },

    /// A value supplied to a normalized-value API was outside [0, 1].
    #[error("value {value} outside normalized range [0, 1]")]
    ValueOutOfRange { value: f32 },

    /// An attribute's element count does not match the mesh vertex count.
    #[error("attribute '{name}' size mismatch: expected {expected} elements, got {actual}")]
    AttributeSizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A vertex or component index was outside declared bounds.
    #[error("{kind} index {index} out of range (bound {bound})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        bound: usize,
    },

    /// The mesh lacks geometry required by the requested operation.
    #[error("missing geometry: {0}")]
    MissingGeometry(&'static str),

    /// JSON deserialization error (color-map preset documents).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for contour-rs operations.
pub type Result<T> = std::result::Result<T, ContourError>;
