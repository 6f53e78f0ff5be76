//! Error types for contour extraction.

use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Errors raised while building inputs for an extraction pass.
///
/// The pass itself never fails: once a field, an embedding and a level list
/// exist, marching over them always produces a complete segment list.
#[derive(Debug, Error)]
pub enum ContourError {
    #[error("grid of {cols}x{rows} needs {expected} samples, got {actual}")]
    DimensionMismatch {
        cols: usize,
        rows: usize,
        expected: usize,
        actual: usize,
    },

    #[error("grid of {cols}x{rows} samples is too large")]
    GridTooLarge { cols: usize, rows: usize },

    #[error("invalid sample '{token}' at line {line}")]
    InvalidSample { line: usize, token: String },

    #[error("ragged grid: line {line} has {found} samples, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid spacing ({x}, {y}): both factors must be finite and non-zero")]
    InvalidSpacing { x: f32, y: f32 },

    #[error("invalid level interval: {0}")]
    InvalidInterval(f32),

    #[error("interval would generate {count} levels, limit is {max}")]
    TooManyLevels { count: u64, max: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
