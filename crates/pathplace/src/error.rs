//! Error types for placement.

use thiserror::Error;

/// Errors that can occur while placing objects along a polyline.
#[derive(Error, Debug)]
pub enum PlacementError {
    /// Polyline or configuration is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two consecutive vertices coincide.
    #[error("degenerate (zero-length) segment at index {0}")]
    DegenerateSegment(usize),

    /// Geometry JSON could not be parsed.
    #[error("malformed geometry JSON: {0}")]
    Format(#[from] serde_json::Error),

    /// A drawing source failed to produce a polyline.
    #[error("drawing source failed: {0}")]
    Source(String),

    /// A scene sink rejected an instance.
    #[error("scene sink failed: {0}")]
    Sink(String),
}

/// Result type for placement operations.
pub type Result<T> = std::result::Result<T, PlacementError>;
