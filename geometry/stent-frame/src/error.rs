//! Error types for stent frame generation.

use thiserror::Error;

/// Result type for stent frame operations.
pub type StentResult<T> = Result<T, StentError>;

/// Errors that can occur while generating a stent frame.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StentError {
    /// Too few points to fit a spline or build frames.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Two consecutive points coincide, so the segment has no tangent.
    #[error("degenerate segment at index {index}: consecutive points coincide")]
    DegenerateSegment {
        /// Index of the first point of the zero-length segment.
        index: usize,
    },

    /// A frame vector could not be normalized.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// Description of the degeneracy.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParams {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl StentError {
    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create a degenerate geometry error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_param(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            name,
            reason: reason.into(),
        }
    }

    /// Check if this is an insufficient points error.
    #[must_use]
    pub fn is_insufficient_points(&self) -> bool {
        matches!(self, Self::InsufficientPoints { .. })
    }

    /// Check if this is a zero-length segment error.
    #[must_use]
    pub fn is_degenerate_segment(&self) -> bool {
        matches!(self, Self::DegenerateSegment { .. })
    }

    /// Check if this is a degenerate geometry error.
    #[must_use]
    pub fn is_degenerate_geometry(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }

    /// Check if this is an invalid parameter error.
    #[must_use]
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, Self::InvalidParams { .. })
    }
}
