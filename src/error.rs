//! Error types for the transformer.

use std::fmt;

use thiserror::Error;

/// Identifies which matrix of the value/pixel pipeline an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixStage {
    /// The matrix mapping data values onto the content area.
    ValueToPixel,
    /// The gesture-driven pan/zoom matrix owned by the viewport.
    PanZoom,
    /// The layout offset matrix.
    Offset,
    /// The composition of all three.
    Combined,
}

impl fmt::Display for MatrixStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixStage::ValueToPixel => "value-to-pixel",
            MatrixStage::PanZoom => "pan/zoom",
            MatrixStage::Offset => "offset",
            MatrixStage::Combined => "combined",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while mapping between value and pixel space.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    /// A matrix has a zero or non-finite determinant and cannot be inverted.
    ///
    /// Callers mapping a touch position should read this as "no value under
    /// this point".
    #[error("{stage} matrix is not invertible (determinant {determinant})")]
    NonInvertible {
        stage: MatrixStage,
        /// Determinant converted to `f64` for reporting.
        determinant: f64,
    },
}

impl TransformError {
    /// Returns the pipeline stage that failed.
    pub const fn stage(&self) -> MatrixStage {
        match self {
            TransformError::NonInvertible { stage, .. } => *stage,
        }
    }
}

/// Result type for transformer operations.
pub type Result<T, E = TransformError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_stage() {
        let err = TransformError::NonInvertible {
            stage: MatrixStage::PanZoom,
            determinant: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "pan/zoom matrix is not invertible (determinant 0)"
        );
        assert_eq!(err.stage(), MatrixStage::PanZoom);
    }
}
