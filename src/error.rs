//! Error taxonomy for matrix construction and arithmetic.

/// Errors raised by matrix factories and by the operation boundary.
///
/// Numeric edge cases (division by zero, overflow) are not errors; they
/// produce IEEE-754 infinities and NaNs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("invalid dimension {rows}x{columns}: rows and columns must be at least 1")]
    InvalidDimension { rows: usize, columns: usize },

    #[error("dimension mismatch in {operation}: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        operation: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("matrix must be square, got {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },

    #[error("buffer holds {found} elements but the shape needs {expected}")]
    BufferLength { expected: usize, found: usize },

    #[error("shape {rows}x{columns} overflows the addressable element count")]
    ShapeOverflow { rows: usize, columns: usize },
}

/// Convenience alias for `Result<T, MatrixError>`.
pub type Result<T> = std::result::Result<T, MatrixError>;
