use thiserror::Error;

/// Everything that can go wrong when building or combining matrices
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Elementwise operands or an appended row disagree in shape.
    /// Shapes are given as (rows, columns).
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Shape the operation required
        expected: (usize, usize),
        /// Shape that was supplied
        got: (usize, usize),
    },

    /// The inner dimensions of a matrix product disagree
    #[error("dimension mismatch: cannot multiply {left:?} by {right:?}")]
    DimensionMismatch {
        /// Logical shape of the left operand
        left: (usize, usize),
        /// Logical shape of the right operand
        right: (usize, usize),
    },

    /// Determinant or inverse requested on a non-square matrix
    #[error("matrix is not square: {rows}x{columns}")]
    NotSquare {
        /// Logical rows
        rows: usize,
        /// Logical columns
        columns: usize,
    },

    /// Gauss-Jordan elimination hit a zero or near-zero pivot
    #[error("matrix is singular: zero pivot at index {pivot}")]
    Singular {
        /// Diagonal index of the failing pivot
        pivot: usize,
    },

    /// Element access outside of the logical bounds
    #[error("index ({row}, {column}) out of range for {rows}x{columns} matrix")]
    IndexOutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        column: usize,
        /// Logical rows
        rows: usize,
        /// Logical columns
        columns: usize,
    },

    /// `polynomialize` needs a degree of at least one
    #[error("polynomial degree must be at least 1, got {0}")]
    InvalidDegree(u32),

    /// Input scalars must be finite
    #[error("non-finite value at ({row}, {column})")]
    NonFinite {
        /// Row of the offending value
        row: usize,
        /// Column of the offending value
        column: usize,
    },

    /// Scaling factor must be finite
    #[error("non-finite scale factor {0}")]
    InvalidFactor(f64),

    /// Finite operands produced an infinite or NaN result
    #[error("{0} overflowed to a non-finite result")]
    Overflow(&'static str),
}
