use std::fmt;

use crate::{features, inverse, MatrixError, MatrixView};

/// Dense row-major matrix owning its buffer.
///
/// Invariant: `rows * columns == data.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    columns: usize,
}

impl Matrix {
    /// An empty 0x0 matrix, ready to be grown with [`Matrix::add_row`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a single column matrix from a flat sequence of values
    pub fn from_column(values: &[f64]) -> Result<Self, MatrixError> {
        check_finite(values, 1)?;
        Ok(Self::from_parts(values.to_vec(), values.len(), 1))
    }

    /// Builds a matrix from a sequence of equally long rows
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let mut out = Self::new();
        out.extend_rows(rows)?;
        Ok(out)
    }

    /// Builds a matrix from a row-major buffer
    pub fn from_vec(rows: usize, columns: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if rows.checked_mul(columns) != Some(data.len()) {
            return Err(MatrixError::ShapeMismatch {
                expected: (rows, columns),
                got: (data.len(), 1),
            });
        }
        check_finite(&data, columns.max(1))?;
        Ok(Self::from_parts(data, rows, columns))
    }

    /// A matrix of the given shape filled with zeros
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::from_parts(vec![0.0; rows * columns], rows, columns)
    }

    /// The `n x n` identity
    pub fn identity(n: usize) -> Self {
        Self::from_parts(inverse::identity(n), n, n)
    }

    /// Caller upholds `rows * columns == data.len()` and finiteness
    pub(crate) fn from_parts(data: Vec<f64>, rows: usize, columns: usize) -> Self {
        debug_assert_eq!(rows * columns, data.len());
        Self {
            data,
            rows,
            columns,
        }
    }

    /// Wraps the output of an operation, rejecting values that overflowed
    pub(crate) fn from_output(
        data: Vec<f64>,
        rows: usize,
        columns: usize,
        operation: &'static str,
    ) -> Result<Self, MatrixError> {
        if data.iter().any(|v| !v.is_finite()) {
            debug!("{} of {}x{} result overflowed", operation, rows, columns);
            return Err(MatrixError::Overflow(operation));
        }
        Ok(Self::from_parts(data, rows, columns))
    }

    /// Appends a row. The first row fixes the number of columns.
    pub fn add_row(&mut self, row: &[f64]) -> Result<(), MatrixError> {
        if self.rows > 0 && row.len() != self.columns {
            return Err(MatrixError::ShapeMismatch {
                expected: (1, self.columns),
                got: (1, row.len()),
            });
        }
        if let Some(c) = row.iter().position(|v| !v.is_finite()) {
            return Err(MatrixError::NonFinite {
                row: self.rows,
                column: c,
            });
        }

        if self.rows == 0 {
            self.columns = row.len();
        }
        self.data.extend_from_slice(row);
        self.rows += 1;

        Ok(())
    }

    /// Appends several rows, stopping at the first one that does not fit.
    /// Rows appended before the failure are kept.
    pub fn extend_rows<R: AsRef<[f64]>>(&mut self, rows: &[R]) -> Result<(), MatrixError> {
        for row in rows {
            self.add_row(row.as_ref())?;
        }
        Ok(())
    }

    /// Number of rows
    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline(always)]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// (rows, columns)
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Element at (row, column)
    pub fn get(&self, row: usize, column: usize) -> Result<f64, MatrixError> {
        self.view().get(row, column)
    }

    /// The row-major buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix, returning its row-major buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Untransposed read-only view of this matrix
    pub fn view(&self) -> MatrixView<'_> {
        MatrixView::new(&self.data, self.rows, self.columns)
    }

    /// O(1) transpose. The view borrows `self`, so `self` cannot be mutated while it lives.
    pub fn t(&self) -> MatrixView<'_> {
        self.view().t()
    }

    /// Copy of this matrix with a leading column of ones
    pub fn add_bias_ones(&self) -> Matrix {
        features::add_bias_ones(&self.data, self.rows, self.columns)
    }

    /// Polynomial expansion of every feature up to `degree`, with a leading bias column
    pub fn polynomialize(&self, degree: u32) -> Result<Matrix, MatrixError> {
        features::polynomialize(&self.data, self.rows, self.columns, degree)
    }

    /// Elementwise sum
    pub fn add_elementwise<'b>(
        &self,
        other: impl Into<MatrixView<'b>>,
    ) -> Result<Matrix, MatrixError> {
        self.view().add_elementwise(other)
    }

    /// Multiplies every element by `factor`
    pub fn scale(&self, factor: f64) -> Result<Matrix, MatrixError> {
        self.view().scale(factor)
    }

    /// Matrix product `self * other`
    pub fn multiply<'b>(&self, other: impl Into<MatrixView<'b>>) -> Result<Matrix, MatrixError> {
        self.view().multiply(other)
    }

    /// Determinant by cofactor expansion
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        self.view().determinant()
    }

    /// Inverse by Gauss-Jordan elimination without row exchanges
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        self.view().inverse()
    }

    /// Same shape and every element within `tolerance`
    pub fn approx_eq<'b>(&self, other: impl Into<MatrixView<'b>>, tolerance: f64) -> bool {
        self.view().approx_eq(other, tolerance)
    }

    /// Square and within `tolerance` of the identity
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.rows == self.columns && self.approx_eq(&Self::identity(self.rows), tolerance)
    }
}

impl<'a> From<&'a Matrix> for MatrixView<'a> {
    fn from(m: &'a Matrix) -> Self {
        m.view()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view().fmt(f)
    }
}

fn check_finite(data: &[f64], columns: usize) -> Result<(), MatrixError> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(MatrixError::NonFinite {
            row: i / columns,
            column: i % columns,
        }),
        None => Ok(()),
    }
}
