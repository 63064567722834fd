use std::{borrow::Cow, fmt};

use crate::{determinant, features, inverse, Matrix, MatrixError};

/// Read-only view over a row-major buffer owned by a [`Matrix`].
///
/// `rows` and `columns` describe the storage; when `transposed` is set the
/// logical shape is swapped and element access reads the buffer column-wise.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [f64],
    rows: usize,
    columns: usize,
    transposed: bool,
}

impl<'a> MatrixView<'a> {
    pub(crate) fn new(data: &'a [f64], rows: usize, columns: usize) -> Self {
        Self {
            data,
            rows,
            columns,
            transposed: false,
        }
    }

    /// Logical number of rows
    #[inline(always)]
    pub fn rows(&self) -> usize {
        if self.transposed {
            self.columns
        } else {
            self.rows
        }
    }

    /// Logical number of columns
    #[inline(always)]
    pub fn columns(&self) -> usize {
        if self.transposed {
            self.rows
        } else {
            self.columns
        }
    }

    /// Logical (rows, columns)
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    /// Whether logical access goes through the transpose
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// O(1) transpose sharing the same buffer
    pub fn t(&self) -> MatrixView<'a> {
        Self {
            transposed: !self.transposed,
            ..*self
        }
    }

    /// Logical element at (row, column)
    pub fn get(&self, row: usize, column: usize) -> Result<f64, MatrixError> {
        if row >= self.rows() || column >= self.columns() {
            return Err(MatrixError::IndexOutOfRange {
                row,
                column,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(self.at(row, column))
    }

    #[inline(always)]
    fn at(&self, row: usize, column: usize) -> f64 {
        if self.transposed {
            self.data[column * self.columns + row]
        } else {
            self.data[row * self.columns + column]
        }
    }

    /// The logical layout as a row-major buffer, borrowed when no transpose is pending
    fn row_major(&self) -> Cow<'a, [f64]> {
        if !self.transposed {
            return Cow::Borrowed(self.data);
        }
        let (rows, columns) = self.shape();
        let mut out = Vec::with_capacity(self.data.len());
        for r in 0..rows {
            out.extend((0..columns).map(|c| self.at(r, c)));
        }
        Cow::Owned(out)
    }

    /// Materializes the logical layout into a new owned, untransposed matrix
    pub fn to_matrix(&self) -> Matrix {
        let (rows, columns) = self.shape();
        Matrix::from_parts(self.row_major().into_owned(), rows, columns)
    }

    /// Copy with a leading column of ones
    pub fn add_bias_ones(&self) -> Matrix {
        let (rows, columns) = self.shape();
        features::add_bias_ones(&self.row_major(), rows, columns)
    }

    /// Polynomial expansion of every feature up to `degree`, with a leading bias column
    pub fn polynomialize(&self, degree: u32) -> Result<Matrix, MatrixError> {
        let (rows, columns) = self.shape();
        features::polynomialize(&self.row_major(), rows, columns, degree)
    }

    /// Elementwise sum, both operands compared by logical shape
    pub fn add_elementwise<'b>(
        &self,
        other: impl Into<MatrixView<'b>>,
    ) -> Result<Matrix, MatrixError> {
        let other = other.into();
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                expected: self.shape(),
                got: other.shape(),
            });
        }

        let (rows, columns) = self.shape();
        let mut out = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            out.extend((0..columns).map(|c| self.at(r, c) + other.at(r, c)));
        }

        Matrix::from_output(out, rows, columns, "add_elementwise")
    }

    /// Multiplies every element by `factor`, which must be finite
    pub fn scale(&self, factor: f64) -> Result<Matrix, MatrixError> {
        if !factor.is_finite() {
            return Err(MatrixError::InvalidFactor(factor));
        }
        let (rows, columns) = self.shape();
        let data = self.row_major().iter().map(|v| v * factor).collect();
        Matrix::from_output(data, rows, columns, "scale")
    }

    /// Matrix product `self * other`
    pub fn multiply<'b>(&self, other: impl Into<MatrixView<'b>>) -> Result<Matrix, MatrixError> {
        let other = other.into();
        if self.columns() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let rows = self.rows();
        let columns = other.columns();
        let inner = self.columns();
        let mut out = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                let cross: f64 = (0..inner).map(|i| self.at(r, i) * other.at(i, c)).sum();
                out.push(cross);
            }
        }
        trace!("multiplied {:?} by {:?}", self.shape(), other.shape());

        Matrix::from_output(out, rows, columns, "multiply")
    }

    /// Determinant by cofactor expansion
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        self.check_square()?;
        let det = determinant::cofactor_expansion(&self.row_major(), self.rows());
        if !det.is_finite() {
            return Err(MatrixError::Overflow("determinant"));
        }
        Ok(det)
    }

    /// Inverse by Gauss-Jordan elimination without row exchanges
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        self.check_square()?;
        let n = self.rows();
        let inv = inverse::gauss_jordan(self.row_major().into_owned(), n)?;
        Ok(Matrix::from_parts(inv, n, n))
    }

    /// Same logical shape and every element within `tolerance`
    pub fn approx_eq<'b>(&self, other: impl Into<MatrixView<'b>>, tolerance: f64) -> bool {
        let other = other.into();
        if self.shape() != other.shape() {
            return false;
        }
        let (rows, columns) = self.shape();
        (0..rows).all(|r| (0..columns).all(|c| (self.at(r, c) - other.at(r, c)).abs() <= tolerance))
    }

    fn check_square(&self) -> Result<(), MatrixError> {
        if self.rows() != self.columns() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for r in 0..self.rows() {
            write!(f, "  [")?;
            for c in 0..self.columns() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.at(r, c))?;
            }
            writeln!(f, "],")?;
        }
        write!(f, "]")
    }
}
