//! Design matrix expansion. Both transforms walk a contiguous row-major buffer,
//! so callers holding a transposed view materialize it first.

use crate::{Matrix, MatrixError};

/// Prepends a column of ones to every row
pub(crate) fn add_bias_ones(data: &[f64], rows: usize, columns: usize) -> Matrix {
    let mut out = Vec::with_capacity(rows * (columns + 1));
    for r in 0..rows {
        out.push(1.0);
        out.extend_from_slice(&data[r * columns..(r + 1) * columns]);
    }

    Matrix::from_parts(out, rows, columns + 1)
}

/// Expands every row `[x1, .., xn]` into `[1, x1, x1^2, .., x1^degree, x2, .., xn^degree]`.
/// Fails with [`MatrixError::Overflow`] when a power leaves the f64 range.
pub(crate) fn polynomialize(
    data: &[f64],
    rows: usize,
    columns: usize,
    degree: u32,
) -> Result<Matrix, MatrixError> {
    if degree == 0 {
        return Err(MatrixError::InvalidDegree(degree));
    }

    let out_columns = columns * degree as usize + 1;
    let mut out = Vec::with_capacity(rows * out_columns);
    for r in 0..rows {
        out.push(1.0);
        for &x in &data[r * columns..(r + 1) * columns] {
            let mut power = x;
            for _ in 0..degree {
                out.push(power);
                power *= x;
            }
        }
    }

    Matrix::from_output(out, rows, out_columns, "polynomialize")
}
