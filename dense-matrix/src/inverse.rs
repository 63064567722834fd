use crate::MatrixError;

/// Pivots whose magnitude is at or below this are treated as zero
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Gauss-Jordan elimination of a flattened `n x n` buffer against the identity.
///
/// Rows are never exchanged, so a zero on the diagonal fails with
/// [`MatrixError::Singular`] even when the matrix is invertible after a row swap.
///
/// [`PIVOT_EPSILON`] is an absolute cutoff, not scaled by the magnitude of the
/// matrix: a well conditioned matrix whose entries are all tiny, such as
/// `[[1e-13]]`, is reported as singular. Rescale such inputs before inverting.
pub(crate) fn gauss_jordan(mut work: Vec<f64>, n: usize) -> Result<Vec<f64>, MatrixError> {
    debug_assert_eq!(work.len(), n * n);

    let mut inv = identity(n);
    for fd in 0..n {
        let pivot = work[fd * n + fd];
        if !pivot.is_finite() {
            debug!("pivot {} at index {} overflowed", pivot, fd);
            return Err(MatrixError::Overflow("inverse"));
        }
        if pivot.abs() <= PIVOT_EPSILON {
            debug!("zero pivot {} at index {} of {}x{} elimination", pivot, fd, n, n);
            return Err(MatrixError::Singular { pivot: fd });
        }

        let scaler = 1.0 / pivot;
        for j in 0..n {
            work[fd * n + j] *= scaler;
            inv[fd * n + j] *= scaler;
        }

        for i in 0..n {
            if i == fd {
                continue;
            }
            let row_scaler = work[i * n + fd];
            if row_scaler == 0.0 {
                continue;
            }
            for j in 0..n {
                work[i * n + j] -= row_scaler * work[fd * n + j];
                inv[i * n + j] -= row_scaler * inv[fd * n + j];
            }
        }
    }

    if inv.iter().any(|v| !v.is_finite()) {
        return Err(MatrixError::Overflow("inverse"));
    }

    Ok(inv)
}

/// Flattened `n x n` identity
pub(crate) fn identity(n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        out[i * n + i] = 1.0;
    }
    out
}
