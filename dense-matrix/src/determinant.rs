/// Removes `row` and `column` from the flattened `n x n` buffer,
/// producing the flattened `(n - 1) x (n - 1)` minor.
pub(crate) fn minor(data: &[f64], n: usize, row: usize, column: usize) -> Vec<f64> {
    debug_assert_eq!(data.len(), n * n);

    let mut out = Vec::with_capacity((n - 1) * (n - 1));
    for (r, values) in data.chunks_exact(n).enumerate() {
        if r == row {
            continue;
        }
        out.extend_from_slice(&values[..column]);
        out.extend_from_slice(&values[column + 1..]);
    }

    out
}

/// Laplace expansion along the first row of a flattened `n x n` buffer.
/// This is O(n!), so keep it to single digit sizes.
pub(crate) fn cofactor_expansion(data: &[f64], n: usize) -> f64 {
    match n {
        0 => 1.0,
        1 => data[0],
        _ => {
            let mut det = 0.0;
            for c in 0..n {
                let a = data[c];
                if a == 0.0 {
                    continue;
                }
                let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
                det += sign * a * cofactor_expansion(&minor(data, n, 0, c), n - 1);
            }
            det
        }
    }
}
