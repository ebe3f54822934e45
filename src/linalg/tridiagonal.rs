use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

/// Implicit symmetric QR on a tridiagonal matrix (Wilkinson shift),
/// tracking only the first row of the accumulated eigenvector matrix.
///
/// On entry `diag[0..n]` holds the diagonal and `off_diag[0..n-1]` the
/// sub-diagonal. On success `diag` holds the eigenvalues in ascending order
/// and `first_row[k]` the first component of the unit eigenvector belonging
/// to `diag[k]`. `off_diag` is destroyed.
///
/// This is the Golub–Welsch workload: Gauss quadrature weights are
/// `μ₀ · v₀ₖ²`, so the full `n × n` eigenvector matrix is never needed.
///
/// ```
/// use collocation::linalg::tridiagonal_qr_first_row;
///
/// // [[2, 1], [1, 2]] has eigenvalues 1 and 3
/// let mut d = [2.0_f64, 2.0];
/// let mut e = [1.0_f64];
/// let mut v = [0.0_f64; 2];
/// tridiagonal_qr_first_row(&mut d, &mut e, &mut v, 60).unwrap();
/// assert!((d[0] - 1.0).abs() < 1e-14);
/// assert!((d[1] - 3.0).abs() < 1e-14);
/// assert!((v[0] * v[0] - 0.5).abs() < 1e-14);
/// ```
pub fn tridiagonal_qr_first_row<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    first_row: &mut [T],
    max_iter: usize,
) -> Result<(), LinalgError> {
    let n = diag.len();
    assert!(off_diag.len() + 1 >= n, "off-diagonal too short");
    assert_eq!(first_row.len(), n, "first_row length must match diag");

    for (k, v) in first_row.iter_mut().enumerate() {
        *v = if k == 0 { T::one() } else { T::zero() };
    }
    if n <= 1 {
        return Ok(());
    }

    let eps = T::epsilon();
    let two = T::one() + T::one();
    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        // Find the start of the unreduced block ending at `hi`
        let mut lo = hi;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold {
                off_diag[lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            hi -= 1;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            return Err(LinalgError::ConvergenceFailure);
        }

        // Wilkinson shift from the trailing 2x2 block
        let d = (diag[hi - 1] - diag[hi]) / two;
        let e = off_diag[hi - 1];
        let r = (d * d + e * e).sqrt();
        let shift = diag[hi] - e * e / (d + if d >= T::zero() { r } else { -r });

        let mut x = diag[lo] - shift;
        let mut z = off_diag[lo];

        for k in lo..hi {
            let (c, s) = givens(x, z);

            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let d_k = diag[k];
            let d_k1 = diag[k + 1];
            let e_k = off_diag[k];

            diag[k] = c * c * d_k + two * c * s * e_k + s * s * d_k1;
            diag[k + 1] = s * s * d_k - two * c * s * e_k + c * c * d_k1;
            off_diag[k] = c * s * (d_k1 - d_k) + (c * c - s * s) * e_k;

            if k + 1 < hi {
                // Chase the bulge at (k, k+2)
                let e_next = off_diag[k + 1];
                x = off_diag[k];
                z = s * e_next;
                off_diag[k + 1] = c * e_next;
            }

            // Q_new = Q * G^T, first row only
            let q_k = first_row[k];
            let q_k1 = first_row[k + 1];
            first_row[k] = c * q_k + s * q_k1;
            first_row[k + 1] = c * q_k1 - s * q_k;
        }
    }

    sort_ascending(diag, first_row);
    Ok(())
}

/// Givens rotation `(c, s)` with `[[c, s], [-s, c]] · [a; b] = [r; 0]`.
pub(crate) fn givens<T: FloatScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).sqrt();
        (c, c * t)
    }
}

fn sort_ascending<T: FloatScalar>(values: &mut [T], companion: &mut [T]) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| {
        values[i]
            .partial_cmp(&values[j])
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    let sorted_values: Vec<T> = order.iter().map(|&i| values[i]).collect();
    let sorted_companion: Vec<T> = order.iter().map(|&i| companion[i]).collect();
    values.copy_from_slice(&sorted_values);
    companion.copy_from_slice(&sorted_companion);
}
