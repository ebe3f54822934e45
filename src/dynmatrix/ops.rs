use alloc::vec;
use core::ops::Mul;

use crate::traits::Scalar;

use super::{DynMatrix, DynVector};

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        // Column-major jki loop: the inner loop runs down contiguous columns.
        for j in 0..p {
            let out = &mut data[j * m..(j + 1) * m];
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                let a_col = &self.data[k * m..(k + 1) * m];
                for (o, &a) in out.iter_mut().zip(a_col.iter()) {
                    *o = *o + a * b_kj;
                }
            }
        }
        DynMatrix {
            data,
            nrows: m,
            ncols: p,
        }
    }
}

// ── Matrix × vector ─────────────────────────────────────────────────

impl<T: Scalar> Mul<&DynVector<T>> for &DynMatrix<T> {
    type Output = DynVector<T>;

    fn mul(self, rhs: &DynVector<T>) -> DynVector<T> {
        assert_eq!(
            self.ncols,
            rhs.len(),
            "dimension mismatch: {}x{} * vector of length {}",
            self.nrows,
            self.ncols,
            rhs.len(),
        );
        let m = self.nrows;
        let mut out = vec![T::zero(); m];
        for (k, &x_k) in rhs.as_slice().iter().enumerate() {
            let a_col = &self.data[k * m..(k + 1) * m];
            for (o, &a) in out.iter_mut().zip(a_col.iter()) {
                *o = *o + a * x_k;
            }
        }
        DynVector::from_vec(out)
    }
}
