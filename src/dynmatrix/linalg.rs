use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{lu_in_place, lu_solve, LinalgError};
use crate::traits::FloatScalar;

use super::{DynMatrix, DynVector};

// ── LU factors ──────────────────────────────────────────────────────

/// Packed L/U factors and row permutation of a square matrix.
#[derive(Debug, Clone)]
struct DynLu<T> {
    lu: DynMatrix<T>,
    perm: Vec<usize>,
}

impl<T: FloatScalar> DynLu<T> {
    fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        assert!(a.is_square(), "LU decomposition requires a square matrix");
        let n = a.nrows();
        let mut lu = a.clone();
        let mut perm = vec![0usize; n];
        lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm })
    }

    fn solve(&self, b: &DynVector<T>) -> DynVector<T> {
        let n = self.lu.nrows();
        assert_eq!(b.len(), n, "rhs length mismatch");
        let mut x = vec![T::zero(); n];
        lu_solve(&self.lu, &self.perm, b.as_slice(), &mut x);
        DynVector::from_vec(x)
    }

    /// Inverse, one unit column at a time.
    fn inverse(&self) -> DynMatrix<T> {
        let n = self.lu.nrows();
        let mut data = Vec::with_capacity(n * n);
        let mut col_buf = vec![T::zero(); n];
        let mut e = vec![T::zero(); n];

        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            lu_solve(&self.lu, &self.perm, &e, &mut col_buf);
            // Column-major: solved columns append directly
            data.extend_from_slice(&col_buf);
        }

        DynMatrix::from_vec(n, n, data)
    }
}

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Solve `Ax = b` for `x` via LU decomposition with partial pivoting.
    ///
    /// ```
    /// use collocation::{DynMatrix, DynVector};
    /// let a = DynMatrix::from_vec(2, 2, vec![2.0_f64, 5.0, 1.0, 3.0]);
    /// let b = DynVector::from_slice(&[4.0, 11.0]);
    /// let x = a.solve(&b).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        Ok(DynLu::new(self)?.solve(b))
    }

    /// Matrix inverse via LU decomposition.
    ///
    /// ```
    /// use collocation::DynMatrix;
    /// let a = DynMatrix::from_vec(2, 2, vec![4.0_f64, 2.0, 7.0, 6.0]);
    /// let a_inv = a.inverse().unwrap();
    /// let id = &a * &a_inv;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((id[(0, 1)]).abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        Ok(DynLu::new(self)?.inverse())
    }
}
