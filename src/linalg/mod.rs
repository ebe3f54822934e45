//! Dense linear algebra needed by the collocation solver.
//!
//! - [`lu_in_place`] / [`lu_solve`]: LU with partial pivoting over any
//!   [`MatrixMut`](crate::MatrixMut), behind `DynMatrix::solve` and
//!   `DynMatrix::inverse`.
//! - [`tridiagonal_qr_first_row`]: implicit symmetric QR on a tridiagonal
//!   matrix, accumulating only the first row of the eigenvector matrix
//!   (all that Gauss quadrature weights need).

pub(crate) mod lu;
pub(crate) mod tridiagonal;

pub use lu::{lu_in_place, lu_solve};
pub use tridiagonal::tridiagonal_qr_first_row;

/// Errors from linear algebra operations.
///
/// ```
/// use collocation::DynMatrix;
/// use collocation::linalg::LinalgError;
///
/// let singular = DynMatrix::from_vec(2, 2, vec![1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    Singular,
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
