mod linalg;
mod ops;
mod vector;

pub use vector::DynVector;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

/// Dynamically-sized heap-allocated matrix.
///
/// Column-major `Vec<T>` storage. Dimensions are set at runtime. Implements
/// [`MatrixRef`] and [`MatrixMut`], so the generic LU free functions in
/// [`crate::linalg`] work with `DynMatrix` directly.
///
/// # Examples
///
/// ```
/// use collocation::DynMatrix;
///
/// let a = DynMatrix::from_fn(2, 3, |i, j| (10 * i + j) as f64);
/// assert_eq!(a[(1, 2)], 12.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 3);
///
/// let z = DynMatrix::zeros(2, 2, 0.0_f64);
/// assert_eq!(z.as_slice(), &[0.0; 4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// The `_zero` parameter is only used for type inference.
    pub fn zeros(nrows: usize, ncols: usize, _zero: T) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create a matrix from an owned `Vec<T>` in column-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<T> {
        let mut sums = vec![T::zero(); self.nrows];
        for col in self.data.chunks_exact(self.nrows.max(1)).take(self.ncols) {
            for (s, &v) in sums.iter_mut().zip(col.iter()) {
                *s = *s + v;
            }
        }
        sums
    }
}

impl<T> DynMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Column-major view of the underlying storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use collocation::DynMatrix;
    /// let m = DynMatrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// Largest absolute element-wise difference to `other`.
    ///
    /// Panics on a dimension mismatch.
    pub fn max_abs_diff(&self, other: &Self) -> T {
        assert_eq!(
            (self.nrows, self.ncols),
            (other.nrows, other.ncols),
            "dimension mismatch: {}x{} vs {}x{}",
            self.nrows,
            self.ncols,
            other.nrows,
            other.ncols,
        );
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs()))
    }

    /// Maximum absolute row sum (infinity norm).
    pub fn norm_inf(&self) -> T {
        (0..self.nrows)
            .map(|i| (0..self.ncols).fold(T::zero(), |acc, j| acc + self[(i, j)].abs()))
            .fold(T::zero(), |acc, s| acc.max(s))
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for DynMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        let start = col * self.nrows + row_start;
        let end = col * self.nrows + self.nrows;
        &self.data[start..end]
    }
}

impl<T> MatrixMut<T> for DynMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let start = col * self.nrows + row_start;
        let end = col * self.nrows + self.nrows;
        &mut self.data[start..end]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}
