use core::fmt::{Debug, Display};
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point elements.
///
/// Required by everything that needs `sqrt`, `ln`, `exp`, `abs`
/// (decompositions, interpolation, the collocation pipeline).
/// `Send + Sync` so solved fields can be evaluated from several threads,
/// `Display` so results can be formatted as tables.
pub trait FloatScalar: Scalar + Float + Display + Send + Sync {}

impl<T: Scalar + Float + Display + Send + Sync> FloatScalar for T {}

/// Read-only access to a matrix-like type.
///
/// Storage is column-major: each column is a contiguous slice.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Column `col` from `row_start` to the last row, as a contiguous slice.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (LU) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Mutable counterpart of [`MatrixRef::col_as_slice`].
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}
