use alloc::vec::Vec;
use core::ops::Index;

use crate::traits::{FloatScalar, Scalar};

/// Dynamically-sized column vector.
///
/// Provides single-index access `v[i]` and slice views for the
/// substitution loops in [`crate::linalg`].
///
/// # Examples
///
/// ```
/// use collocation::DynVector;
///
/// let v = DynVector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.norm_inf(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynVector<T> {
    data: Vec<T>,
}

impl<T: Scalar> DynVector<T> {
    /// Create a vector from a flat slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create a vector from an owned `Vec<T>`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: FloatScalar> DynVector<T> {
    /// Largest absolute element (infinity norm).
    pub fn norm_inf(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &v| acc.max(v.abs()))
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for DynVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}
