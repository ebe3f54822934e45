use alloc::vec::Vec;
use core::ops::Index;

use log::debug;

use super::{CollocationError, DiffOperators, InputError, NodeSet};
use crate::dynmatrix::{DynMatrix, DynVector};
use crate::traits::FloatScalar;

/// Dirichlet value at `x = 0` (`η → ∞`).
pub const FAR_FIELD_VALUE: f64 = 1.0;

/// Dirichlet value at `x = 1` (`η = 0`).
pub const SURFACE_VALUE: f64 = 0.0;

/// Coefficient of `y''`: `c₂(x) = x`.
#[inline]
pub fn second_derivative_coeff<T: FloatScalar>(x: T) -> T {
    x
}

/// Coefficient of `y'`: `c₁(x) = 1 + 2·ln(max(x, ε))`.
///
/// The floor keeps the coefficient finite at `x = 0`; the boundary rows are
/// never assembled, so it only matters for custom node sets.
#[inline]
pub fn first_derivative_coeff<T: FloatScalar>(x: T, ln_floor: T) -> T {
    let two = T::one() + T::one();
    T::one() + two * x.max(ln_floor).ln()
}

/// Interior collocation system `C·y = D` for
/// `x·y'' + (1 + 2 ln x)·y' = 0`, `y(0) = 1`, `y(1) = 0`.
///
/// Row `i − 1` of `C` is row `i` of `c₂(x_i)·B + c₁(x_i)·A` restricted to
/// the interior columns; the boundary columns are moved to `D` weighted by
/// the Dirichlet values.
///
/// ```
/// use collocation::{gauss_legendre_nodes, Barycentric, BoundaryValueSystem,
///     DifferentiationStrategy};
///
/// let nodes = gauss_legendre_nodes::<f64>(1).unwrap();
/// let ops = Barycentric.build(nodes.as_slice()).unwrap();
/// let system = BoundaryValueSystem::assemble(&nodes, &ops, 1e-12).unwrap();
/// assert_eq!(system.size(), 1);
///
/// let y = system.solve().unwrap();
/// assert_eq!(y.values().len(), 3);
/// assert_eq!(y.far_field(), 1.0);
/// assert_eq!(y.surface(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryValueSystem<T> {
    matrix: DynMatrix<T>,
    rhs: DynVector<T>,
}

impl<T: FloatScalar> BoundaryValueSystem<T> {
    /// Assemble `C` and `D` from a node set and its operators.
    pub fn assemble(
        nodes: &NodeSet<T>,
        ops: &DiffOperators<T>,
        ln_floor: T,
    ) -> Result<Self, CollocationError> {
        if !ln_floor.is_finite() {
            return Err(InputError::NonFinite("ln_floor").into());
        }
        if ln_floor <= T::zero() {
            return Err(InputError::NotPositive("ln_floor").into());
        }
        let m = nodes.len();
        if ops.size() != m {
            return Err(InputError::LengthMismatch.into());
        }
        let n = m - 2;
        let a = ops.first();
        let b = ops.second();
        let y0 = T::from(FAR_FIELD_VALUE).unwrap();
        let y_end = T::from(SURFACE_VALUE).unwrap();

        let c2: Vec<T> = nodes.interior().iter().map(|&x| second_derivative_coeff(x)).collect();
        let c1: Vec<T> = nodes
            .interior()
            .iter()
            .map(|&x| first_derivative_coeff(x, ln_floor))
            .collect();
        let coeff = |i: usize, j: usize| c2[i - 1] * b[(i, j)] + c1[i - 1] * a[(i, j)];

        let matrix = DynMatrix::from_fn(n, n, |r, c| coeff(r + 1, c + 1));
        let rhs: Vec<T> = (1..=n)
            .map(|i| -(y0 * coeff(i, 0) + y_end * coeff(i, m - 1)))
            .collect();

        Ok(Self {
            matrix,
            rhs: DynVector::from_vec(rhs),
        })
    }

    /// The `n × n` matrix `C`.
    pub fn matrix(&self) -> &DynMatrix<T> {
        &self.matrix
    }

    /// The right-hand side `D`.
    pub fn rhs(&self) -> &DynVector<T> {
        &self.rhs
    }

    /// Number of unknowns `n`.
    pub fn size(&self) -> usize {
        self.rhs.len()
    }

    /// Solve by LU with partial pivoting and restore the boundary values.
    ///
    /// A singular matrix, a non-finite solution or a relative residual above
    /// `√ε_mach` is reported as [`CollocationError::SingularSystem`].
    pub fn solve(&self) -> Result<NodalSolution<T>, CollocationError> {
        let interior = self.matrix.solve(&self.rhs)?;
        if !interior.is_finite() {
            return Err(CollocationError::SingularSystem);
        }

        let residual = relative_residual(&self.matrix, &interior, &self.rhs);
        debug!("bvp: solved {0}x{0} system, relative residual {1}", self.size(), residual);
        if residual.is_nan() || residual > T::epsilon().sqrt() {
            return Err(CollocationError::SingularSystem);
        }

        let mut values = Vec::with_capacity(self.size() + 2);
        values.push(T::from(FAR_FIELD_VALUE).unwrap());
        values.extend_from_slice(interior.as_slice());
        values.push(T::from(SURFACE_VALUE).unwrap());
        Ok(NodalSolution { values })
    }
}

/// `‖C·y − D‖∞ / (‖C‖∞·‖y‖∞ + ‖D‖∞)`, zero for an all-zero problem.
fn relative_residual<T: FloatScalar>(c: &DynMatrix<T>, y: &DynVector<T>, d: &DynVector<T>) -> T {
    let cy = c * y;
    let mut r = T::zero();
    for i in 0..d.len() {
        r = r.max((cy[i] - d[i]).abs());
    }
    let scale = c.norm_inf() * y.norm_inf() + d.norm_inf();
    if scale == T::zero() {
        r
    } else {
        r / scale
    }
}

/// Values `y_0 … y_{n+1}` at the collocation nodes, index for index with the
/// [`NodeSet`]. `y_0 = 1` and `y_{n+1} = 0` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct NodalSolution<T> {
    values: Vec<T>,
}

impl<T: FloatScalar> NodalSolution<T> {
    /// All `n + 2` values.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The solved interior values `y_1 … y_n`.
    pub fn interior(&self) -> &[T] {
        &self.values[1..self.values.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `y_0`, the value at `x = 0`.
    pub fn far_field(&self) -> T {
        self.values[0]
    }

    /// `y_{n+1}`, the value at `x = 1`.
    pub fn surface(&self) -> T {
        self.values[self.values.len() - 1]
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T> Index<usize> for NodalSolution<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.values[i]
    }
}
