use log::{debug, warn};

use super::{CollocationError, InputError};
use crate::dynmatrix::DynMatrix;
use crate::interp::barycentric_weights;
use crate::traits::FloatScalar;

/// Interior node count at which [`Crossover`] switches from
/// [`Vandermonde`] to [`Barycentric`].
pub const DEFAULT_THRESHOLD: usize = 20;

/// Largest relative exactness defect accepted from [`Vandermonde`]; see
/// there.
const MAX_EXACTNESS_DEFECT: f64 = 1e-3;

/// Which construction produced a [`DiffOperators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Vandermonde,
    Barycentric,
}

/// First- and second-derivative matrices on a node set.
///
/// For nodal values `y` of a polynomial of degree `< m` on `m` nodes,
/// `first() · y` and `second() · y` are the nodal values of `y'` and `y''`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffOperators<T> {
    first: DynMatrix<T>,
    second: DynMatrix<T>,
    branch: Branch,
}

impl<T: FloatScalar> DiffOperators<T> {
    /// First-derivative matrix `A`.
    pub fn first(&self) -> &DynMatrix<T> {
        &self.first
    }

    /// Second-derivative matrix `B`.
    pub fn second(&self) -> &DynMatrix<T> {
        &self.second
    }

    /// Construction used.
    pub fn branch(&self) -> Branch {
        self.branch
    }

    /// Number of nodes (rows and columns of each matrix).
    pub fn size(&self) -> usize {
        self.first.nrows()
    }
}

/// A way of building differentiation matrices on arbitrary distinct nodes.
///
/// ```
/// use collocation::{Barycentric, DifferentiationStrategy};
///
/// // d/dx of x² at {0, 0.5, 1} is {0, 1, 2}
/// let ops = Barycentric.build(&[0.0_f64, 0.5, 1.0]).unwrap();
/// let a = ops.first();
/// let y = [0.0, 0.25, 1.0];
/// for i in 0..3 {
///     let dy: f64 = (0..3).map(|j| a[(i, j)] * y[j]).sum();
///     assert!((dy - 2.0 * [0.0, 0.5, 1.0][i]).abs() < 1e-13);
/// }
/// ```
pub trait DifferentiationStrategy<T: FloatScalar> {
    /// Build `(A, B)` on `nodes`.
    ///
    /// Fails with [`CollocationError::DegenerateNodes`] if two nodes
    /// coincide, [`CollocationError::SingularSystem`] if the construction
    /// hits a singular or numerically unusable matrix and
    /// [`CollocationError::NumericOverflow`] if intermediate weights are not
    /// representable.
    fn build(&self, nodes: &[T]) -> Result<DiffOperators<T>, CollocationError>;
}

/// Monomial construction: `Q[i][j] = x_iʲ`, `A = C₁·Q⁻¹`, `B = C₂·Q⁻¹` with
/// `C₁`, `C₂` the monomial derivatives.
///
/// Exact in exact arithmetic, but `Q` is badly conditioned: in `f64` the
/// operators lose accuracy from about 15 interior nodes and are unusable
/// past 20; in `f32` the same happens past 6. The result is checked against
/// `A·1 = 0`, `A·x = 1` and `B·x² = 2` at every node, and a deviation above
/// `10⁻³` of the operator norm is reported as
/// [`CollocationError::SingularSystem`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Vandermonde;

impl<T: FloatScalar> DifferentiationStrategy<T> for Vandermonde {
    fn build(&self, nodes: &[T]) -> Result<DiffOperators<T>, CollocationError> {
        validate_nodes(nodes)?;
        let m = nodes.len();
        if m >= DEFAULT_THRESHOLD + 2 {
            warn!(
                "Vandermonde differentiation on {} nodes; conditioning degrades past {} interior nodes",
                m, DEFAULT_THRESHOLD
            );
        }

        let q = DynMatrix::from_fn(m, m, |i, j| nodes[i].powi(j as i32));
        let c1 = DynMatrix::from_fn(m, m, |i, j| {
            if j == 0 {
                T::zero()
            } else {
                T::from(j).unwrap() * nodes[i].powi(j as i32 - 1)
            }
        });
        let c2 = DynMatrix::from_fn(m, m, |i, j| {
            if j < 2 {
                T::zero()
            } else {
                T::from(j * (j - 1)).unwrap() * nodes[i].powi(j as i32 - 2)
            }
        });

        let q_inv = q.inverse()?;
        let first = &c1 * &q_inv;
        let second = &c2 * &q_inv;
        let defect = exactness_defect(nodes, &first, &second);
        debug!("Vandermonde operators on {} nodes: exactness defect {}", m, defect);
        if defect.is_nan() || defect > T::from(MAX_EXACTNESS_DEFECT).unwrap() {
            return Err(CollocationError::SingularSystem);
        }
        Ok(DiffOperators {
            first,
            second,
            branch: Branch::Vandermonde,
        })
    }
}

/// Largest of `‖A·1‖∞ / ‖A‖∞`, `‖A·x − 1‖∞ / ‖A‖∞` and, from three nodes
/// on, `‖B·x² − 2‖∞ / ‖B‖∞`; NaN if either operator is not finite.
fn exactness_defect<T: FloatScalar>(nodes: &[T], a: &DynMatrix<T>, b: &DynMatrix<T>) -> T {
    if !a.is_finite() || !b.is_finite() {
        return T::nan();
    }
    let m = nodes.len();
    let two = T::one() + T::one();
    let (mut d0, mut d1, mut d2) = (T::zero(), T::zero(), T::zero());
    for i in 0..m {
        let (mut s0, mut s1, mut s2) = (T::zero(), T::zero(), T::zero());
        for j in 0..m {
            let x = nodes[j];
            s0 = s0 + a[(i, j)];
            s1 = s1 + a[(i, j)] * x;
            s2 = s2 + b[(i, j)] * x * x;
        }
        d0 = d0.max(s0.abs());
        d1 = d1.max((s1 - T::one()).abs());
        if m >= 3 {
            d2 = d2.max((s2 - two).abs());
        }
    }
    let a_norm = a.norm_inf().max(T::one());
    let b_norm = b.norm_inf().max(T::one());
    (d0.max(d1) / a_norm).max(d2 / b_norm)
}

/// Barycentric construction:
/// `D[i][j] = w_j / (w_i (x_i − x_j))` off the diagonal, `D[i][i] = −Σ_{j≠i} D[i][j]`,
/// `A = D`, `B = D·D`. Every row of `A` sums to zero by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Barycentric;

impl<T: FloatScalar> DifferentiationStrategy<T> for Barycentric {
    fn build(&self, nodes: &[T]) -> Result<DiffOperators<T>, CollocationError> {
        validate_nodes(nodes)?;
        let m = nodes.len();
        let w = barycentric_weights(nodes);
        if w.iter().any(|v| !v.is_finite() || *v == T::zero()) {
            return Err(CollocationError::NumericOverflow);
        }

        let mut d = DynMatrix::zeros(m, m, T::zero());
        for j in 0..m {
            for i in 0..m {
                if i != j {
                    d[(i, j)] = w[j] / (w[i] * (nodes[i] - nodes[j]));
                }
            }
        }
        for i in 0..m {
            let mut sum = T::zero();
            for j in 0..m {
                if j != i {
                    sum = sum + d[(i, j)];
                }
            }
            d[(i, i)] = -sum;
        }

        let second = &d * &d;
        Ok(DiffOperators {
            first: d,
            second,
            branch: Branch::Barycentric,
        })
    }
}

/// Size-based choice: [`Vandermonde`] below `threshold` interior nodes,
/// [`Barycentric`] at or above it. A threshold of 0 always picks
/// barycentric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossover {
    pub threshold: usize,
}

impl Default for Crossover {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Crossover {
    /// Branch chosen for `n` interior nodes.
    pub fn branch_for(&self, n: usize) -> Branch {
        if n < self.threshold {
            Branch::Vandermonde
        } else {
            Branch::Barycentric
        }
    }
}

impl<T: FloatScalar> DifferentiationStrategy<T> for Crossover {
    fn build(&self, nodes: &[T]) -> Result<DiffOperators<T>, CollocationError> {
        let n = nodes.len().saturating_sub(2);
        let branch = self.branch_for(n);
        debug!(
            "differentiation operators: {} interior nodes, {:?} branch (threshold {})",
            n, branch, self.threshold
        );
        match branch {
            Branch::Vandermonde => Vandermonde.build(nodes),
            Branch::Barycentric => Barycentric.build(nodes),
        }
    }
}

/// At least two finite, pairwise distinct nodes.
fn validate_nodes<T: FloatScalar>(nodes: &[T]) -> Result<(), CollocationError> {
    if nodes.len() < 2 {
        return Err(InputError::TooFewNodes.into());
    }
    if nodes.iter().any(|x| !x.is_finite()) {
        return Err(InputError::NonFinite("node").into());
    }
    for j in 1..nodes.len() {
        if nodes[..j].iter().any(|&x| x == nodes[j]) {
            return Err(CollocationError::DegenerateNodes { index: j });
        }
    }
    Ok(())
}
