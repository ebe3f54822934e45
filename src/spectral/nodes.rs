use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::Index;

use super::{CollocationError, InputError};
use crate::linalg::tridiagonal_qr_first_row;
use crate::traits::FloatScalar;

const MAX_NEWTON_ITER: usize = 100;

/// Root-finding method for the Legendre polynomial `P_n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeMethod {
    /// Newton iteration on the three-term recurrence from
    /// `cos(π(i + 3/4)/(n + 1/2))` starting guesses.
    #[default]
    Newton,
    /// Eigenvalues of the symmetric Jacobi matrix with off-diagonal
    /// `β_k = k/√(4k² − 1)`; weights from the first eigenvector components.
    GolubWelsch,
}

/// Gauss–Legendre quadrature rule on `[-1, 1]`.
///
/// Nodes are the roots of `P_n`, ascending; the rule integrates polynomials of
/// degree `2n − 1` exactly.
///
/// ```
/// use collocation::GaussLegendre;
///
/// let rule = GaussLegendre::<f64>::new(3).unwrap();
/// assert!((rule.nodes()[2] - (0.6_f64).sqrt()).abs() < 1e-15);
/// assert!((rule.weights()[1] - 8.0 / 9.0).abs() < 1e-15);
///
/// // ∫₀² x⁵ dx = 32/3
/// let v = rule.integrate(0.0, 2.0, |x| x.powi(5));
/// assert!((v - 32.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre<T> {
    nodes: Vec<T>,
    weights: Vec<T>,
}

impl<T: FloatScalar> GaussLegendre<T> {
    /// `n`-point rule by Newton iteration.
    pub fn new(n: usize) -> Result<Self, CollocationError> {
        Self::with_method(n, NodeMethod::Newton)
    }

    /// `n`-point rule by the chosen method.
    pub fn with_method(n: usize, method: NodeMethod) -> Result<Self, CollocationError> {
        if n < 1 {
            return Err(InputError::TooFewNodes.into());
        }
        let (nodes, weights) = match method {
            NodeMethod::Newton => legendre_newton(n),
            NodeMethod::GolubWelsch => legendre_golub_welsch(n)?,
        };
        Ok(Self { nodes, weights })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a rule has at least one point.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes on `[-1, 1]`, ascending.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Weights matching [`nodes`](Self::nodes); they sum to 2.
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Nodes and weights mapped affinely to `[a, b]`.
    pub fn mapped(&self, a: T, b: T) -> (Vec<T>, Vec<T>) {
        let two = T::one() + T::one();
        let half = (b - a) / two;
        let nodes = self.nodes.iter().map(|&xi| a + half * (xi + T::one())).collect();
        let weights = self.weights.iter().map(|&w| half * w).collect();
        (nodes, weights)
    }

    /// `∫ₐᵇ f(x) dx` by this rule.
    pub fn integrate(&self, a: T, b: T, f: impl Fn(T) -> T) -> T {
        let (xs, ws) = self.mapped(a, b);
        xs.iter()
            .zip(ws.iter())
            .fold(T::zero(), |acc, (&x, &w)| acc + w * f(x))
    }
}

/// `(P_n(x), P_n'(x))` by the three-term recurrence.
fn legendre_with_derivative<T: FloatScalar>(n: usize, x: T) -> (T, T) {
    let one = T::one();
    let mut p_prev = one;
    let mut p = x;
    for k in 2..=n {
        let kf = T::from(k).unwrap();
        let next = ((kf + kf - one) * x * p - (kf - one) * p_prev) / kf;
        p_prev = p;
        p = next;
    }
    let dp = T::from(n).unwrap() * (x * p - p_prev) / (x * x - one);
    (p, dp)
}

fn legendre_newton<T: FloatScalar>(n: usize) -> (Vec<T>, Vec<T>) {
    let one = T::one();
    let two = one + one;
    let pi = T::from(core::f64::consts::PI).unwrap();
    let denom = T::from(n).unwrap() + T::from(0.5).unwrap();

    let mut nodes = vec![T::zero(); n];
    let mut weights = vec![T::zero(); n];
    for i in 0..n {
        // Guesses descend with i; store ascending
        let mut x = (pi * (T::from(i).unwrap() + T::from(0.75).unwrap()) / denom).cos();
        for _ in 0..MAX_NEWTON_ITER {
            let (p, dp) = legendre_with_derivative(n, x);
            let dx = p / dp;
            x = x - dx;
            if dx.abs() <= T::epsilon() {
                break;
            }
        }
        let (_, dp) = legendre_with_derivative(n, x);
        nodes[n - 1 - i] = x;
        weights[n - 1 - i] = two / ((one - x * x) * dp * dp);
    }
    (nodes, weights)
}

fn legendre_golub_welsch<T: FloatScalar>(n: usize) -> Result<(Vec<T>, Vec<T>), CollocationError> {
    let one = T::one();
    let two = one + one;
    let four = two + two;

    let mut diag = vec![T::zero(); n];
    let mut off: Vec<T> = (1..n)
        .map(|k| {
            let kf = T::from(k).unwrap();
            kf / (four * kf * kf - one).sqrt()
        })
        .collect();
    let mut first_row = vec![T::zero(); n];
    tridiagonal_qr_first_row(&mut diag, &mut off, &mut first_row, 30 * n.max(2))?;

    // μ₀ = ∫₋₁¹ dx = 2
    let weights = first_row.iter().map(|&v| two * v * v).collect();
    Ok((diag, weights))
}

/// Collocation nodes on `[0, 1]`: `0`, the `n` Gauss–Legendre nodes mapped by
/// `t = (ξ + 1)/2`, and `1`. Strictly increasing, length `n + 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSet<T> {
    points: Vec<T>,
}

impl<T: FloatScalar> NodeSet<T> {
    /// Endpoints plus `n` Gauss–Legendre nodes from the chosen method.
    pub fn gauss_legendre(n: usize, method: NodeMethod) -> Result<Self, CollocationError> {
        let rule = GaussLegendre::with_method(n, method)?;
        let (interior, _) = rule.mapped(T::zero(), T::one());
        let mut points = Vec::with_capacity(n + 2);
        points.push(T::zero());
        points.extend_from_slice(&interior);
        points.push(T::one());
        check_increasing(&points)?;
        Ok(Self { points })
    }

    /// Custom node set. Must hold at least three finite points, start at
    /// `0`, end at `1` and be strictly increasing.
    pub fn from_points(points: Vec<T>) -> Result<Self, CollocationError> {
        if points.len() < 3 {
            return Err(InputError::TooFewNodes.into());
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(InputError::NonFinite("node").into());
        }
        if points[0] != T::zero() || points[points.len() - 1] != T::one() {
            return Err(InputError::Endpoints.into());
        }
        check_increasing(&points)?;
        Ok(Self { points })
    }

    /// All `n + 2` points.
    pub fn as_slice(&self) -> &[T] {
        &self.points
    }

    /// Total number of points, `n + 2`.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a node set holds at least three points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of interior (Gauss–Legendre) nodes, `n`.
    pub fn interior_len(&self) -> usize {
        self.points.len() - 2
    }

    /// The interior nodes `x₁ … xₙ`.
    pub fn interior(&self) -> &[T] {
        &self.points[1..self.points.len() - 1]
    }

    /// Similarity coordinate of each node, `η_i = −ln(max(x_i, ε))`.
    ///
    /// Decreasing in `i`: `η₀ = −ln ε`, `η_{n+1} = 0`.
    pub fn similarity(&self, ln_floor: T) -> Vec<T> {
        self.points.iter().map(|&x| -(x.max(ln_floor)).ln()).collect()
    }
}

impl<T> Index<usize> for NodeSet<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.points[i]
    }
}

/// `n` Gauss–Legendre nodes on `[0, 1]` with both endpoints, by Newton
/// iteration.
///
/// ```
/// use collocation::gauss_legendre_nodes;
///
/// let nodes = gauss_legendre_nodes::<f64>(2).unwrap();
/// assert_eq!(nodes.len(), 4);
/// let h = 0.5 / 3.0_f64.sqrt();
/// assert!((nodes[1] - (0.5 - h)).abs() < 1e-15);
/// assert!((nodes[2] - (0.5 + h)).abs() < 1e-15);
/// ```
pub fn gauss_legendre_nodes<T: FloatScalar>(n: usize) -> Result<NodeSet<T>, CollocationError> {
    NodeSet::gauss_legendre(n, NodeMethod::Newton)
}

/// First index whose point does not exceed its predecessor.
pub(crate) fn check_increasing<T: FloatScalar>(points: &[T]) -> Result<(), CollocationError> {
    for i in 1..points.len() {
        // NaN compares as unordered and is rejected with the duplicates
        if points[i].partial_cmp(&points[i - 1]) != Some(Ordering::Greater) {
            return Err(CollocationError::DegenerateNodes { index: i });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legendre_recurrence_values() {
        // P_3(x) = (5x³ − 3x)/2, P_3'(x) = (15x² − 3)/2
        let (p, dp) = legendre_with_derivative(3, 0.4_f64);
        assert!((p - (5.0 * 0.064 - 1.2) / 2.0).abs() < 1e-15);
        assert!((dp - (15.0 * 0.16 - 3.0) / 2.0).abs() < 1e-14);
    }

    #[test]
    fn single_node_is_midpoint() {
        let rule = GaussLegendre::<f64>::new(1).unwrap();
        assert!(rule.nodes()[0].abs() < 1e-16);
        assert!((rule.weights()[0] - 2.0).abs() < 1e-15);
        let gw = GaussLegendre::<f64>::with_method(1, NodeMethod::GolubWelsch).unwrap();
        assert_eq!(gw.nodes(), &[0.0]);
        assert_eq!(gw.weights(), &[2.0]);
    }

    #[test]
    fn check_increasing_reports_index() {
        assert_eq!(
            check_increasing(&[0.0_f64, 0.5, 0.5, 1.0]),
            Err(CollocationError::DegenerateNodes { index: 2 })
        );
        assert_eq!(
            check_increasing(&[0.0_f64, f64::NAN, 1.0]),
            Err(CollocationError::DegenerateNodes { index: 1 })
        );
        assert!(check_increasing(&[0.0_f64, 0.25, 1.0]).is_ok());
    }
}
